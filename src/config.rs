//! Configuration loading and XDG path helpers for newsdeck.
//!
//! Settings live in `~/.config/newsdeck/newsdeck.conf` as `key = value`
//! lines. Missing files fall back to defaults; a commented skeleton is
//! written on first run so the operator can discover the knobs.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default GraphQL endpoint used when neither config nor CLI provide one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

/// Skeleton written to the config path when no file exists yet.
const SKELETON_CONFIG_CONTENT: &str = "\
# newsdeck configuration
#
# Remote GraphQL endpoint serving the news feed.
# endpoint = http://localhost:4000/graphql
#
# Language filter applied at startup: all, en, hi, ...
# startup_language = all
";

/// User settings loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Language code preselected in the list view (`"all"` disables filtering).
    pub startup_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            startup_language: "all".to_string(),
        }
    }
}

/// What: Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/newsdeck`, ensuring it exists.
///
/// Output: `Some(PathBuf)` when HOME is set and the directory can be created.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("newsdeck");
        if fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// XDG config directory for newsdeck (ensured to exist).
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join("newsdeck");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `$HOME/.config/newsdeck/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Path of the stored access token file.
pub fn token_path() -> PathBuf {
    config_dir().join("access_token")
}

/// What: Strip a trailing `#`/`//` comment from a config value.
///
/// Inputs:
/// - `val`: Raw right-hand side of a `key = value` line.
///
/// Output: The value with any inline comment removed, trimmed.
fn strip_inline_comment(val: &str) -> &str {
    let cut = val
        .find('#')
        .into_iter()
        .chain(val.find("//"))
        .min()
        .unwrap_or(val.len());
    val[..cut].trim()
}

/// What: Load user settings from the newsdeck config file.
///
/// Inputs: none (path resolved via XDG helpers).
///
/// Output: Parsed [`Settings`]; defaults when the file is missing or invalid.
///
/// Details: Writes the commented skeleton on first run. Unknown keys are
/// ignored so older binaries tolerate newer config files.
pub fn settings() -> Settings {
    let path = config_dir().join("newsdeck.conf");
    if !path.is_file() {
        let _ = fs::write(&path, SKELETON_CONFIG_CONTENT);
    }
    let Ok(content) = fs::read_to_string(&path) else {
        return Settings::default();
    };
    parse_settings(&content)
}

/// What: Parse settings from config file content.
///
/// Inputs:
/// - `content`: Full text of a `newsdeck.conf` file.
///
/// Output: [`Settings`] with every recognized key applied over defaults.
///
/// Details: Lines starting with `#` or `//` are comments; keys are
/// case-insensitive with `.`/`-`/space normalized to `_`.
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val.trim());
        match key.as_str() {
            "endpoint" | "graphql_endpoint" => {
                if !val.is_empty() {
                    out.endpoint = val.to_string();
                }
            }
            "startup_language" | "language" => {
                if !val.is_empty() {
                    out.startup_language = val.to_lowercase();
                }
            }
            _ => {}
        }
    }
    out
}
