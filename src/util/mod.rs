//! Small cross-cutting helpers: date formatting and the platform URL opener.

use unicode_width::UnicodeWidthChar;

/// What: Format an ISO-8601/RFC-3339 timestamp for display on detail cards.
///
/// Inputs:
/// - `raw`: Timestamp string as supplied by the remote service (e.g.
///   `"2024-05-17T09:30:00.000Z"`).
///
/// Output:
/// - `"YYYY-MM-DD"` when the value parses; the raw input unchanged otherwise.
///
/// Details: The remote service owns the field format; anything unparseable is
/// shown verbatim rather than hidden.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw.trim()) {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.trim().to_string()
}

/// What: Truncate a string to a maximum display width, appending an ellipsis.
///
/// Inputs:
/// - `s`: Source text.
/// - `max_width`: Maximum number of terminal cells the result may occupy.
///
/// Output:
/// - The original string when it fits; otherwise a prefix plus `…` whose
///   total width is at most `max_width`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut width = 0usize;
    for (i, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            // Room must remain for the ellipsis unless the rest fits exactly.
            let rest_width: usize = s[i..].chars().map(|c| c.width().unwrap_or(0)).sum();
            if width + rest_width <= max_width {
                return s.to_string();
            }
            let mut out = s[..i].to_string();
            out.push('…');
            return out;
        }
        width += w;
    }
    s.to_string()
}

/// What: Open a URL in the default browser (cross-platform).
///
/// Inputs:
/// - `url`: URL string to open.
///
/// Output:
/// - No return value; spawns a background process and ignores errors.
///
/// Details:
/// - On Unix-like systems, tries `xdg-open` (Linux) then `open` (macOS).
/// - On Windows, uses `cmd /c start`.
/// - During tests, this is a no-op to avoid opening real browser windows.
#[cfg_attr(test, allow(unused_variables))]
pub fn open_url(url: &str) {
    #[cfg(not(test))]
    {
        let url = url.to_string();
        std::thread::spawn(move || {
            #[cfg(target_os = "windows")]
            {
                let _ = std::process::Command::new("cmd")
                    .args(["/c", "start", "", &url])
                    .stdin(std::process::Stdio::null())
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn();
            }
            #[cfg(not(target_os = "windows"))]
            {
                let _ = std::process::Command::new("xdg-open")
                    .arg(&url)
                    .stdin(std::process::Stdio::null())
                    .stdout(std::process::Stdio::null())
                    .stderr(std::process::Stdio::null())
                    .spawn()
                    .or_else(|_| {
                        std::process::Command::new("open")
                            .arg(&url)
                            .stdin(std::process::Stdio::null())
                            .stdout(std::process::Stdio::null())
                            .stderr(std::process::Stdio::null())
                            .spawn()
                    });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    /// What: RFC-3339 timestamps reduce to a date; junk passes through.
    ///
    /// Inputs: A zoned timestamp and a non-timestamp string.
    /// Output: `"2024-05-17"` for the former; the trimmed input for the latter.
    #[test]
    fn display_date_parses_rfc3339_and_passes_junk_through() {
        assert_eq!(super::display_date("2024-05-17T09:30:00+00:00"), "2024-05-17");
        assert_eq!(super::display_date("  sometime soon "), "sometime soon");
    }

    /// What: Width-aware truncation keeps short strings and ellipsizes long ones.
    ///
    /// Inputs: Strings shorter than, equal to, and longer than the budget.
    /// Output: Unchanged text when it fits; `…`-terminated prefix otherwise.
    #[test]
    fn truncate_to_width_respects_budget() {
        assert_eq!(super::truncate_to_width("short", 10), "short");
        assert_eq!(super::truncate_to_width("exactly10!", 10), "exactly10!");
        let cut = super::truncate_to_width("a much longer headline", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= 8);
        assert_eq!(super::truncate_to_width("anything", 0), "");
    }
}
