//! newsdeck binary entrypoint kept minimal. The full runtime lives in `app`.

mod app;
mod config;
mod detail;
mod events;
mod gql;
mod richtext;
mod session;
mod state;
mod sync;
mod theme;
mod ui;
mod util;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

/// Command-line arguments; every flag overrides the config file.
#[derive(Parser, Debug)]
#[command(name = "newsdeck", version, about = "Terminal dashboard for curating a GraphQL-backed news feed")]
struct Args {
    /// GraphQL endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Startup language filter (all, en, hi, ...).
    #[arg(long)]
    language: Option<String>,
}

struct NewsdeckTimer;

impl tracing_subscriber::fmt::time::FormatTime for NewsdeckTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[tokio::main]
async fn main() {
    // Initialize tracing logger writing to ~/.config/newsdeck/logs/newsdeck.log
    {
        let mut log_path = config::logs_dir();
        log_path.push("newsdeck.log");
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(NewsdeckTimer)
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "logging initialized");
            }
            Err(e) => {
                // Fallback: init stderr logger to avoid blocking startup
                let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(true)
                    .with_timer(NewsdeckTimer)
                    .init();
                tracing::warn!(error = %e, "failed to open log file; using stderr");
            }
        }
    }

    let args = Args::parse();
    let mut settings = config::settings();
    if let Some(endpoint) = args.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(language) = args.language {
        settings.startup_language = language;
    }

    // Authentication precondition: no token, no dashboard. The interactive
    // prompt is the terminal analog of the login redirect.
    let Some(session) = session::acquire(&config::token_path()) else {
        eprintln!("newsdeck: an access token is required; aborting");
        tracing::error!("no access token available; exiting");
        std::process::exit(1);
    };

    tracing::info!(endpoint = %settings.endpoint, "newsdeck starting");
    if let Err(err) = app::run(settings, session).await {
        tracing::error!(error = ?err, "Application error");
    }
    tracing::info!("newsdeck exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking.
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn newsdeck_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::NewsdeckTimer;
        let _ = t.format_time(&mut writer);
        assert!(!buf.is_empty());
    }
}
