//! Logging setup
//!
//! Configure the console via `RUNPAD_LOG` (falls back to `RUST_LOG`):
//! - `RUNPAD_LOG=debug` - all debug logs
//! - `RUNPAD_LOG=runpad::update=debug` - module-level filtering
//! - `RUNPAD_LOG=runpad::services=trace` - request-level detail
//!
//! # Log Files
//!
//! Each tab writes to `~/.config/runpad/logs/runpad.<tab>.log`, rotated
//! daily, at debug level. Events inside [`tab_span`] carry the tab name.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ensure_logs_dir, log_file_prefix};

/// Environment variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "RUNPAD_LOG";

const DEFAULT_CONSOLE_LEVEL: &str = "warn";

/// Initialize tracing subscriber with console and per-tab file logging
///
/// Console output goes to stderr so it does not interleave with the
/// editor's own output.
pub fn init(tab: &str) {
    let directives = console_directives(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    let console_filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Warning: Ignoring log filter '{}': {}", directives, e);
        EnvFilter::new(DEFAULT_CONSOLE_LEVEL)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, log_file_prefix(tab));
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Span tagging every event of one editor session with its tab
pub fn tab_span(tab: &str) -> ::tracing::Span {
    ::tracing::info_span!("tab", name = %tab)
}

/// First non-blank filter among `RUNPAD_LOG` and `RUST_LOG`
fn console_directives(runpad_log: Option<String>, rust_log: Option<String>) -> String {
    [runpad_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONSOLE_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_events_in_tab_span_name_the_tab() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        ::tracing::subscriber::with_default(subscriber, || {
            let _span = tab_span("work").entered();
            ::tracing::info!("opened");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("tab{name=work}"), "{}", output);
        assert!(output.contains("opened"));
    }

    #[test]
    fn test_runpad_log_wins_over_rust_log() {
        assert_eq!(
            console_directives(Some("runpad=debug".into()), Some("trace".into())),
            "runpad=debug"
        );
    }

    #[test]
    fn test_blank_runpad_log_falls_through() {
        assert_eq!(
            console_directives(Some("  ".into()), Some("info".into())),
            "info"
        );
        assert_eq!(console_directives(None, None), "warn");
    }
}
