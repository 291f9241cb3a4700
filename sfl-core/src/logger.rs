//! Logging initialization: human-readable format (timestamp, level, target, message, fields) to console and, optionally, a file.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Initializes the global tracing subscriber.
///
/// Output is `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...`, teed to stdout and
/// `log_file_path` when given. No ANSI codes so the log file stays plain text.
/// Level comes from `RUST_LOG` (default `info`); load `.env` before calling.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let registry = Registry::default().with(env_filter);

    let result = match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);

            use tracing_subscriber::fmt::writer::MakeWriterExt;
            let writer = io::stdout.and(file);

            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .event_format(event_format)
                        .with_span_events(FmtSpan::NONE)
                        .with_ansi(false),
                )
                .try_init()
        }
        None => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stdout)
                    .event_format(event_format)
                    .with_span_events(FmtSpan::NONE)
                    .with_ansi(false),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))
}
