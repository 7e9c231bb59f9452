//! Tracing setup for the terminal host
//!
//! The TUI owns the terminal, so logs go to a daily-rotated file under
//! `~/.mention/logs/`. Filter with RUST_LOG:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=mention_core::tracker=trace` - every edit and selection event

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::io;

/// Initialize file logging. Without a usable log directory the app runs
/// unlogged.
pub fn init() {
    let logs_dir = match io::logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let file_appender = tracing_appender::rolling::daily(logs_dir, "mention.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
}
