//! Tracing setup for GACCIA binaries.
//!
//! [`init_tracing`] installs the global subscriber once per process; later
//! calls are no-ops.

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "GACCIA_LOG";

/// Resolve the filter: `GACCIA_LOG`, then `RUST_LOG`, then `level`.
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Build the subscriber stack writing to `writer`, text or JSON lines.
fn subscriber<W>(json: bool, level: Level, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(env_filter(level));
    if json {
        Box::new(registry.with(fmt::layer().with_target(false).with_writer(writer).json()))
    } else {
        Box::new(registry.with(fmt::layer().with_target(false).with_writer(writer)))
    }
}

/// Install the global subscriber.
///
/// `json` switches to newline-delimited JSON lines; `level` applies when
/// neither filter variable is set. Both formats go to stderr, keeping
/// stdout for command output.
pub fn init_tracing(json: bool, level: Level) {
    if subscriber(json, level, std::io::stderr).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
