use fileset::Verbosity;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default `tracing` level for a verbosity, or `None` when nothing is logged.
pub fn default_level(verbosity: &Verbosity) -> Option<&'static str> {
    match verbosity {
        Verbosity::Off => None,
        Verbosity::On | Verbosity::Custom(_) | Verbosity::Threshold(0) => Some("debug"),
        Verbosity::Threshold(1) => Some("info"),
        Verbosity::Threshold(_) => Some("warn"),
    }
}

/// Install a stderr subscriber for the library's log events.
///
/// `RUST_LOG` overrides the level derived from the verbosity.
pub fn init(verbosity: &Verbosity) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let Some(level) = default_level(verbosity) else {
        return Ok(());
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("fileset={level}")))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
