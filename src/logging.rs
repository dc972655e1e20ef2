//! Tracing initialisation
//!
//! Logs go to stderr; stdout is reserved for the rendered transaction.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when nothing else is configured
pub const DEFAULT_LEVEL: &str = "warn";

/// Map `-v` repetitions onto a level, keeping `configured` when none given
pub fn level_for_verbosity(verbosity: u8, configured: Option<&str>) -> String {
    match verbosity {
        0 => configured.unwrap_or(DEFAULT_LEVEL).to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Build the filter: `RUST_LOG` wins, then `level` for this crate only
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{DEFAULT_LEVEL},noyolo={level}")))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        assert_eq!(level_for_verbosity(0, None), "warn");
        assert_eq!(level_for_verbosity(0, Some("error")), "error");
        assert_eq!(level_for_verbosity(1, Some("error")), "info");
        assert_eq!(level_for_verbosity(2, None), "debug");
        assert_eq!(level_for_verbosity(7, None), "trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init("debug");
        init("info");
    }
}
