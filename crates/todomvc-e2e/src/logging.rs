//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "todomvc_e2e=info";

/// Filter directive for a verbosity count (`-v`, `-vv`)
#[must_use]
pub fn filter_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "todomvc_e2e=warn";
    }
    match verbosity {
        0 => DEFAULT_FILTER,
        1 => "todomvc_e2e=debug",
        _ => "todomvc_e2e=trace,chromiumoxide=debug",
    }
}

/// Install a fmt subscriber on stderr. `RUST_LOG` takes precedence over
/// `directive`. Safe to call more than once.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install a subscriber that writes through the test harness capture
pub fn init_for_tests() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for() {
        assert_eq!(filter_for(0, false), DEFAULT_FILTER);
        assert_eq!(filter_for(1, false), "todomvc_e2e=debug");
        assert!(filter_for(3, false).contains("trace"));
        assert_eq!(filter_for(2, true), "todomvc_e2e=warn");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_for_tests();
        init_for_tests();
        init(DEFAULT_FILTER);
    }
}
