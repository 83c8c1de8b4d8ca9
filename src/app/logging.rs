// SPDX-License-Identifier: MPL-2.0
//! Log subscriber setup for the host binary.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! host's job. `RUST_LOG` wins over the configured filter.

use tracing_subscriber::EnvFilter;

use super::config::LoggingConfig;

/// Builds the filter: `RUST_LOG` if set and valid, else `config.filter`,
/// else `info`.
#[must_use]
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a stderr `fmt` subscriber. Later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(filter = %config.filter, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = build_filter(&LoggingConfig {
            filter: "smartpos_settings=debug".to_string(),
        });
        assert_eq!(filter.to_string(), "smartpos_settings=debug");
    }

    #[test]
    fn invalid_filter_falls_back_to_info() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = build_filter(&LoggingConfig {
            filter: "smartpos_settings=loudest".to_string(),
        });
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
