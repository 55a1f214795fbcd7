//! Tracing/logging initialization.

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
///
/// `RUST_LOG`, when set, takes precedence over `default_filter`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directives used when `RUST_LOG` is absent or invalid.
    pub default_filter: String,
    /// JSON lines instead of human-readable output.
    pub json: bool,
    /// Include the event target (module path).
    pub with_target: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: true,
            with_target: false,
        }
    }
}

impl ObservabilityConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_with(config: &ObservabilityConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(config.with_target);

    // Already-installed subscribers win.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: ObservabilityConfig =
            serde_json::from_str(r#"{ "default_filter": "insight_auth=debug" }"#).unwrap();
        assert_eq!(config.default_filter, "insight_auth=debug");
        assert!(config.json);
        assert!(!config.with_target);
    }

    #[test]
    fn init_is_idempotent() {
        init_with(&ObservabilityConfig::default());
        init_with(&ObservabilityConfig {
            json: false,
            ..ObservabilityConfig::default()
        });
        crate::init();
        ::tracing::info!("still logging");
    }
}
