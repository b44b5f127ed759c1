use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

fn env_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter {:?}", config.filter))
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config)?);
    let installed = if config.json {
        builder.with_target(false).json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_config(filter: &str) -> LogConfig {
        LogConfig {
            filter: filter.into(),
            json: false,
        }
    }

    #[test]
    fn accepts_default_directives() {
        assert!(env_filter(&log_config("users_api=debug,axum=info,tower_http=info")).is_ok());
    }

    #[test]
    fn rejects_malformed_directives() {
        let err = env_filter(&log_config("users_api=notalevel")).unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
