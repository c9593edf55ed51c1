use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";

/// Installs the global subscriber. `LOG_LEVEL` wins over `default_directive`
/// when it is set and parses.
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_LEVEL_ENV_VAR)
        .try_from_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|err| anyhow!("Invalid log filter {}: {}", default_directive, err))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init()
        .map_err(|err| anyhow!("Could not install tracing subscriber: {}", err))
}
