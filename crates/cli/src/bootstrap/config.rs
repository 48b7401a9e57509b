use dnsblast_domain::{CliOverrides, Config};
use tracing::info;

/// Load and validate. Nothing is logged here: the subscriber is configured
/// from the result, so call `log_config` once logging is up.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        host = %config.target.host,
        port = config.target.port,
        timeout_ms = config.target.timeout_ms,
        names = config.load.names.len(),
        repeat = config.load.repeat,
        "Configuration loaded"
    );
}
