use apollo_domain::{CliOverrides, Config};

/// Load and validate the configuration. Logging is not initialized yet at
/// this point, so failures are reported by the caller.
pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
