//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate()?;
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let dumped = toml::to_string_pretty(&ClientConfig::default()).unwrap();
        assert!(dumped.contains("base_url = \"http://127.0.0.1:8000\""));
        assert!(dumped.contains("format = \"tty\""));

        let parsed: ClientConfig = toml::from_str(&dumped).unwrap();
        assert_eq!(parsed.server.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn validate_reports_config_error() {
        let mut config = ClientConfig::default();
        config.server.timeout = 0;
        assert!(matches!(validate(&config), Err(ClientError::Config(_))));
    }
}
