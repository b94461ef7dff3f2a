use finage_market_data::{FinageConfig, MarketDataError};

pub const ENV_SERVER_NAME: &str = "FINAGE_MCP_NAME";
pub const DEFAULT_SERVER_NAME: &str = "finage";

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name reported in the `initialize` result.
    pub server_name: String,
    pub finage: FinageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MarketDataError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_name = lookup(ENV_SERVER_NAME)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());
        let finage = FinageConfig::from_lookup(&lookup)?;
        Ok(Self {
            server_name,
            finage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("FINAGE_API_BASE", "https://api.finage.co.uk"),
            ("FINAGE_API_KEY", "X"),
        ]))
        .unwrap();
        assert_eq!(config.server_name, "finage");
        assert_eq!(config.finage.api_base, "https://api.finage.co.uk");
    }

    #[test]
    fn test_server_name_override() {
        let config = Config::from_lookup(lookup(&[
            ("FINAGE_API_BASE", "https://api.finage.co.uk"),
            ("FINAGE_MCP_NAME", "market-data"),
        ]))
        .unwrap();
        assert_eq!(config.server_name, "market-data");
    }

    #[test]
    fn test_missing_base_is_an_error() {
        assert!(Config::from_lookup(lookup(&[("FINAGE_API_KEY", "X")])).is_err());
    }
}
