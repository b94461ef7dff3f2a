//! Endpoint table mapping short endpoint names to URL path templates.

use std::collections::HashMap;
use std::path::Path;

use crate::errors::MarketDataError;

/// Endpoint table shipped with the crate.
const BUNDLED_ENDPOINTS: &str = include_str!("../../config/endpoints.yaml");

/// Endpoint name for the latest-quote endpoint.
pub const LAST_STOCK: &str = "last-stock";

/// Endpoint name for the aggregated bars endpoint.
pub const AGG_STOCK: &str = "agg-stock";

/// Immutable mapping from endpoint names (`last-stock`) to path templates (`/last/stock/`).
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, String>,
}

impl EndpointRegistry {
    /// The endpoint table bundled with the crate.
    pub fn bundled() -> Result<Self, MarketDataError> {
        Self::from_yaml_str(BUNDLED_ENDPOINTS)
    }

    /// Parse a YAML mapping of `name: template` pairs.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MarketDataError> {
        let endpoints: HashMap<String, String> = serde_yaml::from_str(yaml).map_err(|e| {
            MarketDataError::Configuration(format!("Invalid endpoint table: {}", e))
        })?;
        Ok(Self { endpoints })
    }

    /// Read and parse an endpoint table from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MarketDataError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            MarketDataError::Configuration(format!(
                "Failed to read endpoint table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Look up the path template for `name`.
    ///
    /// An entry with an empty template is treated the same as a missing one.
    pub fn resolve(&self, name: &str) -> Result<&str, MarketDataError> {
        match self.endpoints.get(name) {
            Some(template) if !template.is_empty() => Ok(template.as_str()),
            _ => Err(MarketDataError::UnknownEndpoint(name.to_string())),
        }
    }

    /// Number of configured endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EndpointRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            endpoints: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_bundled_table_has_both_endpoints() {
        let registry = EndpointRegistry::bundled().unwrap();
        assert_eq!(registry.resolve(LAST_STOCK).unwrap(), "/last/stock/");
        assert_eq!(registry.resolve(AGG_STOCK).unwrap(), "/agg/stock/");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolve_miss_is_configuration_error() {
        let registry = EndpointRegistry::bundled().unwrap();
        let err = registry.resolve("nonexistent").unwrap_err();
        assert!(matches!(err, MarketDataError::UnknownEndpoint(ref name) if name == "nonexistent"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_template_is_a_miss() {
        let registry: EndpointRegistry = [("last-stock", "")].into_iter().collect();
        assert!(registry.resolve("last-stock").is_err());
    }

    #[test]
    fn test_invalid_yaml_is_configuration_error() {
        let err = EndpointRegistry::from_yaml_str("- just\n- a list\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = EndpointRegistry::from_file("/nonexistent/endpoints.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("/nonexistent/endpoints.yaml"));
    }

    #[test]
    fn test_from_file_reads_custom_table() {
        let path = std::env::temp_dir().join(format!(
            "finage-endpoints-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "last-stock: /v2/last/stock/\n").unwrap();

        let registry = EndpointRegistry::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(registry.resolve(LAST_STOCK).unwrap(), "/v2/last/stock/");
        assert!(registry.resolve(AGG_STOCK).is_err());
    }
}
