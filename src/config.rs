// Polkadot Connector - Options
// Deserialized from JSON; the registry reference is attached in code

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::ConnectorError;
use crate::logging::LogLevel;
use crate::plugin::PluginRegistry;

/// Public endpoint used when configuration does not name one.
pub const DEFAULT_PROVIDER_ENDPOINT: &str = "wss://rpc.polkadot.io";

fn default_provider_endpoint() -> String {
    DEFAULT_PROVIDER_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    #[serde(default = "default_provider_endpoint")]
    pub provider_endpoint: String,

    #[serde(default)]
    pub instance_id: String,

    #[serde(skip)]
    pub plugin_registry: Option<Arc<PluginRegistry>>,
}

impl ConnectorOptions {
    pub fn new(
        instance_id: impl Into<String>,
        provider_endpoint: impl Into<String>,
        plugin_registry: Arc<PluginRegistry>,
    ) -> Self {
        Self {
            log_level: None,
            provider_endpoint: provider_endpoint.into(),
            instance_id: instance_id.into(),
            plugin_registry: Some(plugin_registry),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConnectorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_registry(mut self, registry: Arc<PluginRegistry>) -> Self {
        self.plugin_registry = Some(registry);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    /// Check the fields a connector cannot be built without.
    pub fn validate(&self) -> Result<(), ConnectorError> {
        if self.plugin_registry.is_none() {
            return Err(ConnectorError::Configuration(
                "plugin_registry is required".to_string(),
            ));
        }
        if self.provider_endpoint.trim().is_empty() {
            return Err(ConnectorError::Configuration(
                "provider_endpoint must not be empty".to_string(),
            ));
        }
        if self.instance_id.trim().is_empty() {
            return Err(ConnectorError::Configuration(
                "instance_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults_endpoint() {
        let options = ConnectorOptions::from_json_str(r#"{"instanceId": "conn-1"}"#).unwrap();
        assert_eq!(options.provider_endpoint, DEFAULT_PROVIDER_ENDPOINT);
        assert_eq!(options.instance_id, "conn-1");
        assert_eq!(options.log_level(), LogLevel::Info);
        assert!(options.plugin_registry.is_none());
    }

    #[test]
    fn test_json_reads_all_fields() {
        let options = ConnectorOptions::from_json_str(
            r#"{"instanceId": "conn-2", "providerEndpoint": "ws://127.0.0.1:9944", "logLevel": "DEBUG"}"#,
        )
        .unwrap();
        assert_eq!(options.provider_endpoint, "ws://127.0.0.1:9944");
        assert_eq!(options.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_registry_is_required() {
        let options = ConnectorOptions::from_json_str(r#"{"instanceId": "conn-1"}"#).unwrap();
        assert!(options.validate().unwrap_err().is_configuration());

        let options = options.with_registry(Arc::new(PluginRegistry::new()));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let registry = Arc::new(PluginRegistry::new());

        let options = ConnectorOptions::new("  ", "wss://rpc.polkadot.io", registry.clone());
        assert!(options.validate().unwrap_err().is_configuration());

        let options = ConnectorOptions::new("conn-1", "", registry);
        assert!(options.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = ConnectorOptions::from_json_str("{instanceId").unwrap_err();
        assert!(matches!(err, ConnectorError::Json(_)));
    }
}
