// Polkadot Connector - Library
// Ledger connector plugin binding a plugin host to Polkadot/Substrate nodes

pub mod bulletin;
pub mod config;
pub mod connector;
pub mod error;
pub mod logging;
pub mod model;
pub mod plugin;
pub mod provider;

// Re-exports for convenience
pub use config::{ConnectorOptions, DEFAULT_PROVIDER_ENDPOINT};
pub use connector::{PolkadotConnector, PACKAGE_NAME};
pub use error::{ConnectorError, Operation};
pub use logging::LogLevel;
pub use plugin::{
    ConsensusAlgorithmFamily, LedgerConnector, Plugin, PluginAspect, PluginRegistry,
    PluginWebService,
};
pub use provider::{PolkadotApi, WsProvider};
