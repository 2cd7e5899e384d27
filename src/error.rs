// Polkadot Connector - Error taxonomy
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations the connector declares for the host but does not carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    InstallWebServices,
    Transact,
    DeployContract,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::InstallWebServices => "install_web_services",
            Operation::Transact => "transact",
            Operation::DeployContract => "deploy_contract",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid provider endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Connection failed: {0}")]
    Connection(#[from] subxt::Error),

    #[error("Operation not implemented: {0}")]
    Unsupported(Operation),

    #[error("HTTP server task failed: {0}")]
    ServerShutdown(#[source] tokio::task::JoinError),

    #[error("Failed to read options: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse options: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConnectorError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ConnectorError::Configuration(_))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, ConnectorError::Connection(_) | ConnectorError::InvalidEndpoint { .. })
    }

    /// Returns the operation when this error marks an intentionally absent feature.
    pub fn unsupported_operation(&self) -> Option<Operation> {
        match self {
            ConnectorError::Unsupported(op) => Some(*op),
            _ => None,
        }
    }
}
