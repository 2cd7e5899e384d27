// Polkadot Connector - Plugin capability contracts
// Each host capability is its own trait so a plugin only implements what it offers

pub mod registry;
pub mod web_service;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ConnectorError, Operation};
use crate::model::{
    DeployContractInkRequest, DeployContractInkResponse, RunTransactionRequest,
    RunTransactionResponse,
};

pub use registry::PluginRegistry;
pub use web_service::{HttpServerHandle, WebServiceEndpoint};

/// Category a plugin is filed under in the host registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginAspect {
    Consortium,
    Keychain,
    LedgerConnector,
}

/// Coarse classification of a ledger's agreement mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsensusAlgorithmFamily {
    Authority,
    Stake,
    Work,
}

/// Identity every plugin exposes to the host.
pub trait Plugin: Send + Sync {
    fn instance_id(&self) -> &str;
    fn package_name(&self) -> &str;
    fn aspect(&self) -> PluginAspect;

    /// Whether `op` does real work on this plugin rather than returning
    /// `ConnectorError::Unsupported`.
    fn supports(&self, _op: Operation) -> bool {
        false
    }
}

#[async_trait]
pub trait PluginWebService: Plugin {
    async fn install_web_services(&self) -> Result<Vec<WebServiceEndpoint>, ConnectorError>;

    fn http_server(&self) -> Option<&HttpServerHandle>;

    async fn shutdown(&self) -> Result<(), ConnectorError> {
        match self.http_server() {
            Some(server) => server.close().await,
            None => Ok(()),
        }
    }
}

#[async_trait]
pub trait LedgerConnector: Plugin {
    async fn consensus_algorithm_family(&self) -> ConsensusAlgorithmFamily;

    async fn transact(
        &self,
        request: RunTransactionRequest,
    ) -> Result<RunTransactionResponse, ConnectorError>;

    async fn deploy_contract(
        &self,
        request: DeployContractInkRequest,
    ) -> Result<DeployContractInkResponse, ConnectorError>;
}
