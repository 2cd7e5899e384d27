// Polkadot Connector - Ledger connector plugin
// Binds one configured endpoint to a Substrate node and satisfies the host's plugin contracts

use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{Level, Span};

use crate::config::ConnectorOptions;
use crate::error::{ConnectorError, Operation};
use crate::logging::LogLevel;
use crate::model::{
    DeployContractInkRequest, DeployContractInkResponse, RunTransactionRequest,
    RunTransactionResponse,
};
use crate::plugin::{
    ConsensusAlgorithmFamily, HttpServerHandle, LedgerConnector, Plugin, PluginAspect,
    PluginRegistry, PluginWebService, WebServiceEndpoint,
};
use crate::provider::{PolkadotApi, WsProvider};

pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

pub struct PolkadotConnector {
    instance_id: String,
    provider: ArcSwap<WsProvider>,
    plugin_registry: Arc<PluginRegistry>,
    log_level: LogLevel,
    span: Span,
}

impl PolkadotConnector {
    pub fn new(options: ConnectorOptions) -> Result<Self, ConnectorError> {
        options.validate()?;

        let log_level = options.log_level();
        let ConnectorOptions {
            provider_endpoint,
            instance_id,
            plugin_registry,
            ..
        } = options;
        let plugin_registry = plugin_registry.ok_or_else(|| {
            ConnectorError::Configuration("plugin_registry is required".to_string())
        })?;

        let span = tracing::info_span!("polkadot_connector", instance_id = %instance_id);
        if Level::DEBUG <= log_level.as_level() {
            span.in_scope(|| {
                tracing::debug!(endpoint = %provider_endpoint, "Connector created");
            });
        }

        Ok(Self {
            instance_id,
            provider: ArcSwap::from_pointee(WsProvider::new(provider_endpoint)),
            plugin_registry,
            log_level,
            span,
        })
    }

    /// Replace the endpoint used by the next `create_api` call.
    pub fn set_provider(&self, endpoint: impl Into<String>) {
        let provider = WsProvider::new(endpoint);
        if self.logs_at(Level::DEBUG) {
            self.span.in_scope(|| {
                tracing::debug!(endpoint = %provider.endpoint(), "Provider replaced");
            });
        }
        self.provider.store(Arc::new(provider));
    }

    pub fn provider(&self) -> Arc<WsProvider> {
        self.provider.load_full()
    }

    /// Connect to the node behind the current provider.
    ///
    /// Errors from the RPC client come back unchanged; there is no timeout
    /// or retry.
    pub async fn create_api(&self) -> Result<PolkadotApi, ConnectorError> {
        let provider = self.provider.load_full();
        let api = provider.connect().await?;

        if self.logs_at(Level::INFO) {
            self.span.in_scope(|| {
                tracing::info!(endpoint = %provider.endpoint(), "Polkadot API created");
            });
        }
        Ok(api)
    }

    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Whether this instance emits events at `level`. The installed
    /// subscriber still filters on top of this.
    pub fn logs_at(&self, level: Level) -> bool {
        level <= self.log_level.as_level()
    }
}

impl Plugin for PolkadotConnector {
    fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn package_name(&self) -> &str {
        PACKAGE_NAME
    }

    fn aspect(&self) -> PluginAspect {
        PluginAspect::LedgerConnector
    }

    fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::InstallWebServices | Operation::Transact | Operation::DeployContract => {
                false
            }
        }
    }
}

#[async_trait]
impl PluginWebService for PolkadotConnector {
    async fn install_web_services(&self) -> Result<Vec<WebServiceEndpoint>, ConnectorError> {
        Err(ConnectorError::Unsupported(Operation::InstallWebServices))
    }

    fn http_server(&self) -> Option<&HttpServerHandle> {
        None
    }
}

#[async_trait]
impl LedgerConnector for PolkadotConnector {
    async fn consensus_algorithm_family(&self) -> ConsensusAlgorithmFamily {
        ConsensusAlgorithmFamily::Stake
    }

    async fn transact(
        &self,
        _request: RunTransactionRequest,
    ) -> Result<RunTransactionResponse, ConnectorError> {
        Err(ConnectorError::Unsupported(Operation::Transact))
    }

    async fn deploy_contract(
        &self,
        _request: DeployContractInkRequest,
    ) -> Result<DeployContractInkResponse, ConnectorError> {
        Err(ConnectorError::Unsupported(Operation::DeployContract))
    }
}

impl std::fmt::Debug for PolkadotConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolkadotConnector")
            .field("instance_id", &self.instance_id)
            .field("provider", &self.provider.load().endpoint())
            .field("log_level", &self.log_level)
            .finish()
    }
}
