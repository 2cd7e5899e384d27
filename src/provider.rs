// Polkadot Connector - Provider handle
// Describes how to reach a node; the connection itself is opened by subxt

use subxt::{OnlineClient, PolkadotConfig};
use url::Url;

use crate::error::ConnectorError;

/// Connected client session returned by `create_api`.
pub type PolkadotApi = OnlineClient<PolkadotConfig>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsProvider {
    endpoint: String,
}

impl WsProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Plain `ws`/`http` endpoints, typically local dev nodes.
    pub fn is_insecure(&self) -> bool {
        Url::parse(&self.endpoint)
            .map(|url| matches!(url.scheme(), "ws" | "http"))
            .unwrap_or(false)
    }

    /// Open a client against this endpoint. No timeout and no retry.
    pub async fn connect(&self) -> Result<PolkadotApi, ConnectorError> {
        let url = Url::parse(&self.endpoint).map_err(|source| ConnectorError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        let client = if matches!(url.scheme(), "ws" | "http") {
            PolkadotApi::from_insecure_url(url.as_str()).await?
        } else {
            PolkadotApi::from_url(url.as_str()).await?
        };

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_classification() {
        assert!(WsProvider::new("ws://127.0.0.1:9944").is_insecure());
        assert!(!WsProvider::new("wss://rpc.polkadot.io").is_insecure());
        assert!(!WsProvider::new("garbage").is_insecure());
    }

    #[tokio::test]
    async fn test_connect_rejects_unparseable_endpoint() {
        let provider = WsProvider::new("not a url");
        let err = provider.connect().await.unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    #[ignore] // Requires Polkadot node
    async fn test_connect_public_endpoint() {
        let provider = WsProvider::new("wss://rpc.polkadot.io");
        assert!(provider.connect().await.is_ok());
    }
}
