// Web-service types shared by plugins that expose HTTP endpoints
use serde::{Deserialize, Serialize};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::error::ConnectorError;

/// Route a plugin registers with the host's HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebServiceEndpoint {
    pub path: String,
    pub verb: String,
    pub operation_id: String,
}

/// Running HTTP server owned by a plugin.
///
/// Closing signals the server task and waits for it to finish; later calls
/// are no-ops.
pub struct HttpServerHandle {
    inner: Mutex<Option<(oneshot::Sender<()>, JoinHandle<()>)>>,
}

impl HttpServerHandle {
    pub fn new(shutdown: oneshot::Sender<()>, task: JoinHandle<()>) -> Self {
        Self {
            inner: Mutex::new(Some((shutdown, task))),
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.is_some()
    }

    pub async fn close(&self) -> Result<(), ConnectorError> {
        let Some((shutdown, task)) = self.inner.lock().await.take() else {
            return Ok(());
        };

        // Receiver gone means the task already stopped on its own.
        let _ = shutdown.send(());
        task.await.map_err(ConnectorError::ServerShutdown)
    }
}

impl std::fmt::Debug for HttpServerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServerHandle").finish_non_exhaustive()
    }
}
