// Plugin Registry - Directory of plugin instances known to the host
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{Plugin, PluginAspect};

pub struct PluginRegistry {
    plugins: Arc<RwLock<Vec<Arc<dyn Plugin>>>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a plugin. An existing entry with the same instance id is replaced.
    pub async fn add(&self, plugin: Arc<dyn Plugin>) {
        let mut plugins = self.plugins.write().await;
        plugins.retain(|p| p.instance_id() != plugin.instance_id());
        plugins.push(plugin);
    }

    pub async fn get(&self, instance_id: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.iter().find(|p| p.instance_id() == instance_id).cloned()
    }

    pub async fn find_by_aspect(&self, aspect: PluginAspect) -> Vec<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.iter().filter(|p| p.aspect() == aspect).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.plugins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plugins.read().await.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry").finish_non_exhaustive()
    }
}
