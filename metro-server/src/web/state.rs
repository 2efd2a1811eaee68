//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::network::{LoadError, Network, NetworkConfig, load_network};

/// Shared handle to the current network.
///
/// Queries take a snapshot (`Arc<Network>`) and work on it without holding
/// the lock. A refresh builds a whole new network and swaps the reference,
/// so a query in flight keeps seeing the network it started with.
#[derive(Clone)]
pub struct NetworkHandle {
    inner: Arc<RwLock<Arc<Network>>>,
}

impl NetworkHandle {
    /// Wrap a freshly built network.
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
        }
    }

    /// The current network.
    pub async fn snapshot(&self) -> Arc<Network> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Replace the network, returning the previous one.
    pub async fn replace(&self, network: Arc<Network>) -> Arc<Network> {
        let mut guard = self.inner.write().await;
        std::mem::replace(&mut *guard, network)
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The network being served
    pub network: NetworkHandle,

    /// Where the network is reloaded from
    pub config: Arc<NetworkConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, config: NetworkConfig) -> Self {
        Self {
            network: NetworkHandle::new(network),
            config: Arc::new(config),
        }
    }

    /// Rebuild the network from the configured files and swap it in.
    ///
    /// File reading and parsing run on the blocking pool. On failure the
    /// current network stays in place. Returns the network this call built.
    pub async fn reload(&self) -> Result<Arc<Network>, ReloadError> {
        let config = Arc::clone(&self.config);
        let network = tokio::task::spawn_blocking(move || load_network(&config)).await??;
        let network = Arc::new(network);
        self.network.replace(Arc::clone(&network)).await;
        Ok(network)
    }
}

/// Errors from reloading the served network.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The loading task panicked or was cancelled
    #[error("reload task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
