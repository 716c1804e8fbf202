use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::registry::Registry;
use duplex_core::{ConnectionId, IceServerConfig, SignalingEnvelope};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Delivered,
    /// Target unknown or its connection is going away. Never reported to the
    /// sender.
    Dropped,
}

/// A registered endpoint: its id and the ordered stream of envelopes routed
/// to it.
pub struct Connection {
    pub id: ConnectionId,
    pub inbox: mpsc::UnboundedReceiver<SignalingEnvelope>,
}

struct RelayInner {
    registry: Registry,
    ice_servers: Vec<IceServerConfig>,
}

/// Forwards signaling envelopes between live connections. Holds no call
/// state: it knows who is reachable, nothing more.
#[derive(Clone)]
pub struct Relay {
    inner: Arc<RelayInner>,
}

impl Relay {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                registry: Registry::new(),
                ice_servers,
            }),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.ice_servers.clone())
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn connect(&self) -> Result<Connection, RelayError> {
        self.connect_as(ConnectionId::new())
    }

    pub fn connect_as(&self, id: ConnectionId) -> Result<Connection, RelayError> {
        let (tx, inbox) = mpsc::unbounded_channel();
        self.inner.registry.insert(id.clone(), tx)?;
        info!("Connection registered: {}", id);
        Ok(Connection { id, inbox })
    }

    pub fn disconnect(&self, id: &ConnectionId) {
        if self.inner.registry.remove(id) {
            info!("Connection removed: {}", id);
        } else {
            debug!("Disconnect for unknown connection {} ignored", id);
        }
    }

    /// Delivers `envelope` verbatim to its target's inbox. Per-target order
    /// follows the order of `route` calls.
    pub fn route(&self, envelope: SignalingEnvelope) -> RouteOutcome {
        let target = envelope.target().clone();

        let sent = self
            .inner
            .registry
            .with_sender(&target, move |tx| tx.send(envelope).is_ok());

        match sent {
            Some(true) => RouteOutcome::Delivered,
            Some(false) => {
                debug!("Inbox of {} already closed, envelope dropped", target);
                RouteOutcome::Dropped
            }
            None => {
                debug!("No connection {}, envelope dropped", target);
                RouteOutcome::Dropped
            }
        }
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::from_config(&RelayConfig::default())
    }
}
