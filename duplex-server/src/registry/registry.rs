use crate::error::RelayError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use duplex_core::{ConnectionId, SignalingEnvelope};
use std::sync::Arc;
use tokio::sync::mpsc;

pub type EnvelopeSender = mpsc::UnboundedSender<SignalingEnvelope>;

/// Live connections, keyed by id. An id without an entry is unreachable.
///
/// Insert, remove and lookup each lock only the shard holding the key, so a
/// route never observes a half-removed entry.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<DashMap<ConnectionId, EnvelopeSender>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: ConnectionId, tx: EnvelopeSender) -> Result<(), RelayError> {
        match self.entries.entry(id) {
            Entry::Occupied(entry) => Err(RelayError::IdCollision(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(tx);
                Ok(())
            }
        }
    }

    /// Returns whether an entry was present. Removing an absent id is a no-op.
    pub fn remove(&self, id: &ConnectionId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Runs `f` against the target's channel while the entry is held.
    pub(crate) fn with_sender<R>(
        &self,
        id: &ConnectionId,
        f: impl FnOnce(&EnvelopeSender) -> R,
    ) -> Option<R> {
        self.entries.get(id).map(|entry| f(entry.value()))
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<ConnectionId> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }
}
