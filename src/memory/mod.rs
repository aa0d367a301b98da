pub mod entry;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

pub use entry::{EntryContent, MemoryEntry, Preference, Role};

/// Append-only conversational memory keyed by session id.
///
/// Each session owns its own lock, so appends for one session never block
/// another. Sessions are created on first append and live as long as the
/// store; nothing is evicted or persisted.
#[derive(Default)]
pub struct SessionMemory {
    sessions: RwLock<HashMap<String, Arc<Mutex<Vec<MemoryEntry>>>>>,
}

impl SessionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the session's entries in append order. Unknown sessions
    /// yield an empty list.
    pub async fn history(&self, session_id: &str) -> Vec<MemoryEntry> {
        match self.existing(session_id).await {
            Some(log) => log.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// The last `n` entries of the session, oldest first.
    pub async fn recent(&self, session_id: &str, n: usize) -> Vec<MemoryEntry> {
        match self.existing(session_id).await {
            Some(log) => {
                let entries = log.lock().await;
                let count = n.min(entries.len());
                entries[entries.len() - count..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Append an entry, creating the session if needed.
    pub async fn append(&self, session_id: &str, entry: MemoryEntry) {
        let log = self.get_or_create(session_id).await;
        let mut entries = log.lock().await;
        debug!(session_id, role = ?entry.role, position = entries.len(), "memory append");
        entries.push(entry);
    }

    /// Number of sessions that have at least one entry.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn existing(&self, session_id: &str) -> Option<Arc<Mutex<Vec<MemoryEntry>>>> {
        self.sessions.read().await.get(session_id).map(Arc::clone)
    }

    async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<Vec<MemoryEntry>>> {
        if let Some(log) = self.existing(session_id).await {
            return log;
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(session_id.to_string()).or_default())
    }
}
