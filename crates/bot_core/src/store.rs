//! Conversation state store.
//!
//! Contract: a `save` issued at the end of a turn is visible to the next
//! `load` for the same conversation. The hosting layer serializes turns per
//! conversation, so the store only needs to guard its own map.

use std::collections::HashMap;

use color_eyre::Result;
use tokio::sync::Mutex;

use crate::game::GameState;

/// Durable per-conversation game state, keyed by conversation id.
pub trait StateStore {
    fn load(
        &self,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<GameState>> + Send;

    fn save(
        &self,
        conversation_id: &str,
        state: &GameState,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn clear(
        &self,
        conversation_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// In-memory store. Loading an unknown conversation yields the default
/// (no game in progress) state.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    inner: Mutex<HashMap<String, GameState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    async fn load(&self, conversation_id: &str) -> Result<GameState> {
        let map = self.inner.lock().await;
        Ok(map.get(conversation_id).cloned().unwrap_or_default())
    }

    async fn save(&self, conversation_id: &str, state: &GameState) -> Result<()> {
        let mut map = self.inner.lock().await;
        map.insert(conversation_id.to_string(), state.clone());
        Ok(())
    }

    async fn clear(&self, conversation_id: &str) -> Result<()> {
        let mut map = self.inner.lock().await;
        map.remove(conversation_id);
        Ok(())
    }
}
