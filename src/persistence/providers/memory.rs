use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::persistence::SessionRepository;
use crate::session::GameSession;

/// Process-local session table.
///
/// The outer lock only guards the id → entry map. Each entry carries its own
/// mutex, so updates for one player serialize without blocking other players.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    sessions: RwLock<HashMap<String, Arc<Mutex<GameSession>>>>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, player_id: &str) -> Option<Arc<Mutex<GameSession>>> {
        self.sessions.read().await.get(player_id).map(Arc::clone)
    }
}

#[async_trait]
impl SessionRepository for InMemoryProvider {
    async fn save_session(&self, session: GameSession) -> Result<()> {
        let id = session.player_id.clone();
        let mut guard = self.sessions.write().await;
        guard.insert(id, Arc::new(Mutex::new(session)));
        Ok(())
    }

    async fn load_session(&self, player_id: &str) -> Result<Option<GameSession>> {
        let Some(entry) = self.entry(player_id).await else {
            return Ok(None);
        };
        let session = entry.lock().await.clone();
        Ok(Some(session))
    }

    async fn modify_session(
        &self,
        player_id: &str,
        apply: &mut (dyn for<'s> FnMut(&'s mut GameSession) + Send),
    ) -> Result<Option<GameSession>> {
        let Some(entry) = self.entry(player_id).await else {
            return Ok(None);
        };
        let mut guard = entry.lock().await;
        apply(&mut *guard);
        Ok(Some(guard.clone()))
    }

    async fn count_sessions(&self) -> Result<usize> {
        Ok(self.sessions.read().await.len())
    }
}
