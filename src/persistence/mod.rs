use crate::session::GameSession;
use anyhow::Result;
use async_trait::async_trait;

pub mod providers;

/// Storage seam behind [`SessionStore`](crate::session::SessionStore).
///
/// Implementations must make `modify_session` atomic per player id so that
/// concurrent updates to one player never lose writes.
#[async_trait]
pub trait SessionRepository: Send + Sync + std::fmt::Debug {
    /// Insert a session, replacing any existing one for the same player id.
    async fn save_session(&self, session: GameSession) -> Result<()>;

    /// Snapshot of the session for `player_id`, if any.
    async fn load_session(&self, player_id: &str) -> Result<Option<GameSession>>;

    /// Run `apply` against the stored session under exclusive access and
    /// return the post-image. Returns `None` without calling `apply` when the
    /// session does not exist.
    async fn modify_session(
        &self,
        player_id: &str,
        apply: &mut (dyn for<'s> FnMut(&'s mut GameSession) + Send),
    ) -> Result<Option<GameSession>>;

    async fn count_sessions(&self) -> Result<usize>;
}
