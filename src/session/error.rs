/// Errors returned by [`SessionStore`](super::SessionStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No active session exists for the player id.
    #[error("Game session not found")]
    NotFound { player_id: Option<String> },

    /// The backing repository failed.
    #[error("session storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl SessionError {
    pub(crate) fn not_found(player_id: Option<&str>) -> Self {
        Self::NotFound {
            player_id: player_id.map(ToString::to_string),
        }
    }
}
