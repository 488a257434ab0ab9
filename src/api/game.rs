//! `/api/game` handlers: create (POST), update (PUT) and read (GET).

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::session::{GameSession, GuessEvent, SessionError};

/// Request body for session creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Player key. A fresh UUID is assigned when absent or empty.
    #[serde(default)]
    pub player_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub message: String,
    /// The key the session is stored under.
    pub session_id: String,
}

/// Request body for a guess update. Missing or `null` numbers count as zero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub meat_count: Option<i64>,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
}

impl UpdateSessionRequest {
    pub fn event(&self) -> GuessEvent {
        GuessEvent {
            score_delta: self.score.unwrap_or_default(),
            meat_delta: self.meat_count.unwrap_or_default(),
            word: self.word.clone(),
            is_correct: self.is_correct.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSessionResponse {
    pub message: String,
    pub session: GameSession,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadSessionQuery {
    #[serde(default)]
    pub player_id: Option<String>,
}

/// POST /api/game - Start (or restart) a player's session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<CreateSessionResponse>, SessionError> {
    let player_id = match req.player_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            let id = Uuid::new_v4().to_string();
            tracing::debug!(player_id = %id, "No player id supplied, assigned one");
            id
        }
    };

    let session = state.sessions.create(&player_id).await?;

    Ok(Json(CreateSessionResponse {
        message: "Game session created".to_string(),
        session_id: session.player_id,
    }))
}

/// PUT /api/game - Apply score, meat and word-guess deltas.
pub async fn update_session(
    State(state): State<AppState>,
    Json(req): Json<UpdateSessionRequest>,
) -> Result<Json<UpdateSessionResponse>, SessionError> {
    let Some(player_id) = req.player_id.as_deref() else {
        tracing::warn!("Update without player id");
        return Err(SessionError::NotFound { player_id: None });
    };

    let session = state.sessions.update(player_id, &req.event()).await?;

    Ok(Json(UpdateSessionResponse {
        message: "Game session updated".to_string(),
        session,
    }))
}

/// GET /api/game?playerId= - Current session state.
pub async fn read_session(
    State(state): State<AppState>,
    Query(query): Query<ReadSessionQuery>,
) -> Result<Json<GameSession>, SessionError> {
    let session = state.sessions.read(query.player_id.as_deref()).await?;
    Ok(Json(session))
}
