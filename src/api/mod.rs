pub mod error;
pub mod game;

use axum::{Router, routing::post};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/game",
        post(game::create_session)
            .put(game::update_session)
            .get(game::read_session),
    )
}
