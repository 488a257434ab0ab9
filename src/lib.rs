//! Word-game session tracker
//!
//! A small axum service that keeps one in-memory session per player and
//! updates it from score and word-guess events.
//!
//! # Architecture
//!
//! - **Server**: Axum HTTP server exposing `/api/game` (POST / PUT / GET)
//! - **Sessions**: per-player records with atomic per-player updates
//! - **Vocabulary**: fixed word set seeding each session's tallies
//!
//! # Modules
//!
//! - [`api`]: HTTP handlers and request/response DTOs
//! - [`config`]: layered configuration (defaults, file, env, CLI)
//! - [`persistence`]: storage seam and the in-memory provider
//! - [`session`]: session records and the session store
//! - [`vocabulary`]: word list loading and zeroed tallies

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod persistence;
pub mod security;
pub mod server;
pub mod session;
pub mod vocabulary;

use crate::config::AppConfig;
use crate::security::rate_limit::SimpleRateLimiter;

use session::SessionStore;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session store for all players.
    pub sessions: SessionStore,
    /// Global Rate Limiter
    pub rate_limiter: Arc<SimpleRateLimiter>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
