//! Per-player game session management.
//!
//! Sessions live in a [`SessionStore`], which is constructed once at startup
//! and handed to request handlers through axum state. Each player id maps to
//! exactly one [`GameSession`]; creating again resets it.
//!
//! # Architecture
//!
//! - [`GameSession`]: score, meat count and per-word guess tallies
//! - [`SessionStore`]: create / update / read over a pluggable repository
//! - [`SessionError`]: `NotFound`, or a storage failure
//!
//! # Example
//!
//! ```rust
//! use wordgame_sessions::session::{GuessEvent, SessionStore};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = SessionStore::default();
//! store.create("alice").await.unwrap();
//!
//! let event = GuessEvent {
//!     score_delta: 5,
//!     meat_delta: 2,
//!     word: Some("cat".to_string()),
//!     is_correct: true,
//! };
//! let session = store.update("alice", &event).await.unwrap();
//! assert_eq!(session.score, 5);
//! assert_eq!(session.correct_words["cat"], 1);
//! # }
//! ```

mod error;
mod record;
mod store;

pub use error::SessionError;
pub use record::{GameSession, GuessEvent, TallyOutcome, UnknownWordPolicy};
pub use store::SessionStore;
