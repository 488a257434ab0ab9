//! Session store: create, update and read over a [`SessionRepository`].

use std::sync::Arc;

use crate::persistence::SessionRepository;
use crate::persistence::providers::InMemoryProvider;
use crate::vocabulary::Vocabulary;

use super::error::SessionError;
use super::record::{GameSession, GuessEvent, TallyOutcome, UnknownWordPolicy};

/// Shared handle to all player sessions.
///
/// Cloning is cheap; clones share the same repository.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    repository: Arc<dyn SessionRepository>,
    vocabulary: Vocabulary,
    unknown_words: UnknownWordPolicy,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Vocabulary::builtin(), UnknownWordPolicy::default())
    }
}

impl SessionStore {
    /// Create an in-memory store.
    #[must_use]
    pub fn new(vocabulary: Vocabulary, unknown_words: UnknownWordPolicy) -> Self {
        Self::with_repository(Arc::new(InMemoryProvider::new()), vocabulary, unknown_words)
    }

    /// Create a store over an explicit repository.
    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn SessionRepository>,
        vocabulary: Vocabulary,
        unknown_words: UnknownWordPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                repository,
                vocabulary,
                unknown_words,
            }),
        }
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.inner.vocabulary
    }

    /// Start a fresh session for `player_id`, discarding any previous one.
    pub async fn create(&self, player_id: &str) -> Result<GameSession, SessionError> {
        let session = GameSession::new(player_id, &self.inner.vocabulary);
        self.inner.repository.save_session(session.clone()).await?;
        let sessions = self.len().await?;

        tracing::info!(
            name: "session.created",
            player_id = %player_id,
            vocabulary_size = self.inner.vocabulary.len(),
            sessions,
            "Game session created"
        );
        Ok(session)
    }

    /// Apply a guess event to an existing session.
    ///
    /// Fails with [`SessionError::NotFound`] without side effects when the
    /// player has no session.
    pub async fn update(
        &self,
        player_id: &str,
        event: &GuessEvent,
    ) -> Result<GameSession, SessionError> {
        let policy = self.inner.unknown_words;
        let mut outcome = TallyOutcome::NoWord;

        let updated = self
            .inner
            .repository
            .modify_session(player_id, &mut |session| {
                outcome = session.apply(event, policy);
            })
            .await?;

        let Some(session) = updated else {
            tracing::warn!(player_id = %player_id, "Update for unknown game session");
            return Err(SessionError::not_found(Some(player_id)));
        };

        if outcome == TallyOutcome::Ignored {
            tracing::debug!(
                player_id = %player_id,
                word = ?event.word,
                "Word not in vocabulary, tally unchanged"
            );
        }
        tracing::info!(
            name: "session.updated",
            player_id = %player_id,
            score = session.score,
            meat_count = session.meat_count,
            is_correct = event.is_correct,
            "Game session updated"
        );
        Ok(session)
    }

    /// Current snapshot of the session. An absent or empty id is NotFound.
    pub async fn read(&self, player_id: Option<&str>) -> Result<GameSession, SessionError> {
        let Some(id) = player_id.filter(|id| !id.is_empty()) else {
            tracing::warn!("Read without player id");
            return Err(SessionError::not_found(None));
        };

        match self.inner.repository.load_session(id).await? {
            Some(session) => Ok(session),
            None => {
                tracing::warn!(player_id = %id, "Read for unknown game session");
                Err(SessionError::not_found(Some(id)))
            }
        }
    }

    /// Number of active sessions.
    pub async fn len(&self) -> Result<usize, SessionError> {
        Ok(self.inner.repository.count_sessions().await?)
    }

    /// Whether no player has a session yet.
    pub async fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Vocabulary::new(["cat", "dog"]), UnknownWordPolicy::Ignore)
    }

    fn guess(score: i64, meat: i64, word: &str, is_correct: bool) -> GuessEvent {
        GuessEvent {
            score_delta: score,
            meat_delta: meat,
            word: Some(word.to_string()),
            is_correct,
        }
    }

    #[tokio::test]
    async fn test_read_before_create_is_not_found() {
        let store = store();
        assert!(matches!(
            store.read(Some("alice")).await,
            Err(SessionError::NotFound { .. })
        ));
        assert!(matches!(
            store.read(None).await,
            Err(SessionError::NotFound { player_id: None })
        ));
        assert!(matches!(
            store.read(Some("")).await,
            Err(SessionError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_len_counts_distinct_players() {
        let store = store();
        assert!(store.is_empty().await.unwrap());

        store.create("alice").await.unwrap();
        store.create("bob").await.unwrap();
        store.create("alice").await.unwrap();

        assert!(!store.is_empty().await.unwrap());
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = store();
        let created = store.create("alice").await.unwrap();
        assert_eq!(store.read(Some("alice")).await.unwrap(), created);

        let after = store.update("alice", &guess(5, 2, "cat", true)).await.unwrap();
        assert_eq!(after.score, 5);
        assert_eq!(after.meat_count, 2);
        assert_eq!(after.correct_words["cat"], 1);

        let after = store.update("alice", &guess(-1, 0, "cat", false)).await.unwrap();
        assert_eq!(after.score, 4);
        assert_eq!(after.meat_count, 2);
        assert_eq!(after.incorrect_words["cat"], 1);
        assert_eq!(after.correct_words["cat"], 1);

        assert_eq!(store.read(Some("alice")).await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_update_unknown_player_leaves_store_unchanged() {
        let store = store();
        store.create("alice").await.unwrap();

        let err = store.update("bob", &guess(1, 1, "cat", true)).await;
        assert!(matches!(
            err,
            Err(SessionError::NotFound { player_id: Some(ref id) }) if id == "bob"
        ));
        assert_eq!(store.len().await.unwrap(), 1);
        assert!(store.read(Some("bob")).await.is_err());
    }

    #[tokio::test]
    async fn test_create_twice_resets() {
        let store = store();
        store.create("alice").await.unwrap();
        store.update("alice", &guess(9, 3, "dog", true)).await.unwrap();

        let reset = store.create("alice").await.unwrap();
        assert_eq!(reset.score, 0);
        assert_eq!(reset.meat_count, 0);
        assert_eq!(reset.correct_words["dog"], 0);
        assert_eq!(store.read(Some("alice")).await.unwrap(), reset);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scores_sum_deltas() {
        let store = store();
        store.create("p").await.unwrap();
        let deltas = [(3, 1), (-7, 2), (11, -4), (0, 0), (2, 5)];
        for (s, m) in deltas {
            store.update("p", &guess(s, m, "cat", s > 0)).await.unwrap();
        }
        let session = store.read(Some("p")).await.unwrap();
        assert_eq!(session.score, deltas.iter().map(|d| d.0).sum::<i64>());
        assert_eq!(session.meat_count, deltas.iter().map(|d| d.1).sum::<i64>());
    }

    #[tokio::test]
    async fn test_track_policy_widens_session_vocabulary() {
        let store = SessionStore::new(Vocabulary::new(["cat"]), UnknownWordPolicy::Track);
        store.create("alice").await.unwrap();
        let session = store
            .update("alice", &guess(0, 0, "owl", true))
            .await
            .unwrap();
        assert_eq!(session.correct_words["owl"], 1);
        assert!(!store.vocabulary().contains("owl"));

        let other = store.create("bob").await.unwrap();
        assert!(!other.correct_words.contains_key("owl"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_updates_are_serialized() {
        let store = store();
        store.create("alice").await.unwrap();

        let tasks: Vec<_> = (0..100)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .update("alice", &guess(1, 2, "dog", i % 2 == 0))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let session = store.read(Some("alice")).await.unwrap();
        assert_eq!(session.score, 100);
        assert_eq!(session.meat_count, 200);
        assert_eq!(session.correct_words["dog"], 50);
        assert_eq!(session.incorrect_words["dog"], 50);
    }
}
