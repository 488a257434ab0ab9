//! Per-player game record and the rule for applying a guess to it.

use serde::{Deserialize, Serialize};

use crate::vocabulary::{Vocabulary, WordTally};

/// What to do with a guessed word that is not in the vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownWordPolicy {
    /// Leave the tallies untouched. Score and meat deltas still apply.
    #[default]
    Ignore,
    /// Add the word to this session's tally and count it.
    Track,
}

/// Accumulated state for a single player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub player_id: String,
    pub score: i64,
    pub meat_count: i64,
    pub correct_words: WordTally,
    pub incorrect_words: WordTally,
}

/// One update event sent by the game client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessEvent {
    pub score_delta: i64,
    pub meat_delta: i64,
    pub word: Option<String>,
    pub is_correct: bool,
}

/// How the word part of a [`GuessEvent`] was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyOutcome {
    Counted,
    /// The word was unknown and the policy is [`UnknownWordPolicy::Ignore`].
    Ignored,
    /// The event carried no word.
    NoWord,
}

impl GameSession {
    /// A zeroed session with every vocabulary word at 0 in both tallies.
    pub fn new(player_id: impl Into<String>, vocabulary: &Vocabulary) -> Self {
        Self {
            player_id: player_id.into(),
            score: 0,
            meat_count: 0,
            correct_words: vocabulary.blank_tally(),
            incorrect_words: vocabulary.blank_tally(),
        }
    }

    /// Apply the deltas, then count the word against the tally chosen by
    /// `is_correct`.
    pub fn apply(&mut self, event: &GuessEvent, policy: UnknownWordPolicy) -> TallyOutcome {
        self.score = self.score.saturating_add(event.score_delta);
        self.meat_count = self.meat_count.saturating_add(event.meat_delta);

        let Some(word) = event.word.as_deref() else {
            return TallyOutcome::NoWord;
        };

        let tally = if event.is_correct {
            &mut self.correct_words
        } else {
            &mut self.incorrect_words
        };

        if let Some(count) = tally.get_mut(word) {
            *count += 1;
            return TallyOutcome::Counted;
        }

        match policy {
            UnknownWordPolicy::Track => {
                tally.insert(word.to_string(), 1);
                TallyOutcome::Counted
            }
            UnknownWordPolicy::Ignore => TallyOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["cat", "dog"])
    }

    fn guess(score: i64, meat: i64, word: &str, is_correct: bool) -> GuessEvent {
        GuessEvent {
            score_delta: score,
            meat_delta: meat,
            word: Some(word.to_string()),
            is_correct,
        }
    }

    #[test]
    fn test_new_session_is_zeroed() {
        let session = GameSession::new("alice", &vocab());
        assert_eq!(session.player_id, "alice");
        assert_eq!(session.score, 0);
        assert_eq!(session.meat_count, 0);
        assert_eq!(session.correct_words, vocab().blank_tally());
        assert_eq!(session.incorrect_words, vocab().blank_tally());
    }

    #[test]
    fn test_correct_guess_only_touches_correct_tally() {
        let mut session = GameSession::new("alice", &vocab());
        let outcome = session.apply(&guess(5, 2, "cat", true), UnknownWordPolicy::Ignore);

        assert_eq!(outcome, TallyOutcome::Counted);
        assert_eq!(session.score, 5);
        assert_eq!(session.meat_count, 2);
        assert_eq!(session.correct_words["cat"], 1);
        assert_eq!(session.correct_words["dog"], 0);
        assert_eq!(session.incorrect_words, vocab().blank_tally());
    }

    #[test]
    fn test_incorrect_guess_only_touches_incorrect_tally() {
        let mut session = GameSession::new("alice", &vocab());
        session.apply(&guess(5, 2, "cat", true), UnknownWordPolicy::Ignore);
        session.apply(&guess(-1, 0, "cat", false), UnknownWordPolicy::Ignore);

        assert_eq!(session.score, 4);
        assert_eq!(session.meat_count, 2);
        assert_eq!(session.correct_words["cat"], 1);
        assert_eq!(session.incorrect_words["cat"], 1);
    }

    #[test]
    fn test_negative_deltas_are_not_clamped() {
        let mut session = GameSession::new("bob", &vocab());
        session.apply(&guess(-3, -7, "dog", false), UnknownWordPolicy::Ignore);
        assert_eq!(session.score, -3);
        assert_eq!(session.meat_count, -7);
    }

    #[test]
    fn test_deltas_saturate() {
        let mut session = GameSession::new("bob", &vocab());
        session.score = i64::MAX - 1;
        session.apply(&guess(10, 0, "dog", true), UnknownWordPolicy::Ignore);
        assert_eq!(session.score, i64::MAX);
    }

    #[test]
    fn test_unknown_word_ignored() {
        let mut session = GameSession::new("carol", &vocab());
        let outcome = session.apply(&guess(1, 1, "zebra", true), UnknownWordPolicy::Ignore);

        assert_eq!(outcome, TallyOutcome::Ignored);
        assert_eq!(session.score, 1);
        assert_eq!(session.meat_count, 1);
        assert!(!session.correct_words.contains_key("zebra"));
        assert_eq!(session.correct_words.len(), 2);
    }

    #[test]
    fn test_unknown_word_tracked() {
        let mut session = GameSession::new("carol", &vocab());
        session.apply(&guess(0, 0, "zebra", false), UnknownWordPolicy::Track);
        let outcome = session.apply(&guess(0, 0, "zebra", false), UnknownWordPolicy::Track);

        assert_eq!(outcome, TallyOutcome::Counted);
        assert_eq!(session.incorrect_words["zebra"], 2);
        assert!(!session.correct_words.contains_key("zebra"));
    }

    #[test]
    fn test_missing_word_applies_deltas_only() {
        let mut session = GameSession::new("dave", &vocab());
        let event = GuessEvent {
            score_delta: 3,
            meat_delta: 1,
            word: None,
            is_correct: true,
        };
        assert_eq!(
            session.apply(&event, UnknownWordPolicy::Track),
            TallyOutcome::NoWord
        );
        assert_eq!(session.score, 3);
        assert_eq!(session.correct_words, vocab().blank_tally());
    }

    #[test]
    fn test_serializes_camel_case() {
        let session = GameSession::new("alice", &Vocabulary::new(["cat"]));
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "playerId": "alice",
                "score": 0,
                "meatCount": 0,
                "correctWords": { "cat": 0 },
                "incorrectWords": { "cat": 0 }
            })
        );
    }
}
