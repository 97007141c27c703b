//! Shared types used across the Shibboleth crates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::BATCH_CLOSING_ROUND;

/// Why a raw token cannot become a [`Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordFault {
    /// The token contains whitespace.
    Whitespace,
    /// The token is empty or not pure lowercase ASCII letters.
    NotLowercaseAlpha,
}

/// A vocabulary word — the node identity of the affinity graph.
///
/// Always lowercase ASCII letters (`[a-z]+`), enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Validate a token as-is. Rejects anything that is not `[a-z]+`.
    pub fn new(token: impl Into<String>) -> Result<Self, WordFault> {
        let token = token.into();
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(WordFault::NotLowercaseAlpha);
        }
        Ok(Self(token))
    }

    /// Validate a raw response: whitespace anywhere is malformed input,
    /// then the token is lowercased and must be pure ASCII letters.
    pub fn from_response(raw: &str) -> Result<Self, WordFault> {
        if raw.chars().any(char::is_whitespace) {
            return Err(WordFault::Whitespace);
        }
        Self::new(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The word set presented to a responder in one round.
///
/// An ordered sequence of distinct words. A session remembers exactly one
/// outstanding challenge; issuing a new one overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Challenge(Vec<Word>);

impl Challenge {
    pub fn new(words: Vec<Word>) -> Self {
        Self(words)
    }

    pub fn words(&self) -> &[Word] {
        &self.0
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(word.as_str())?;
        }
        Ok(())
    }
}

/// The classification a judgement produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Human,
    Machine,
}

impl Verdict {
    pub fn is_human(self) -> bool {
        matches!(self, Verdict::Human)
    }
}

/// The session-facing outcome of judging one response.
///
/// Input-validation outcomes are statuses, not errors: the caller reports
/// them and the session carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    /// The raw response contained whitespace.
    MalformedInput,
    /// Empty or not pure lowercase ASCII letters after normalization.
    EmptyOrNonAlpha,
    /// The response is itself a member of the active challenge.
    ChallengeMember,
    /// The response could not be scored yet; its adaptation is deferred.
    NeedAnotherResponse,
    /// Judged human-like.
    Pass,
    /// Judged machine-like.
    Fail,
}

impl Judgement {
    /// Whether this outcome resolved the challenge with a verdict.
    pub fn is_final(self) -> bool {
        matches!(self, Judgement::Pass | Judgement::Fail)
    }
}

/// A response whose adaptation waits for a later concrete verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredRecord {
    pub responder: Word,
    pub challenge: Challenge,
}

/// Durable state of the batched (3-round) adaptation protocol.
///
/// `round` cycles 0..=2; a verdict is computed only when `round` equals
/// `designated` and surfaced only when the batch closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchState {
    pub round: u8,
    pub designated: u8,
    #[serde(default)]
    pub stored_verdict: Option<Verdict>,
}

impl BatchState {
    /// Start of a new batch with a freshly drawn designated round.
    pub fn fresh(designated: u8) -> Self {
        Self {
            round: 0,
            designated,
            stored_verdict: None,
        }
    }

    pub fn is_designated(&self) -> bool {
        self.round == self.designated
    }

    pub fn is_closing(&self) -> bool {
        self.round == BATCH_CLOSING_ROUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_accepts_lowercase_alpha() {
        assert_eq!(Word::new("cat").unwrap().as_str(), "cat");
    }

    #[test]
    fn word_rejects_non_alpha() {
        assert_eq!(Word::new(""), Err(WordFault::NotLowercaseAlpha));
        assert_eq!(Word::new("ab3"), Err(WordFault::NotLowercaseAlpha));
        assert_eq!(Word::new("Cat"), Err(WordFault::NotLowercaseAlpha));
        assert_eq!(Word::new("éléphant"), Err(WordFault::NotLowercaseAlpha));
    }

    #[test]
    fn response_whitespace_is_malformed() {
        assert_eq!(Word::from_response("two words"), Err(WordFault::Whitespace));
        assert_eq!(Word::from_response("tab\tword"), Err(WordFault::Whitespace));
    }

    #[test]
    fn response_is_lowercased_before_validation() {
        assert_eq!(Word::from_response("WOLF").unwrap().as_str(), "wolf");
        assert_eq!(Word::from_response("w0lf"), Err(WordFault::NotLowercaseAlpha));
    }

    #[test]
    fn batch_state_roles() {
        let state = BatchState::fresh(1);
        assert_eq!(state.round, 0);
        assert!(!state.is_designated());
        assert!(!state.is_closing());
        assert!(BatchState { round: 2, designated: 0, stored_verdict: None }.is_closing());
    }
}
