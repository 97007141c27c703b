//! The judging session — ties the store, sampler, distance engine,
//! adaptation rules, and ledger into the two observable operations:
//! issue a challenge, judge a response.
//!
//! A session is an explicit object rather than process-wide state, so
//! isolated sessions can coexist in tests. All state is rooted in one
//! artifact directory and flushed after every mutating judgement; a crash
//! between adaptation and flush loses that judgement, never corrupts the
//! files.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use shibboleth_core::error::{Error, Result};
use shibboleth_core::params::{BATCH_ROUNDS, VERDICT_THRESHOLD};
use shibboleth_core::prelude::AffinityStore;
use shibboleth_core::types::{
    BatchState, Challenge, DeferredRecord, Judgement, Verdict, Word, WordFault,
};

use crate::adapt::apply_verdict;
use crate::artifacts;
use crate::graph::WordGraph;
use crate::ledger::Ledger;
use crate::resistance::{mean_resistance_dense, mean_resistance_random};
use crate::sampler::{generate_word_set, SamplingPolicy};
use crate::snapshot;

/// How verdicts are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Every scorable response gets a verdict immediately.
    #[default]
    Immediate,
    /// One verdict per 3-round batch; the other two responses are
    /// deferred and later labeled identically.
    Batched,
}

/// Session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub policy: SamplingPolicy,
    #[serde(default)]
    pub protocol: Protocol,
}

/// File layout inside the session's artifact directory.
#[derive(Debug, Clone)]
struct SessionPaths {
    root: PathBuf,
}

impl SessionPaths {
    fn graph(&self) -> PathBuf {
        self.root.join("graph.json")
    }

    fn ledger(&self) -> PathBuf {
        self.root.join("pending.jsonl")
    }

    fn challenge(&self) -> PathBuf {
        self.root.join("challenge.json")
    }

    fn batch(&self) -> PathBuf {
        self.root.join("batch.json")
    }
}

/// One judging session over one artifact directory.
pub struct Session {
    config: SessionConfig,
    paths: SessionPaths,
    store: WordGraph,
    active: Option<Challenge>,
    ledger: Ledger,
    batch: BatchState,
    rng: StdRng,
}

impl Session {
    /// Open (or create) the session rooted at `root`.
    pub fn open(root: impl AsRef<Path>, config: SessionConfig) -> Result<Self> {
        Self::open_with_rng(root, config, StdRng::from_entropy())
    }

    /// Open with a seeded RNG, for deterministic tests.
    pub fn open_seeded(root: impl AsRef<Path>, config: SessionConfig, seed: u64) -> Result<Self> {
        Self::open_with_rng(root, config, StdRng::seed_from_u64(seed))
    }

    fn open_with_rng(root: impl AsRef<Path>, config: SessionConfig, mut rng: StdRng) -> Result<Self> {
        let paths = SessionPaths {
            root: root.as_ref().to_path_buf(),
        };
        std::fs::create_dir_all(&paths.root)?;

        let store = if paths.graph().exists() {
            snapshot::load_graph(&paths.graph())?
        } else {
            WordGraph::new()
        };
        let active = artifacts::load_challenge(&paths.challenge())?;
        let batch = artifacts::load_batch_state(&paths.batch(), &mut rng)?;
        let ledger = Ledger::open(paths.ledger());

        Ok(Self {
            config,
            paths,
            store,
            active,
            ledger,
            batch,
            rng,
        })
    }

    pub fn store(&self) -> &WordGraph {
        &self.store
    }

    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.active.as_ref()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn batch_state(&self) -> &BatchState {
        &self.batch
    }

    /// Generate a word set, remember it as the single outstanding
    /// challenge (overwriting any previous one), and return it.
    pub fn issue_challenge(&mut self) -> Result<Challenge> {
        let policy = match self.config.protocol {
            Protocol::Immediate => self.config.policy,
            // in a batch, only the designated round merits the dense
            // (and expensive) selection
            Protocol::Batched => {
                if self.batch.is_designated() {
                    SamplingPolicy::Dense
                } else {
                    SamplingPolicy::Random
                }
            }
        };

        let words = generate_word_set(&self.store, policy, &mut self.rng)?;
        let challenge = Challenge::new(words);
        self.active = Some(challenge.clone());
        artifacts::save_challenge(&self.paths.challenge(), &challenge)?;
        Ok(challenge)
    }

    /// Judge one raw response against the outstanding challenge.
    ///
    /// `mode` forces the verdict instead of computing it (manual
    /// labeling). Validation failures come back as statuses; only
    /// internal defects and I/O failures are errors.
    pub fn judge_response(&mut self, raw: &str, mode: Option<Verdict>) -> Result<Judgement> {
        let word = match Word::from_response(raw) {
            Ok(word) => word,
            Err(WordFault::Whitespace) => return Ok(Judgement::MalformedInput),
            Err(WordFault::NotLowercaseAlpha) => return Ok(Judgement::EmptyOrNonAlpha),
        };

        let challenge = self.active.clone().ok_or(Error::NoActiveChallenge)?;
        if challenge.contains(&word) {
            return Ok(Judgement::ChallengeMember);
        }

        if self.store.insert_word(word.clone()) {
            snapshot::save_graph(&self.store, &self.paths.graph())?;
            // a brand-new word has only zero-weight edges; nothing to
            // score against unless the verdict was forced
            if mode.is_none() {
                self.ledger.push(&DeferredRecord {
                    responder: word,
                    challenge,
                })?;
                return Ok(Judgement::NeedAnotherResponse);
            }
        }

        match self.config.protocol {
            Protocol::Immediate => self.judge_immediate(word, challenge, mode),
            Protocol::Batched => self.judge_batched(word, challenge, mode),
        }
    }

    /// Insert a vocabulary word and persist the graph. Returns `true`
    /// iff newly inserted.
    pub fn insert_vocabulary(&mut self, word: Word) -> Result<bool> {
        let inserted = self.store.insert_word(word);
        if inserted {
            snapshot::save_graph(&self.store, &self.paths.graph())?;
        }
        Ok(inserted)
    }

    /// Remove a vocabulary word and persist the graph. Returns `true`
    /// iff it was present.
    pub fn remove_vocabulary(&mut self, word: &Word) -> Result<bool> {
        let removed = self.store.remove_word(word);
        if removed {
            snapshot::save_graph(&self.store, &self.paths.graph())?;
        }
        Ok(removed)
    }

    fn judge_immediate(
        &mut self,
        word: Word,
        challenge: Challenge,
        mode: Option<Verdict>,
    ) -> Result<Judgement> {
        let verdict = match mode {
            Some(verdict) => verdict,
            None => self.compute_verdict(&word, &challenge, self.config.policy)?,
        };

        apply_verdict(&mut self.store, verdict, &word, challenge.words())?;
        self.replay_ledger(verdict)?;
        // flush the adapted weights before forgetting the deferred
        // records: a crash in between re-requests, never loses
        snapshot::save_graph(&self.store, &self.paths.graph())?;
        self.ledger.clear()?;
        self.resolve_challenge()?;

        Ok(Self::surface(verdict))
    }

    fn judge_batched(
        &mut self,
        word: Word,
        challenge: Challenge,
        mode: Option<Verdict>,
    ) -> Result<Judgement> {
        if self.batch.is_designated() {
            let verdict = match mode {
                Some(verdict) => verdict,
                // the batched protocol always scores in dense mode
                None => self.compute_verdict(&word, &challenge, SamplingPolicy::Dense)?,
            };
            self.batch.stored_verdict = Some(verdict);
        }

        if self.batch.is_closing() {
            let verdict = self
                .batch
                .stored_verdict
                .take()
                .ok_or_else(|| Error::corrupt("batch closed without a stored verdict"))?;
            self.batch = BatchState::fresh(self.rng.gen_range(0..BATCH_ROUNDS));

            // the whole batch, deferred and current alike, gets the one
            // verdict; weights flush before the ledger forgets
            self.replay_ledger(verdict)?;
            apply_verdict(&mut self.store, verdict, &word, challenge.words())?;
            snapshot::save_graph(&self.store, &self.paths.graph())?;
            self.ledger.clear()?;
            artifacts::save_batch_state(&self.paths.batch(), &self.batch)?;
            self.resolve_challenge()?;

            Ok(Self::surface(verdict))
        } else {
            self.batch.round += 1;
            artifacts::save_batch_state(&self.paths.batch(), &self.batch)?;
            self.ledger.push(&DeferredRecord {
                responder: word,
                challenge,
            })?;
            Ok(Judgement::NeedAnotherResponse)
        }
    }

    fn compute_verdict(
        &self,
        word: &Word,
        challenge: &Challenge,
        policy: SamplingPolicy,
    ) -> Result<Verdict> {
        let mean = match policy {
            SamplingPolicy::Dense => mean_resistance_dense(&self.store, word, challenge.words())?,
            SamplingPolicy::Random => {
                mean_resistance_random(&self.store, word, challenge.words())?
            }
        };
        Ok(if mean < VERDICT_THRESHOLD {
            Verdict::Human
        } else {
            Verdict::Machine
        })
    }

    /// Adapt every deferred record with the verdict. Does not clear the
    /// ledger; the caller does that after the graph is flushed.
    fn replay_ledger(&mut self, verdict: Verdict) -> Result<()> {
        for record in self.ledger.records()? {
            apply_verdict(
                &mut self.store,
                verdict,
                &record.responder,
                record.challenge.words(),
            )?;
        }
        Ok(())
    }

    /// A surfaced verdict resolves the outstanding challenge.
    fn resolve_challenge(&mut self) -> Result<()> {
        self.active = None;
        artifacts::clear_challenge(&self.paths.challenge())
    }

    fn surface(verdict: Verdict) -> Judgement {
        if verdict.is_human() {
            Judgement::Pass
        } else {
            Judgement::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn session(dir: &Path, policy: SamplingPolicy, protocol: Protocol) -> Session {
        Session::open_seeded(dir, SessionConfig { policy, protocol }, 42).unwrap()
    }

    #[test]
    fn judging_without_a_challenge_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path(), SamplingPolicy::Random, Protocol::Immediate);
        s.insert_vocabulary(word("cat")).unwrap();
        assert!(matches!(
            s.judge_response("dog", None),
            Err(Error::NoActiveChallenge)
        ));
    }

    #[test]
    fn validation_statuses_come_before_challenge_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path(), SamplingPolicy::Random, Protocol::Immediate);
        // whitespace and format faults never need a challenge
        assert_eq!(
            s.judge_response("two words", None).unwrap(),
            Judgement::MalformedInput
        );
        assert_eq!(
            s.judge_response("w0rd", None).unwrap(),
            Judgement::EmptyOrNonAlpha
        );
        assert_eq!(s.judge_response("", None).unwrap(), Judgement::EmptyOrNonAlpha);
    }

    #[test]
    fn challenge_is_overwritten_not_merged() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(dir.path(), SamplingPolicy::Random, Protocol::Immediate);
        for w in ["cat", "dog", "fish", "owl", "wolf", "bird", "hen"] {
            s.insert_vocabulary(word(w)).unwrap();
        }
        let first = s.issue_challenge().unwrap();
        let second = s.issue_challenge().unwrap();
        assert_eq!(s.active_challenge(), Some(&second));
        // the first challenge is gone even if the sets differ
        if first != second {
            assert_ne!(s.active_challenge(), Some(&first));
        }
    }

    #[test]
    fn state_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut s = session(dir.path(), SamplingPolicy::Random, Protocol::Immediate);
            for w in ["cat", "dog", "fish"] {
                s.insert_vocabulary(word(w)).unwrap();
            }
            s.issue_challenge().unwrap();
            // defer one unknown word
            assert_eq!(
                s.judge_response("bird", None).unwrap(),
                Judgement::NeedAnotherResponse
            );
        }

        let s = session(dir.path(), SamplingPolicy::Random, Protocol::Immediate);
        assert_eq!(s.store().word_count(), 4);
        assert!(s.active_challenge().is_some());
        assert_eq!(s.ledger().len().unwrap(), 1);
    }
}
