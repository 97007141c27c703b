//! Challenge-word sampling.
//!
//! Two policies select the word set presented to a responder. The random
//! policy is a uniform draw. The dense policy greedily diversifies: each
//! step scores a bounded candidate pool by mean resistance distance to the
//! words already chosen and keeps the candidate that is *least* connected
//! to them, so the challenge spans distant regions of the graph.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use shibboleth_core::error::{Error, Result};
use shibboleth_core::params::{DENSE_SAMPLING_RATE, WORD_SET_SIZE};
use shibboleth_core::prelude::AffinityStore;
use shibboleth_core::types::Word;

use crate::resistance::mean_resistance_dense;

/// How challenge words are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingPolicy {
    /// Greedy diversification by resistance distance.
    #[default]
    Dense,
    /// Uniform sample without replacement.
    Random,
}

/// Sample a word set of `min(WORD_SET_SIZE, vocabulary)` distinct words.
pub fn generate_word_set<R: Rng>(
    store: &dyn AffinityStore,
    policy: SamplingPolicy,
    rng: &mut R,
) -> Result<Vec<Word>> {
    match policy {
        SamplingPolicy::Dense => generate_dense(store, rng),
        SamplingPolicy::Random => generate_random(store, rng),
    }
}

fn generate_random<R: Rng>(store: &dyn AffinityStore, rng: &mut R) -> Result<Vec<Word>> {
    let words = store.words();
    if words.is_empty() {
        return Err(Error::EmptyVocabulary);
    }
    let size = WORD_SET_SIZE.min(words.len());
    Ok(words.choose_multiple(rng, size).cloned().collect())
}

fn generate_dense<R: Rng>(store: &dyn AffinityStore, rng: &mut R) -> Result<Vec<Word>> {
    let mut pool = store.words();
    if pool.is_empty() {
        return Err(Error::EmptyVocabulary);
    }

    let seed = pool.remove(rng.gen_range(0..pool.len()));
    let mut chosen = vec![seed];

    let target = WORD_SET_SIZE.min(store.word_count());
    while chosen.len() < target {
        let pool_take = DENSE_SAMPLING_RATE.min(pool.len());
        let candidates: Vec<Word> = pool.choose_multiple(rng, pool_take).cloned().collect();

        // greedy: keep the candidate farthest from the chosen set;
        // ties go to the first maximum encountered
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let distance = mean_resistance_dense(store, candidate, &chosen)?;
            if best.map_or(true, |(_, best_distance)| distance > best_distance) {
                best = Some((i, distance));
            }
        }
        let (best_idx, _) = best.expect("candidate pool is non-empty");
        let picked = candidates[best_idx].clone();

        // unchosen candidates return to the pool
        pool.retain(|w| w != &picked);
        chosen.push(picked);
    }

    Ok(chosen)
}
