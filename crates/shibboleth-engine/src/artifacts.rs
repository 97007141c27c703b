//! Session artifacts — the small durable state beside the graph.
//!
//! The active challenge and the batched-protocol state each live in their
//! own JSON file so a session survives process restarts: the original
//! deployment re-reads everything on every request.

use std::path::Path;

use rand::Rng;

use shibboleth_core::error::{Error, Result};
use shibboleth_core::params::BATCH_ROUNDS;
use shibboleth_core::types::{BatchState, Challenge};

/// Persist the active challenge.
pub fn save_challenge(path: &Path, challenge: &Challenge) -> Result<()> {
    write_json(path, challenge)
}

/// Load the active challenge; an absent file means none is outstanding.
pub fn load_challenge(path: &Path) -> Result<Option<Challenge>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

/// Forget the active challenge.
pub fn clear_challenge(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Persist the batch state.
pub fn save_batch_state(path: &Path, state: &BatchState) -> Result<()> {
    write_json(path, state)
}

/// Load the batch state, starting a fresh batch with a newly drawn
/// designated round when none was persisted yet.
pub fn load_batch_state<R: Rng>(path: &Path, rng: &mut R) -> Result<BatchState> {
    if !path.exists() {
        return Ok(BatchState::fresh(rng.gen_range(0..BATCH_ROUNDS)));
    }
    let json = std::fs::read_to_string(path)?;
    let state: BatchState = serde_json::from_str(&json)?;
    // a round outside the cycle would never designate and never close
    if state.round >= BATCH_ROUNDS || state.designated >= BATCH_ROUNDS {
        return Err(Error::corrupt(format!(
            "batch round {} / designated {} outside 0..{}",
            state.round, state.designated, BATCH_ROUNDS
        )));
    }
    Ok(state)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
