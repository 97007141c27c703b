//! The affinity store — the learned word graph behind the classifier.
//!
//! The store is always a *complete* graph on its vocabulary: every pair of
//! distinct words has exactly one weighted edge, created at node-insertion
//! time. The weight is the learned affinity, negative pulling toward
//! "human", positive toward "machine". No operation may leave the graph
//! non-complete.

use crate::error::Result;
use crate::types::Word;

/// A handle to the affinity graph.
///
/// This is a trait rather than a concrete type so the algorithms above it
/// (extraction, sampling, adaptation) are independent of the graph backend.
pub trait AffinityStore {
    /// Insert a word. Returns `true` iff it was newly inserted, in which
    /// case a default-weight edge to every pre-existing word is created.
    /// Inserting a known word is a no-op returning `false`.
    fn insert_word(&mut self, word: Word) -> bool;

    /// Remove a word along with all its incident edges. Returns `true`
    /// iff it was present.
    fn remove_word(&mut self, word: &Word) -> bool;

    /// Whether the word is in the vocabulary.
    fn contains(&self, word: &Word) -> bool;

    /// The weight of the edge between two distinct words.
    fn edge_weight(&self, a: &Word, b: &Word) -> Result<f64>;

    /// Overwrite the weight of the edge between two distinct words.
    fn set_edge_weight(&mut self, a: &Word, b: &Word, weight: f64) -> Result<()>;

    /// Every other word with the connecting edge weight. Empty for an
    /// unknown word.
    fn neighbors(&self, word: &Word) -> Vec<(Word, f64)>;

    /// The whole vocabulary, in insertion order.
    fn words(&self) -> Vec<Word>;

    /// Vocabulary size.
    fn word_count(&self) -> usize;
}

/// The sigmoid transform `1 / (1 + e^-w)`.
///
/// Maps an unbounded learned weight into (0, 1). Used only as the
/// admission score for subgraph membership — never as a conductance in
/// the distance computation.
pub fn sigmoid(weight: f64) -> f64 {
    1.0 / (1.0 + (-weight).exp())
}

#[cfg(test)]
mod tests {
    use super::sigmoid;

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(-5.0) > 0.0 && sigmoid(-5.0) < 0.01);
        assert!(sigmoid(5.0) < 1.0 && sigmoid(5.0) > 0.99);
    }
}
