//! Petgraph-backed implementation of the affinity store.
//!
//! Uses a `StableUnGraph` as the backing structure with a HashMap index
//! for O(1) word lookup. Stable indices matter here: removing a word must
//! not invalidate the indices of the words that survive.
//!
//! The completeness invariant is maintained at the only two points where
//! it can change — `insert_word` wires the new word to every existing one,
//! and `remove_word` lets petgraph drop the incident edges.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;

use shibboleth_core::error::{Error, Result};
use shibboleth_core::params::DEFAULT_EDGE_WEIGHT;
use shibboleth_core::prelude::AffinityStore;
use shibboleth_core::types::Word;

/// Petgraph-backed complete affinity graph.
#[derive(Debug, Default)]
pub struct WordGraph {
    graph: StableUnGraph<Word, f64>,
    /// Map from word to petgraph's internal index.
    word_index: HashMap<Word, NodeIndex>,
}

impl WordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of edges. Always `n (n - 1) / 2` for `n` words.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn index_of(&self, word: &Word) -> Result<NodeIndex> {
        self.word_index
            .get(word)
            .copied()
            .ok_or_else(|| Error::word_not_found(word.as_str()))
    }
}

impl AffinityStore for WordGraph {
    fn insert_word(&mut self, word: Word) -> bool {
        if self.word_index.contains_key(&word) {
            return false;
        }
        let existing: Vec<NodeIndex> = self.word_index.values().copied().collect();
        let idx = self.graph.add_node(word.clone());
        for other in existing {
            self.graph.add_edge(idx, other, DEFAULT_EDGE_WEIGHT);
        }
        self.word_index.insert(word, idx);
        true
    }

    fn remove_word(&mut self, word: &Word) -> bool {
        match self.word_index.remove(word) {
            Some(idx) => {
                // StableGraph removes all incident edges with the node.
                self.graph.remove_node(idx);
                true
            }
            None => false,
        }
    }

    fn contains(&self, word: &Word) -> bool {
        self.word_index.contains_key(word)
    }

    fn edge_weight(&self, a: &Word, b: &Word) -> Result<f64> {
        let ai = self.index_of(a)?;
        let bi = self.index_of(b)?;
        let edge = self
            .graph
            .find_edge(ai, bi)
            .ok_or_else(|| Error::edge_not_found(a.as_str(), b.as_str()))?;
        Ok(self.graph[edge])
    }

    fn set_edge_weight(&mut self, a: &Word, b: &Word, weight: f64) -> Result<()> {
        let ai = self.index_of(a)?;
        let bi = self.index_of(b)?;
        let edge = self
            .graph
            .find_edge(ai, bi)
            .ok_or_else(|| Error::edge_not_found(a.as_str(), b.as_str()))?;
        self.graph[edge] = weight;
        Ok(())
    }

    fn neighbors(&self, word: &Word) -> Vec<(Word, f64)> {
        let Some(&idx) = self.word_index.get(word) else {
            return Vec::new();
        };
        self.graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].clone(), *edge.weight())
            })
            .collect()
    }

    fn words(&self) -> Vec<Word> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    fn word_count(&self) -> usize {
        self.graph.node_count()
    }
}
