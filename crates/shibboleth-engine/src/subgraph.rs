//! Thresholded subgraph extraction.
//!
//! Builds the ephemeral local neighborhood around a query word that the
//! resistance engine measures. Expansion is governed purely by the sigmoid
//! admission test — not by a fixed radius — so a densely decided region
//! with pairwise sigmoid scores under the threshold can pull in the whole
//! graph. Membership doubles as the visited set: a node already in the
//! subgraph is never re-expanded, which bounds the traversal on any
//! finite graph.
//!
//! Uses an explicit frontier rather than recursion so stack depth stays
//! constant on large vocabularies.

use std::collections::{HashMap, HashSet};

use shibboleth_core::prelude::{sigmoid, AffinityStore};
use shibboleth_core::types::Word;

/// An ephemeral, per-query subgraph.
///
/// Nodes are indexed densely in admission order (the origin is index 0).
/// Edge attributes are the sigmoid admission scores — carried for
/// inspection, deliberately unused by the distance computation.
#[derive(Debug, Default)]
pub struct Subgraph {
    nodes: Vec<Word>,
    index: HashMap<Word, usize>,
    /// Keyed by ordered index pair; re-encountered edges replace.
    edges: HashMap<(usize, usize), f64>,
}

impl Subgraph {
    fn add_node(&mut self, word: Word) -> usize {
        let idx = self.nodes.len();
        self.index.insert(word.clone(), idx);
        self.nodes.push(word);
        idx
    }

    fn set_edge(&mut self, a: usize, b: usize, score: f64) {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges.insert(key, score);
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    pub fn node_index(&self, word: &Word) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, a: &Word, b: &Word) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(ai), Some(bi)) => {
                let key = if ai < bi { (ai, bi) } else { (bi, ai) };
                self.edges.contains_key(&key)
            }
            _ => false,
        }
    }

    /// Edge list as `(index a, index b, sigmoid score)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges.iter().map(|(&(a, b), &s)| (a, b, s))
    }

    /// Unit-edge adjacency lists, indexed like the nodes.
    pub(crate) fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for &(a, b) in self.edges.keys() {
            adj[a].push(b);
            adj[b].push(a);
        }
        adj
    }
}

/// Extract the thresholded neighborhood around `origin`.
///
/// A store neighbor `(n, w)` of the current center is admitted when
/// `sigmoid(w) < threshold`; the connecting edge is recorded with its
/// sigmoid score **unless both endpoints are in `restricted`** — this
/// suppresses direct edges between challenge words, which would otherwise
/// short-circuit the distance measurement. Newly admitted nodes join the
/// frontier and are expanded in turn.
pub fn extract(
    store: &dyn AffinityStore,
    origin: &Word,
    threshold: f64,
    restricted: &HashSet<Word>,
) -> Subgraph {
    let mut sub = Subgraph::default();
    sub.add_node(origin.clone());

    let mut frontier = vec![origin.clone()];
    while let Some(center) = frontier.pop() {
        let center_idx = sub.node_index(&center).expect("frontier nodes are members");
        let center_restricted = restricted.contains(&center);

        for (neighbor, weight) in store.neighbors(&center) {
            let score = sigmoid(weight);
            if score >= threshold {
                continue;
            }

            let first_visit = !sub.contains(&neighbor);
            let neighbor_idx = match sub.node_index(&neighbor) {
                Some(idx) => idx,
                None => sub.add_node(neighbor.clone()),
            };

            // even if the edge already exists, refresh it
            if !(center_restricted && restricted.contains(&neighbor)) {
                sub.set_edge(center_idx, neighbor_idx, score);
            }

            if first_visit {
                frontier.push(neighbor);
            }
        }
    }

    sub
}
