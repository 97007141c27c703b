//! Graph snapshot persistence — save/load the whole affinity graph.
//!
//! Serializes the vocabulary and every edge weight to JSON. Weights
//! round-trip exactly (serde_json preserves f64). Loading verifies the
//! completeness invariant and rejects anything short of it: there is no
//! partial-graph operating mode.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use shibboleth_core::error::{Error, Result};
use shibboleth_core::prelude::AffinityStore;
use shibboleth_core::types::Word;

use crate::graph::WordGraph;

/// Serializable snapshot of the affinity graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub metadata: SnapshotMetadata,
    pub words: Vec<Word>,
    pub edges: Vec<SerializedEdge>,
}

/// Serializable edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedEdge {
    pub a: Word,
    pub b: Word,
    pub weight: f64,
}

/// Snapshot metadata, cross-checked on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub word_count: usize,
    pub edge_count: usize,
}

/// Save the graph to a JSON file.
pub fn save_graph(store: &WordGraph, path: &Path) -> Result<()> {
    let words = store.words();
    let mut edges = Vec::with_capacity(store.edge_count());
    for (i, a) in words.iter().enumerate() {
        for b in &words[i + 1..] {
            edges.push(SerializedEdge {
                a: a.clone(),
                b: b.clone(),
                weight: store.edge_weight(a, b)?,
            });
        }
    }

    let snapshot = GraphSnapshot {
        metadata: SnapshotMetadata {
            word_count: words.len(),
            edge_count: edges.len(),
        },
        words,
        edges,
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a graph from a JSON file, verifying completeness.
pub fn load_graph(path: &Path) -> Result<WordGraph> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&json)?;
    restore(&snapshot)
}

fn restore(snapshot: &GraphSnapshot) -> Result<WordGraph> {
    let mut graph = WordGraph::new();
    for word in &snapshot.words {
        if !graph.insert_word(word.clone()) {
            return Err(Error::corrupt(format!("duplicate word: {}", word)));
        }
    }

    let n = snapshot.words.len();
    if snapshot.edges.len() != n * (n - 1) / 2 {
        return Err(Error::corrupt(format!(
            "{} words require {} edges, snapshot has {}",
            n,
            n * (n - 1) / 2,
            snapshot.edges.len()
        )));
    }

    let mut seen: HashSet<(&Word, &Word)> = HashSet::new();
    for edge in &snapshot.edges {
        let key = if edge.a < edge.b {
            (&edge.a, &edge.b)
        } else {
            (&edge.b, &edge.a)
        };
        if !seen.insert(key) {
            return Err(Error::corrupt(format!(
                "duplicate edge: {} -- {}",
                edge.a, edge.b
            )));
        }
        graph
            .set_edge_weight(&edge.a, &edge.b, edge.weight)
            .map_err(|e| Error::corrupt(e.to_string()))?;
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn roundtrip_preserves_words_and_weights() {
        let mut store = WordGraph::new();
        for w in ["cat", "dog", "fish", "owl"] {
            store.insert_word(word(w));
        }
        store.set_edge_weight(&word("cat"), &word("dog"), -0.30000000000000004).unwrap();
        store.set_edge_weight(&word("fish"), &word("owl"), 4.9).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        save_graph(&store, &path).unwrap();

        let restored = load_graph(&path).unwrap();
        assert_eq!(restored.word_count(), 4);
        assert_eq!(restored.edge_count(), 6);
        // exact round-trip, including the float-noise weight
        assert_eq!(
            restored.edge_weight(&word("cat"), &word("dog")).unwrap(),
            -0.30000000000000004
        );
        assert_eq!(restored.edge_weight(&word("fish"), &word("owl")).unwrap(), 4.9);
        assert_eq!(restored.edge_weight(&word("cat"), &word("owl")).unwrap(), 0.0);
    }

    #[test]
    fn incomplete_snapshot_is_rejected() {
        let mut store = WordGraph::new();
        for w in ["cat", "dog", "fish"] {
            store.insert_word(word(w));
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        save_graph(&store, &path).unwrap();

        // drop one edge from the file
        let json = std::fs::read_to_string(&path).unwrap();
        let mut snapshot: GraphSnapshot = serde_json::from_str(&json).unwrap();
        snapshot.edges.pop();
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        assert!(matches!(load_graph(&path), Err(Error::Corrupt(_))));
    }

    #[test]
    fn unknown_edge_endpoint_is_rejected() {
        let mut store = WordGraph::new();
        store.insert_word(word("cat"));
        store.insert_word(word("dog"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        save_graph(&store, &path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let mut snapshot: GraphSnapshot = serde_json::from_str(&json).unwrap();
        snapshot.edges[0].a = word("ghost");
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        assert!(matches!(load_graph(&path), Err(Error::Corrupt(_))));
    }
}
