//! Effective-resistance distance over an extracted subgraph.
//!
//! Every admitted edge contributes unit resistance. The sigmoid score an
//! edge carries decided its admission and nothing more — the distance is a
//! property of the subgraph's topology alone. (A conductance-weighted
//! Laplacian would be the more natural reading of the admission logic;
//! the unweighted behavior is preserved deliberately. See DESIGN.md.)
//!
//! For nodes `a`, `b` the effective resistance is
//! `L⁺_aa + L⁺_bb − 2·L⁺_ab` with `L⁺` the Moore–Penrose pseudoinverse of
//! the subgraph Laplacian. Connectivity is checked explicitly first: the
//! pseudoinverse yields finite numbers for disconnected pairs, and those
//! must surface as [`Error::Disconnected`], never as a guessed distance.

use std::collections::{HashSet, VecDeque};

use nalgebra::DMatrix;

use shibboleth_core::error::{Error, Result};
use shibboleth_core::params::HEURISTIC_RATE;
use shibboleth_core::prelude::{sigmoid, AffinityStore};
use shibboleth_core::types::Word;

use crate::subgraph::{extract, Subgraph};

/// Singular values below this are treated as the Laplacian's null space.
const PSEUDOINVERSE_EPS: f64 = 1e-12;

/// Effective resistance between two member words of a subgraph.
pub fn effective_resistance(sub: &Subgraph, a: &Word, b: &Word) -> Result<f64> {
    let ai = sub
        .node_index(a)
        .ok_or_else(|| Error::disconnected(a.as_str(), b.as_str()))?;
    let bi = sub
        .node_index(b)
        .ok_or_else(|| Error::disconnected(a.as_str(), b.as_str()))?;

    if ai == bi {
        return Ok(0.0);
    }
    if !connected(sub, ai, bi) {
        return Err(Error::disconnected(a.as_str(), b.as_str()));
    }

    let laplacian = unit_laplacian(sub);
    let pinv = laplacian
        .pseudo_inverse(PSEUDOINVERSE_EPS)
        .expect("epsilon is non-negative");

    Ok(pinv[(ai, ai)] + pinv[(bi, bi)] - 2.0 * pinv[(ai, bi)])
}

/// Resistance distance between `a` and `b` in the store.
///
/// The admission threshold scales with how decided the pair already is:
/// `HEURISTIC_RATE × sigmoid(weight(a, b))`. The subgraph is extracted
/// around `a` and discarded after the query.
pub fn resistance_distance(
    store: &dyn AffinityStore,
    a: &Word,
    b: &Word,
    restricted: &HashSet<Word>,
) -> Result<f64> {
    let threshold = HEURISTIC_RATE * sigmoid(store.edge_weight(a, b)?);
    let sub = extract(store, a, threshold, restricted);
    effective_resistance(&sub, a, b)
}

/// Mean resistance distance from `center` to each word of the set, with
/// direct edges between set members suppressed in every query (the dense
/// operating mode).
pub fn mean_resistance_dense(
    store: &dyn AffinityStore,
    center: &Word,
    word_set: &[Word],
) -> Result<f64> {
    let restricted: HashSet<Word> = word_set.iter().cloned().collect();
    mean_over(store, center, word_set, &restricted)
}

/// Mean resistance distance from `center` to each word of the set with no
/// restriction (the random operating mode).
pub fn mean_resistance_random(
    store: &dyn AffinityStore,
    center: &Word,
    word_set: &[Word],
) -> Result<f64> {
    mean_over(store, center, word_set, &HashSet::new())
}

fn mean_over(
    store: &dyn AffinityStore,
    center: &Word,
    word_set: &[Word],
    restricted: &HashSet<Word>,
) -> Result<f64> {
    if word_set.is_empty() {
        return Err(Error::EmptyVocabulary);
    }
    let mut total = 0.0;
    for word in word_set {
        total += resistance_distance(store, center, word, restricted)?;
    }
    Ok(total / word_set.len() as f64)
}

fn unit_laplacian(sub: &Subgraph) -> DMatrix<f64> {
    let n = sub.node_count();
    let mut lap = DMatrix::<f64>::zeros(n, n);
    for (a, b, _score) in sub.edges() {
        lap[(a, a)] += 1.0;
        lap[(b, b)] += 1.0;
        lap[(a, b)] -= 1.0;
        lap[(b, a)] -= 1.0;
    }
    lap
}

fn connected(sub: &Subgraph, from: usize, to: usize) -> bool {
    let adjacency = sub.adjacency();
    let mut visited = vec![false; sub.node_count()];
    let mut queue = VecDeque::from([from]);
    visited[from] = true;
    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        for &next in &adjacency[current] {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WordGraph;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    /// Whole-graph subgraph over an all-zero store (threshold 4.0 admits
    /// everything).
    fn full_subgraph(words: &[&str]) -> (WordGraph, Subgraph) {
        let mut store = WordGraph::new();
        for w in words {
            store.insert_word(word(w));
        }
        let sub = extract(&store, &word(words[0]), 4.0, &HashSet::new());
        (store, sub)
    }

    #[test]
    fn same_node_has_zero_resistance() {
        let (_, sub) = full_subgraph(&["a", "b"]);
        assert_eq!(effective_resistance(&sub, &word("a"), &word("a")).unwrap(), 0.0);
    }

    #[test]
    fn path_of_two_unit_edges_measures_two() {
        let mut store = WordGraph::new();
        for w in ["a", "b", "c"] {
            store.insert_word(word(w));
        }
        // admit a--b and b--c, keep a--c out
        store.set_edge_weight(&word("a"), &word("b"), -3.0).unwrap();
        store.set_edge_weight(&word("b"), &word("c"), -3.0).unwrap();
        store.set_edge_weight(&word("a"), &word("c"), 3.0).unwrap();
        let sub = extract(&store, &word("a"), 0.1, &HashSet::new());

        let r = effective_resistance(&sub, &word("a"), &word("c")).unwrap();
        assert!((r - 2.0).abs() < 1e-9, "path resistance was {r}");
    }

    #[test]
    fn triangle_measures_two_thirds() {
        let (_, sub) = full_subgraph(&["a", "b", "c"]);
        let r = effective_resistance(&sub, &word("a"), &word("b")).unwrap();
        assert!((r - 2.0 / 3.0).abs() < 1e-9, "triangle resistance was {r}");
    }

    #[test]
    fn complete_graph_measures_two_over_n() {
        for n in 3..=6 {
            let names: Vec<String> = (0..n).map(|i| format!("{}", (b'a' + i) as char)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (_, sub) = full_subgraph(&refs);
            let r = effective_resistance(&sub, &word(&names[0]), &word(&names[1])).unwrap();
            assert!((r - 2.0 / n as f64).abs() < 1e-9, "K_{n} adjacent resistance was {r}");
        }
    }

    #[test]
    fn star_leaves_measure_two() {
        let mut store = WordGraph::new();
        for w in ["hub", "p", "q", "r"] {
            store.insert_word(word(w));
        }
        let restricted: HashSet<Word> = [word("p"), word("q"), word("r")].into_iter().collect();
        let sub = extract(&store, &word("hub"), 4.0, &restricted);

        let hub_leaf = effective_resistance(&sub, &word("hub"), &word("p")).unwrap();
        assert!((hub_leaf - 1.0).abs() < 1e-9);
        let leaf_leaf = effective_resistance(&sub, &word("p"), &word("q")).unwrap();
        assert!((leaf_leaf - 2.0).abs() < 1e-9);
    }

    #[test]
    fn absent_or_disconnected_node_is_an_error() {
        let mut store = WordGraph::new();
        for w in ["a", "b", "c"] {
            store.insert_word(word(w));
        }
        // admit nothing: subgraph is just the origin
        let sub = extract(&store, &word("a"), 0.2, &HashSet::new());
        assert!(matches!(
            effective_resistance(&sub, &word("a"), &word("b")),
            Err(Error::Disconnected { .. })
        ));
    }

    #[test]
    fn query_threshold_scales_with_the_pair_weight() {
        // a--b pushed far positive: threshold = 8·sigm(5) ≈ 7.95, still
        // admits every edge; distance remains finite.
        let mut store = WordGraph::new();
        for w in ["a", "b", "c"] {
            store.insert_word(word(w));
        }
        store.set_edge_weight(&word("a"), &word("b"), 5.0).unwrap();
        let r = resistance_distance(&store, &word("a"), &word("b"), &HashSet::new()).unwrap();
        assert!(r > 0.0 && r < 1.0);
    }

    #[test]
    fn dense_mean_over_restricted_star_is_one() {
        let mut store = WordGraph::new();
        for w in ["x", "p", "q", "r"] {
            store.insert_word(word(w));
        }
        let set = [word("p"), word("q"), word("r")];
        let mean = mean_resistance_dense(&store, &word("x"), &set).unwrap();
        assert!((mean - 1.0).abs() < 1e-9, "dense mean was {mean}");

        // without the restriction the full K4 is much closer
        let mean = mean_resistance_random(&store, &word("x"), &set).unwrap();
        assert!((mean - 0.5).abs() < 1e-9, "random mean was {mean}");
    }
}
