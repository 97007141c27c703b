//! Online weight adaptation.
//!
//! The only post-creation mutators of edge weight. A human verdict pulls
//! the responder's edges toward the challenge words (more negative); a
//! machine verdict pushes them apart (more positive). Steps are clamped
//! at the weight limit, so repeated adaptation converges to the bound and
//! becomes a no-op there.

use shibboleth_core::error::Result;
use shibboleth_core::params::{WEIGHT_ELASTICITY, WEIGHT_LIMIT};
use shibboleth_core::prelude::AffinityStore;
use shibboleth_core::types::{Verdict, Word};

/// Strengthen the human affinity of `center` toward every challenge word.
pub fn enhance_humanity(
    store: &mut dyn AffinityStore,
    center: &Word,
    word_set: &[Word],
) -> Result<()> {
    for word in word_set {
        let weight = store.edge_weight(center, word)?;
        let adapted = (weight - WEIGHT_ELASTICITY).max(-WEIGHT_LIMIT);
        store.set_edge_weight(center, word, adapted)?;
    }
    Ok(())
}

/// Strengthen the machine affinity of `center` toward every challenge word.
pub fn enhance_machinery(
    store: &mut dyn AffinityStore,
    center: &Word,
    word_set: &[Word],
) -> Result<()> {
    for word in word_set {
        let weight = store.edge_weight(center, word)?;
        let adapted = (weight + WEIGHT_ELASTICITY).min(WEIGHT_LIMIT);
        store.set_edge_weight(center, word, adapted)?;
    }
    Ok(())
}

/// Apply whichever adaptation the verdict calls for.
pub fn apply_verdict(
    store: &mut dyn AffinityStore,
    verdict: Verdict,
    center: &Word,
    word_set: &[Word],
) -> Result<()> {
    match verdict {
        Verdict::Human => enhance_humanity(store, center, word_set),
        Verdict::Machine => enhance_machinery(store, center, word_set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WordGraph;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn humanity_converges_to_the_lower_bound() {
        let mut store = WordGraph::new();
        store.insert_word(word("cat"));
        store.insert_word(word("dog"));
        let set = [word("dog")];

        // 50 steps of 0.1 reach the -5.0 bound exactly; 10 more stay there
        for _ in 0..60 {
            enhance_humanity(&mut store, &word("cat"), &set).unwrap();
            let w = store.edge_weight(&word("cat"), &word("dog")).unwrap();
            assert!(w >= -WEIGHT_LIMIT);
        }
        let w = store.edge_weight(&word("cat"), &word("dog")).unwrap();
        assert_eq!(w, -WEIGHT_LIMIT);
    }

    #[test]
    fn machinery_converges_to_the_upper_bound() {
        let mut store = WordGraph::new();
        store.insert_word(word("cat"));
        store.insert_word(word("dog"));
        let set = [word("dog")];

        for _ in 0..60 {
            enhance_machinery(&mut store, &word("cat"), &set).unwrap();
            let w = store.edge_weight(&word("cat"), &word("dog")).unwrap();
            assert!(w <= WEIGHT_LIMIT);
        }
        let w = store.edge_weight(&word("cat"), &word("dog")).unwrap();
        assert_eq!(w, WEIGHT_LIMIT);
    }

    #[test]
    fn adaptation_touches_the_whole_set_symmetrically() {
        let mut store = WordGraph::new();
        for w in ["wolf", "cat", "dog", "fish"] {
            store.insert_word(word(w));
        }
        let set = [word("cat"), word("dog"), word("fish")];
        apply_verdict(&mut store, Verdict::Machine, &word("wolf"), &set).unwrap();

        for w in &set {
            let got = store.edge_weight(&word("wolf"), w).unwrap();
            assert!((got - WEIGHT_ELASTICITY).abs() < 1e-12);
        }
        // edges among the set itself are untouched
        assert_eq!(store.edge_weight(&word("cat"), &word("dog")).unwrap(), 0.0);
    }
}
