//! # Shibboleth Core
//!
//! Shared types and traits for the word-affinity challenge/response
//! classifier. The classifier presents a small set of words (a riddle),
//! scores a response word against a learned affinity graph, and adapts
//! the graph's edge weights with each verdict.
//!
//! This crate defines:
//!
//! - the vocabulary unit ([`types::Word`]) and the challenge/verdict types,
//! - the hyperparameters that govern sampling, scoring, and adaptation,
//! - the [`affinity::AffinityStore`] trait — the seam between the
//!   algorithms and the graph backend,
//! - the error taxonomy.
//!
//! The concrete graph store, the resistance-distance engine, and the
//! judging session live in `shibboleth-engine`.

pub mod affinity;
pub mod error;
pub mod params;
pub mod prelude;
pub mod types;
