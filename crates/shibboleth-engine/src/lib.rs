//! # Shibboleth Engine
//!
//! Concrete machinery behind the challenge/response classifier: the
//! petgraph-backed complete affinity graph, thresholded subgraph
//! extraction, effective-resistance scoring, the challenge samplers, the
//! weight-adaptation rules, the deferred-decision ledger, and the
//! [`session::Session`] orchestrator that ties them into the two
//! observable operations: issue a challenge, judge a response.
//!
//! Everything here is single-threaded and synchronous: one judging
//! session at a time, graph loaded at session open, flushed after each
//! mutating judgement.

pub mod adapt;
pub mod artifacts;
pub mod graph;
pub mod ledger;
pub mod prelude;
pub mod resistance;
pub mod sampler;
pub mod session;
pub mod snapshot;
pub mod subgraph;
