//! Hyperparameters of the classifier.
//!
//! These are deliberately constants, not configuration: they define the
//! learned graph's semantics, and a graph adapted under one set of values
//! is not meaningful under another.

/// Per-verdict step applied to each challenge edge weight.
pub const WEIGHT_ELASTICITY: f64 = 0.1;

/// Edge weights live in `[-WEIGHT_LIMIT, +WEIGHT_LIMIT]`.
pub const WEIGHT_LIMIT: f64 = 5.0;

/// Maximum number of words presented in one challenge.
pub const WORD_SET_SIZE: usize = 5;

/// Mean resistance distance below this value reads as human-like.
pub const VERDICT_THRESHOLD: f64 = 0.5;

/// Weight given to every edge at node-insertion time.
pub const DEFAULT_EDGE_WEIGHT: f64 = 0.0;

/// Scales the sigmoid of the query-pair weight into the subgraph
/// admission threshold.
pub const HEURISTIC_RATE: f64 = 8.0;

/// Candidate pool size per greedy step of the dense sampler.
pub const DENSE_SAMPLING_RATE: usize = 50;

/// Number of rounds in one batch of the batched protocol.
pub const BATCH_ROUNDS: u8 = 3;

/// Round index that closes a batch. Fixed at the literal 2: the batch
/// length is not derived from any other parameter.
pub const BATCH_CLOSING_ROUND: u8 = 2;
