//! Shibboleth Engine Prelude — convenient imports for common usage.
//!
//! ```rust
//! use shibboleth_engine::prelude::*;
//! ```

// Re-export the session orchestrator and its configuration
pub use crate::session::{Protocol, Session, SessionConfig};

// Re-export the samplers and the store implementation
pub use crate::graph::WordGraph;
pub use crate::sampler::{generate_word_set, SamplingPolicy};

// Re-export scoring entry points
pub use crate::resistance::{
    effective_resistance, mean_resistance_dense, mean_resistance_random, resistance_distance,
};

// Re-export everything the core prelude carries
pub use shibboleth_core::prelude::*;
