//! Shibboleth Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use shibboleth_core::prelude::*;
//! ```

pub use crate::affinity::{sigmoid, AffinityStore};
pub use crate::error::{Error, Result};
pub use crate::params::*;
pub use crate::types::{
    BatchState, Challenge, DeferredRecord, Judgement, Verdict, Word, WordFault,
};
