//! Discrete hidden Markov model evaluation and decoding.
//!
//! This crate answers two questions about a fixed, discrete HMM:
//! - **forward**: how likely is an observation sequence, summed over every
//!   hidden-state path?
//! - **viterbi**: which single hidden-state path best explains it?
//!
//! ## Core idea
//! 1. Hand the five model tables to [`HmmEngine::new`] as one
//!    [`ModelTables`] bundle (or assemble them with [`HmmEngineBuilder`]).
//! 2. Query the engine as often as needed; it never changes after
//!    construction.
//! 3. Each query fills its own (state × time) [`lattice::Lattice`] with a
//!    [`Recurrence`]: sum-product for likelihoods, max-product with
//!    backpointers for decoding.
//!
//! Computation uses plain probabilities by default, which underflow for long
//! sequences. [`HmmEngine::log_forward`] and [`HmmEngine::log_viterbi`] are
//! separate log-space modes for that case.
//!
//! ## Quick start
//! ```
//! use hmm_lattice::{HmmEngine, ModelTables};
//!
//! let engine = HmmEngine::new(ModelTables {
//!     observation_states: vec!["H", "T"],
//!     hidden_states: vec!["fair", "loaded"],
//!     prior: vec![0.5, 0.5],
//!     transition: vec![vec![0.9, 0.1], vec![0.2, 0.8]],
//!     emission: vec![vec![0.5, 0.5], vec![0.8, 0.2]],
//! })
//! .unwrap();
//!
//! let p = engine.forward(&["H", "H", "T"]).unwrap();
//! assert!(p > 0.0 && p < 1.0);
//! assert_eq!(engine.viterbi(&["H", "H", "T"]).unwrap().len(), 3);
//! assert!(engine.forward(&["H", "edge"]).is_err());
//! ```
//!
//! ## Features
//! - `serde` (default): `Deserialize`/`Serialize` for [`ModelTables`].
//! - `parallel`: fill wide lattice columns with rayon.
//! - `tracing`: spans around queries and lattice filling.

pub mod builder;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod model;
pub mod recurrences;
pub mod traits;
pub mod utils;

pub use crate::builder::HmmEngineBuilder;
pub use crate::engine::{HmmEngine, ViterbiPath};
pub use crate::error::{ConfigError, HmmError, Result};
pub use crate::model::{HmmModel, ModelTables};
pub use crate::traits::Recurrence;
