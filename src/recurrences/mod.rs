//! Recurrence implementations for the HMM engine.
//!
//! - [`forward`] : sum-product (likelihood), plain and log space.
//! - [`viterbi`] : max-product with backpointers, plain and log space.

pub mod forward;
pub mod viterbi;

pub use forward::{LogSumProduct, SumProduct};
pub use viterbi::{LogMaxProduct, MaxProduct};
