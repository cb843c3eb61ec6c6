//! The recurrence abstraction shared by every lattice query.
//!
//! Forward evaluation and Viterbi decoding fill the same (state × time)
//! lattice: an initial column from the prior and the first emission, then one
//! column per remaining observation. They differ only in how predecessor
//! scores are combined and whether a backpointer is kept. A [`Recurrence`]
//! captures exactly that difference; the engine drives the rest.
//!
//! Implementations live in [`crate::recurrences`].

use crate::model::{Domain, Weights};

/// Combine rule for one lattice query.
pub trait Recurrence {
    /// Per-cell auxiliary record: `()` when nothing is needed, a predecessor
    /// index for max-product recurrences.
    type Witness: Copy + Default + Send + Sync;

    /// Arithmetic the recurrence works in; selects the model weights.
    const DOMAIN: Domain;

    /// Score of `state` at time 0 for observation column `symbol`.
    fn init(weights: &Weights, state: usize, symbol: usize) -> f64;

    /// Score of `state` at time `t > 0` given the full previous column.
    ///
    /// Must only read `prev` and fixed model data so that cells of one column
    /// can be computed independently.
    fn step(weights: &Weights, prev: &[f64], state: usize, symbol: usize)
        -> (f64, Self::Witness);

    /// Fold the final column into the query result and the chosen end state.
    fn terminate(last: &[f64]) -> (f64, usize);

    /// Result reported for an empty observation sequence.
    fn empty() -> f64;
}
