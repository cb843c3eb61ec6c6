//! Max-product recurrences: Viterbi decoding.
//!
//! For each target state `j` the candidates
//! `cand[i] = δ[i, t-1] · A[i, j] · B[j, o_t]` are scanned in index order; the
//! maximum becomes `δ[j, t]` and the first index reaching it the backpointer.

use crate::model::{Domain, Weights};
use crate::traits::Recurrence;
use crate::utils::argmax_first;

/// Viterbi over plain probabilities.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxProduct;

impl Recurrence for MaxProduct {
    type Witness = usize;
    const DOMAIN: Domain = Domain::Probability;

    #[inline]
    fn init(weights: &Weights, state: usize, symbol: usize) -> f64 {
        weights.prior(state) * weights.emission(state, symbol)
    }

    fn step(weights: &Weights, prev: &[f64], state: usize, symbol: usize) -> (f64, usize) {
        let emit = weights.emission(state, symbol);
        argmax_first(
            prev.iter()
                .enumerate()
                .map(|(from, &delta)| delta * weights.transition(from, state) * emit),
        )
    }

    fn terminate(last: &[f64]) -> (f64, usize) {
        argmax_first(last.iter().copied())
    }

    fn empty() -> f64 {
        0.0
    }
}

/// Viterbi in natural-log space.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMaxProduct;

impl Recurrence for LogMaxProduct {
    type Witness = usize;
    const DOMAIN: Domain = Domain::Log;

    #[inline]
    fn init(weights: &Weights, state: usize, symbol: usize) -> f64 {
        weights.prior(state) + weights.emission(state, symbol)
    }

    fn step(weights: &Weights, prev: &[f64], state: usize, symbol: usize) -> (f64, usize) {
        let emit = weights.emission(state, symbol);
        argmax_first(
            prev.iter()
                .enumerate()
                .map(|(from, &delta)| delta + weights.transition(from, state) + emit),
        )
    }

    fn terminate(last: &[f64]) -> (f64, usize) {
        argmax_first(last.iter().copied())
    }

    fn empty() -> f64 {
        f64::NEG_INFINITY
    }
}
