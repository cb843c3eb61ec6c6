//! Sum-product recurrences: the forward algorithm.
//!
//! `α[j, t] = (Σ_i α[i, t-1] · A[i, j]) · B[j, o_t]`, summed over the final
//! column to give the likelihood of the whole sequence.

use crate::model::{Domain, Weights};
use crate::traits::Recurrence;
use crate::utils::log_sum_exp;

/// Forward algorithm over plain probabilities.
///
/// No rescaling is performed, so long sequences underflow toward zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumProduct;

impl Recurrence for SumProduct {
    type Witness = ();
    const DOMAIN: Domain = Domain::Probability;

    #[inline]
    fn init(weights: &Weights, state: usize, symbol: usize) -> f64 {
        weights.prior(state) * weights.emission(state, symbol)
    }

    fn step(weights: &Weights, prev: &[f64], state: usize, symbol: usize) -> (f64, ()) {
        let inflow: f64 = prev
            .iter()
            .enumerate()
            .map(|(from, &alpha)| alpha * weights.transition(from, state))
            .sum();
        (inflow * weights.emission(state, symbol), ())
    }

    fn terminate(last: &[f64]) -> (f64, usize) {
        (last.iter().sum(), 0)
    }

    fn empty() -> f64 {
        0.0
    }
}

/// Forward algorithm in natural-log space, using log-sum-exp.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSumProduct;

impl Recurrence for LogSumProduct {
    type Witness = ();
    const DOMAIN: Domain = Domain::Log;

    #[inline]
    fn init(weights: &Weights, state: usize, symbol: usize) -> f64 {
        weights.prior(state) + weights.emission(state, symbol)
    }

    fn step(weights: &Weights, prev: &[f64], state: usize, symbol: usize) -> (f64, ()) {
        let terms: Vec<f64> = prev
            .iter()
            .enumerate()
            .map(|(from, &alpha)| alpha + weights.transition(from, state))
            .collect();
        (log_sum_exp(&terms) + weights.emission(state, symbol), ())
    }

    fn terminate(last: &[f64]) -> (f64, usize) {
        (log_sum_exp(last), 0)
    }

    fn empty() -> f64 {
        f64::NEG_INFINITY
    }
}
