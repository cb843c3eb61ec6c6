//! Forward evaluation and Viterbi decoding over a fixed model.
//!
//! Every query follows the same three phases:
//! 1. Encode the whole observation sequence to column indices (fail fast on
//!    unknown symbols).
//! 2. Fill a freshly allocated [`Lattice`] column by column with a
//!    [`Recurrence`].
//! 3. Fold the last column, and for max-product recurrences walk the
//!    backpointers to recover the path.
//!
//! The engine never mutates its model, so one instance can serve concurrent
//! callers without locking.

use std::hash::Hash;

use crate::error::{HmmError, Result};
use crate::lattice::Lattice;
use crate::model::{Domain, HmmModel, ModelTables, Weights};
use crate::recurrences::{LogMaxProduct, LogSumProduct, MaxProduct, SumProduct};
use crate::traits::Recurrence;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Columns with at least this many states are filled in parallel when the
/// `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub const PARALLEL_MIN_STATES: usize = 64;

/// Most probable hidden-state path for an observation sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ViterbiPath<H> {
    /// Hidden-state labels, one per time step.
    pub states: Vec<H>,
    /// Row indices of `states` in the hidden-state space.
    pub indices: Vec<usize>,
    /// Joint probability of the path and the sequence; a natural log for
    /// [`HmmEngine::log_viterbi`].
    pub probability: f64,
}

/// HMM query engine over an immutable model.
///
/// Typical usage:
/// ```
/// use hmm_lattice::{HmmEngine, ModelTables};
///
/// let engine = HmmEngine::new(ModelTables {
///     observation_states: vec!["walk", "shop", "clean"],
///     hidden_states: vec!["rainy", "sunny"],
///     prior: vec![0.6, 0.4],
///     transition: vec![vec![0.7, 0.3], vec![0.4, 0.6]],
///     emission: vec![vec![0.1, 0.4, 0.5], vec![0.6, 0.3, 0.1]],
/// })
/// .unwrap();
///
/// let likelihood = engine.forward(&["walk", "shop", "clean"]).unwrap();
/// assert!((likelihood - 0.033612).abs() < 1e-9);
/// let path = engine.viterbi(&["walk", "shop", "clean"]).unwrap();
/// assert_eq!(path, vec!["sunny", "rainy", "rainy"]);
/// ```
#[derive(Clone, Debug)]
pub struct HmmEngine<O, H> {
    model: HmmModel<O, H>,
}

impl<O, H> HmmEngine<O, H>
where
    O: Eq + Hash + Clone,
    H: Eq + Hash + Clone,
{
    /// Validate `tables` and build an engine.
    pub fn new(tables: ModelTables<O, H>) -> Result<Self, O> {
        Ok(Self::from_model(HmmModel::new(tables)?))
    }

    /// Wrap an already validated model.
    pub fn from_model(model: HmmModel<O, H>) -> Self {
        Self { model }
    }

    /// Likelihood of `sequence`, summed over all hidden-state paths.
    ///
    /// Returns `0.0` for an empty sequence. Plain probabilities are used, so
    /// very long sequences underflow toward zero; see [`Self::log_forward`].
    pub fn forward(&self, sequence: &[O]) -> Result<f64, O> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("hmm_forward", len = sequence.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let symbols = self.model.encode(sequence)?;
        Ok(self.evaluate::<SumProduct>(&symbols).0)
    }

    /// Natural log of the likelihood of `sequence`.
    ///
    /// Returns `-inf` for an empty sequence, matching `ln(forward(..))`.
    pub fn log_forward(&self, sequence: &[O]) -> Result<f64, O> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("hmm_log_forward", len = sequence.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let symbols = self.model.encode(sequence)?;
        Ok(self.evaluate::<LogSumProduct>(&symbols).0)
    }

    /// Most probable hidden-state labels for `sequence`.
    ///
    /// The result has one label per observation; an empty sequence yields an
    /// empty path. Ties resolve to the lowest state index.
    pub fn viterbi(&self, sequence: &[O]) -> Result<Vec<H>, O> {
        Ok(self.decode(sequence)?.states)
    }

    /// Like [`Self::viterbi`], also returning state indices and the path's
    /// joint probability.
    pub fn decode(&self, sequence: &[O]) -> Result<ViterbiPath<H>, O> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("hmm_viterbi", len = sequence.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let symbols = self.model.encode(sequence)?;
        Ok(self.best_path::<MaxProduct>(&symbols))
    }

    /// Viterbi decoding in log space; `probability` holds the log joint
    /// probability (`-inf` for an empty sequence).
    pub fn log_viterbi(&self, sequence: &[O]) -> Result<ViterbiPath<H>, O> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("hmm_log_viterbi", len = sequence.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let symbols = self.model.encode(sequence)?;
        Ok(self.best_path::<LogMaxProduct>(&symbols))
    }

    /// Joint probability of `sequence` together with the hidden-state path
    /// `states` (row indices).
    ///
    /// Returns `0.0` for an empty sequence.
    pub fn path_probability(&self, sequence: &[O], states: &[usize]) -> Result<f64, O> {
        let symbols = self.model.encode(sequence)?;
        if states.len() != symbols.len() {
            return Err(HmmError::PathLength {
                expected: symbols.len(),
                found: states.len(),
            });
        }
        let n = self.model.n_states();
        if let Some(&index) = states.iter().find(|&&s| s >= n) {
            return Err(HmmError::UnknownState { index, n_states: n });
        }
        if symbols.is_empty() {
            return Ok(0.0);
        }

        let w = self.model.weights(Domain::Probability);
        let mut p = w.prior(states[0]) * w.emission(states[0], symbols[0]);
        for t in 1..symbols.len() {
            p *= w.transition(states[t - 1], states[t]) * w.emission(states[t], symbols[t]);
        }
        Ok(p)
    }

    pub fn symbol_index(&self, symbol: &O) -> Option<usize> {
        self.model.symbol_index(symbol)
    }

    pub fn state_index(&self, label: &H) -> Option<usize> {
        self.model.state_index(label)
    }

    fn best_path<R>(&self, symbols: &[usize]) -> ViterbiPath<H>
    where
        R: Recurrence<Witness = usize>,
    {
        let (probability, lattice, last) = self.evaluate::<R>(symbols);

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("traceback", last);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let indices = lattice.traceback(last);
        ViterbiPath {
            states: self.model.decode_states(&indices),
            indices,
            probability,
        }
    }
}

impl<O, H> HmmEngine<O, H> {
    /// Expose the underlying model.
    pub fn model(&self) -> &HmmModel<O, H> {
        &self.model
    }

    pub fn n_states(&self) -> usize {
        self.model.n_states()
    }

    pub fn n_symbols(&self) -> usize {
        self.model.n_symbols()
    }

    pub fn hidden_states(&self) -> &[H] {
        self.model.hidden_states()
    }

    pub fn observations(&self) -> &[O] {
        self.model.observations()
    }

    /// Fill a lattice for encoded `symbols` and fold its last column.
    ///
    /// Returns `(result, lattice, last_state)`. For an empty input the lattice
    /// has no columns and the result is [`Recurrence::empty`].
    fn evaluate<R: Recurrence>(&self, symbols: &[usize]) -> (f64, Lattice<R::Witness>, usize) {
        let lattice = self.fill::<R>(symbols);
        if lattice.is_empty() {
            return (R::empty(), lattice, 0);
        }
        let (value, last) = R::terminate(lattice.column(lattice.len() - 1));
        (value, lattice, last)
    }

    /// Run recurrence `R` over every time step.
    fn fill<R: Recurrence>(&self, symbols: &[usize]) -> Lattice<R::Witness> {
        let n = self.model.n_states();
        let weights = self.model.weights(R::DOMAIN);
        let mut lattice = Lattice::new(n, symbols.len());

        let Some(&first) = symbols.first() else {
            return lattice;
        };

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("fill_lattice", n_states = n, steps = symbols.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        for (state, cell) in lattice.first_column_mut().iter_mut().enumerate() {
            *cell = R::init(weights, state, first);
        }

        for (t, &symbol) in symbols.iter().enumerate().skip(1) {
            let (prev, cur, wit) = lattice.step_columns(t);
            fill_column::<R>(weights, prev, cur, wit, symbol);
        }

        lattice
    }
}

#[cfg(feature = "parallel")]
fn fill_column<R: Recurrence>(
    weights: &Weights,
    prev: &[f64],
    cur: &mut [f64],
    wit: &mut [R::Witness],
    symbol: usize,
) {
    if cur.len() < PARALLEL_MIN_STATES {
        return fill_column_serial::<R>(weights, prev, cur, wit, symbol);
    }
    cur.par_iter_mut()
        .zip(wit.par_iter_mut())
        .enumerate()
        .for_each(|(state, (score, witness))| {
            (*score, *witness) = R::step(weights, prev, state, symbol);
        });
}

#[cfg(not(feature = "parallel"))]
fn fill_column<R: Recurrence>(
    weights: &Weights,
    prev: &[f64],
    cur: &mut [f64],
    wit: &mut [R::Witness],
    symbol: usize,
) {
    fill_column_serial::<R>(weights, prev, cur, wit, symbol)
}

/// Compute every cell of one column in state order.
fn fill_column_serial<R: Recurrence>(
    weights: &Weights,
    prev: &[f64],
    cur: &mut [f64],
    wit: &mut [R::Witness],
    symbol: usize,
) {
    for (state, (score, witness)) in cur.iter_mut().zip(wit.iter_mut()).enumerate() {
        (*score, *witness) = R::step(weights, prev, state, symbol);
    }
}
