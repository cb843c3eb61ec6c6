//! Model tables and their validated, immutable in-memory form.
//!
//! [`ModelTables`] is the labeled bundle an external loader hands over.
//! [`HmmModel`] checks it once, builds the symbol and label lookups, and stores
//! the probabilities as dense row-major buffers alongside their natural logs.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ConfigError, HmmError, Result};
use crate::utils::ln_prob;

/// The five tables that define a discrete HMM, as supplied by a loader.
///
/// Matrices are given row by row: `transition[i][j]` is the probability of
/// moving from state `i` to state `j`, `emission[j][k]` the probability that
/// state `j` emits `observation_states[k]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ModelTables<O, H> {
    pub observation_states: Vec<O>,
    pub hidden_states: Vec<H>,
    pub prior: Vec<f64>,
    pub transition: Vec<Vec<f64>>,
    pub emission: Vec<Vec<f64>>,
}

/// Which arithmetic a recurrence works in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Plain probabilities in `[0, 1]`.
    Probability,
    /// Natural-log probabilities; `-inf` stands for an impossible event.
    Log,
}

/// Dense model weights in one [`Domain`].
#[derive(Clone, Debug)]
pub struct Weights {
    n_states: usize,
    n_symbols: usize,
    /// prior[i]
    prior: Vec<f64>,
    /// transition[i * n_states + j]
    transition: Vec<f64>,
    /// emission[j * n_symbols + k]
    emission: Vec<f64>,
}

impl Weights {
    #[inline]
    pub fn prior(&self, state: usize) -> f64 {
        self.prior[state]
    }

    #[inline]
    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from * self.n_states + to]
    }

    #[inline]
    pub fn emission(&self, state: usize, symbol: usize) -> f64 {
        self.emission[state * self.n_symbols + symbol]
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            n_states: self.n_states,
            n_symbols: self.n_symbols,
            prior: self.prior.iter().copied().map(&f).collect(),
            transition: self.transition.iter().copied().map(&f).collect(),
            emission: self.emission.iter().copied().map(&f).collect(),
        }
    }
}

/// A validated discrete HMM.
#[derive(Clone, Debug)]
pub struct HmmModel<O, H> {
    observations: Vec<O>,
    hidden_states: Vec<H>,
    symbol_index: HashMap<O, usize>,
    state_index: HashMap<H, usize>,
    probs: Weights,
    logs: Weights,
}

impl<O, H> HmmModel<O, H>
where
    O: Eq + Hash + Clone,
    H: Eq + Hash + Clone,
{
    /// Validate `tables` and build the lookup structures.
    ///
    /// Rows are not required to sum to one; entries only need to be finite and
    /// non-negative.
    pub fn new(tables: ModelTables<O, H>) -> Result<Self, O> {
        let ModelTables {
            observation_states,
            hidden_states,
            prior,
            transition,
            emission,
        } = tables;

        let n = hidden_states.len();
        let m = observation_states.len();
        if n == 0 {
            return Err(ConfigError::NoHiddenStates.into());
        }

        let symbol_index = index_distinct(&observation_states)
            .map_err(|(first, duplicate)| ConfigError::DuplicateObservation { first, duplicate })?;
        let state_index = index_distinct(&hidden_states)
            .map_err(|(first, duplicate)| ConfigError::DuplicateHiddenState { first, duplicate })?;

        if prior.len() != n {
            return Err(ConfigError::PriorLength {
                expected: n,
                found: prior.len(),
            }
            .into());
        }
        check_entries("prior", 0, &prior)?;

        if transition.len() != n {
            return Err(ConfigError::TransitionRows {
                expected: n,
                found: transition.len(),
            }
            .into());
        }
        for (row, values) in transition.iter().enumerate() {
            if values.len() != n {
                return Err(ConfigError::TransitionRowLength {
                    row,
                    expected: n,
                    found: values.len(),
                }
                .into());
            }
            check_entries("transition", row, values)?;
        }

        if emission.len() != n {
            return Err(ConfigError::EmissionRows {
                expected: n,
                found: emission.len(),
            }
            .into());
        }
        for (row, values) in emission.iter().enumerate() {
            if values.len() != m {
                return Err(ConfigError::EmissionRowLength {
                    row,
                    expected: m,
                    found: values.len(),
                }
                .into());
            }
            check_entries("emission", row, values)?;
        }

        let probs = Weights {
            n_states: n,
            n_symbols: m,
            prior,
            transition: transition.into_iter().flatten().collect(),
            emission: emission.into_iter().flatten().collect(),
        };
        let logs = probs.map(ln_prob);

        #[cfg(feature = "tracing")]
        tracing::debug!(n_states = n, n_symbols = m, "hmm model constructed");

        Ok(Self {
            observations: observation_states,
            hidden_states,
            symbol_index,
            state_index,
            probs,
            logs,
        })
    }

    /// Map every symbol of `sequence` to its column index.
    ///
    /// The whole sequence is encoded before any arithmetic happens; the first
    /// unknown symbol is reported with its position.
    pub fn encode(&self, sequence: &[O]) -> Result<Vec<usize>, O> {
        sequence
            .iter()
            .enumerate()
            .map(|(position, symbol)| {
                self.symbol_index
                    .get(symbol)
                    .copied()
                    .ok_or_else(|| HmmError::UnknownObservation {
                        symbol: symbol.clone(),
                        position,
                    })
            })
            .collect()
    }

    /// Map row indices back to hidden-state labels.
    ///
    /// Indices are produced by the lattice and are always in range.
    pub fn decode_states(&self, states: &[usize]) -> Vec<H> {
        states
            .iter()
            .map(|&s| self.hidden_states[s].clone())
            .collect()
    }

    pub fn symbol_index(&self, symbol: &O) -> Option<usize> {
        self.symbol_index.get(symbol).copied()
    }

    pub fn state_index(&self, label: &H) -> Option<usize> {
        self.state_index.get(label).copied()
    }
}

impl<O, H> HmmModel<O, H> {
    /// Number of hidden states `N`.
    pub fn n_states(&self) -> usize {
        self.hidden_states.len()
    }

    /// Size of the observation alphabet `M`.
    pub fn n_symbols(&self) -> usize {
        self.observations.len()
    }

    pub fn observations(&self) -> &[O] {
        &self.observations
    }

    pub fn hidden_states(&self) -> &[H] {
        &self.hidden_states
    }

    /// Model weights in the requested domain.
    pub fn weights(&self, domain: Domain) -> &Weights {
        match domain {
            Domain::Probability => &self.probs,
            Domain::Log => &self.logs,
        }
    }
}

/// Build a value → position map, failing with `(first, duplicate)` positions.
fn index_distinct<T: Eq + Hash + Clone>(
    values: &[T],
) -> std::result::Result<HashMap<T, usize>, (usize, usize)> {
    let mut index = HashMap::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        if let Some(&first) = index.get(v) {
            return Err((first, i));
        }
        index.insert(v.clone(), i);
    }
    Ok(index)
}

fn check_entries(
    table: &'static str,
    row: usize,
    values: &[f64],
) -> std::result::Result<(), ConfigError> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        Some((col, &value)) => Err(ConfigError::InvalidProbability {
            table,
            row,
            col,
            value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ModelTables<&'static str, &'static str> {
        ModelTables {
            observation_states: vec!["sun", "rain"],
            hidden_states: vec!["sunny", "rainy"],
            prior: vec![0.6, 0.4],
            transition: vec![vec![0.7, 0.3], vec![0.4, 0.6]],
            emission: vec![vec![0.8, 0.2], vec![0.3, 0.7]],
        }
    }

    #[test]
    fn weights_are_row_major() {
        let model = HmmModel::new(tables()).unwrap();
        let w = model.weights(Domain::Probability);
        assert_eq!(w.transition(0, 1), 0.3);
        assert_eq!(w.transition(1, 0), 0.4);
        assert_eq!(w.emission(1, 1), 0.7);
        assert_eq!(w.prior(1), 0.4);
    }

    #[test]
    fn log_weights_mirror_probabilities() {
        let mut t = tables();
        t.transition[0] = vec![1.0, 0.0];
        let model = HmmModel::new(t).unwrap();
        let w = model.weights(Domain::Log);
        assert_eq!(w.transition(0, 0), 0.0);
        assert_eq!(w.transition(0, 1), f64::NEG_INFINITY);
        assert!((w.emission(0, 0) - 0.8f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn encode_reports_first_unknown_symbol() {
        let model = HmmModel::new(tables()).unwrap();
        assert_eq!(model.encode(&["rain", "sun"]).unwrap(), vec![1, 0]);
        let err = model.encode(&["sun", "snow", "hail"]).unwrap_err();
        assert_eq!(
            err,
            HmmError::UnknownObservation {
                symbol: "snow",
                position: 1
            }
        );
    }

    #[test]
    fn lookups_are_bijective() {
        let model = HmmModel::new(tables()).unwrap();
        assert_eq!(model.symbol_index(&"rain"), Some(1));
        assert_eq!(model.state_index(&"sunny"), Some(0));
        assert_eq!(model.decode_states(&[1, 0, 1]), vec!["rainy", "sunny", "rainy"]);
    }

    #[test]
    fn rejects_duplicates() {
        let mut t = tables();
        t.hidden_states = vec!["sunny", "sunny"];
        assert_eq!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::DuplicateHiddenState {
                first: 0,
                duplicate: 1
            })
        );

        let mut t = tables();
        t.observation_states = vec!["sun", "sun"];
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::DuplicateObservation { .. })
        ));
    }

    #[test]
    fn rejects_inconsistent_dimensions() {
        let mut t = tables();
        t.prior.push(0.0);
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::PriorLength {
                expected: 2,
                found: 3
            })
        ));

        let mut t = tables();
        t.transition[1].pop();
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::TransitionRowLength { row: 1, .. })
        ));

        let mut t = tables();
        t.emission.pop();
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::EmissionRows { .. })
        ));

        let mut t = tables();
        t.emission[0].push(0.1);
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::EmissionRowLength { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_negative_and_nan_entries() {
        let mut t = tables();
        t.transition[1][0] = -0.1;
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::InvalidProbability {
                table: "transition",
                row: 1,
                col: 0,
                ..
            })
        ));

        let mut t = tables();
        t.prior[0] = f64::NAN;
        assert!(matches!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::InvalidProbability { table: "prior", .. })
        ));
    }

    #[test]
    fn accepts_non_stochastic_rows() {
        let mut t = tables();
        t.prior = vec![3.0, 0.0];
        t.emission[1] = vec![0.0, 0.0];
        assert!(HmmModel::new(t).is_ok());
    }

    #[test]
    fn rejects_empty_hidden_space() {
        let t: ModelTables<&str, &str> = ModelTables {
            observation_states: vec!["sun"],
            hidden_states: vec![],
            prior: vec![],
            transition: vec![],
            emission: vec![],
        };
        assert_eq!(
            HmmModel::new(t).unwrap_err(),
            HmmError::Configuration(ConfigError::NoHiddenStates)
        );
    }
}
