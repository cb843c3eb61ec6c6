//! Error types for model construction and sequence queries.

use thiserror::Error;

/// Convenience alias; `O` is the observation symbol type.
pub type Result<T, O> = std::result::Result<T, HmmError<O>>;

/// Errors returned by [`HmmEngine`](crate::engine::HmmEngine) and its builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError<O> {
    /// The input sequence contains a symbol outside the observation alphabet.
    ///
    /// Raised before any lattice is filled; no partial result exists.
    #[error("unknown observation {symbol:?} at position {position}")]
    UnknownObservation { symbol: O, position: usize },

    /// The model tables are dimensionally inconsistent or hold invalid entries.
    #[error("invalid model configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// A state path passed to `path_probability` does not match the sequence.
    #[error("state path has length {found}, expected {expected}")]
    PathLength { expected: usize, found: usize },

    /// A state index passed to `path_probability` is out of range.
    #[error("state index {index} out of range for {n_states} hidden states")]
    UnknownState { index: usize, n_states: usize },
}

/// Reasons a set of model tables is rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("hidden-state space is empty")]
    NoHiddenStates,

    #[error("observation symbol at index {duplicate} repeats index {first}")]
    DuplicateObservation { first: usize, duplicate: usize },

    #[error("hidden-state label at index {duplicate} repeats index {first}")]
    DuplicateHiddenState { first: usize, duplicate: usize },

    #[error("prior has length {found}, expected {expected}")]
    PriorLength { expected: usize, found: usize },

    #[error("transition matrix has {found} rows, expected {expected}")]
    TransitionRows { expected: usize, found: usize },

    #[error("transition row {row} has length {found}, expected {expected}")]
    TransitionRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("emission matrix has {found} rows, expected {expected}")]
    EmissionRows { expected: usize, found: usize },

    #[error("emission row {row} has length {found}, expected {expected}")]
    EmissionRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Entries must be finite and non-negative; rows need not sum to one.
    #[error("{table}[{row}][{col}] = {value} is not a finite non-negative probability")]
    InvalidProbability {
        table: &'static str,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("model table `{0}` was not supplied")]
    MissingTable(&'static str),
}
