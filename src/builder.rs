use std::hash::Hash;

use crate::error::{ConfigError, Result};
use crate::model::ModelTables;
use crate::HmmEngine;

/// Assemble an [`HmmEngine`] table by table.
///
/// Every table is required; `build` reports the first missing one before
/// running the usual dimension checks.
pub struct HmmEngineBuilder<O, H> {
    observation_states: Option<Vec<O>>,
    hidden_states: Option<Vec<H>>,
    prior: Option<Vec<f64>>,
    transition: Option<Vec<Vec<f64>>>,
    emission: Option<Vec<Vec<f64>>>,
}

impl<O, H> Default for HmmEngineBuilder<O, H> {
    fn default() -> Self {
        Self {
            observation_states: None,
            hidden_states: None,
            prior: None,
            transition: None,
            emission: None,
        }
    }
}

impl<O, H> HmmEngineBuilder<O, H>
where
    O: Eq + Hash + Clone,
    H: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_observations(mut self, symbols: impl IntoIterator<Item = O>) -> Self {
        self.observation_states = Some(symbols.into_iter().collect());
        self
    }
    pub fn with_hidden_states(mut self, labels: impl IntoIterator<Item = H>) -> Self {
        self.hidden_states = Some(labels.into_iter().collect());
        self
    }
    pub fn with_prior(mut self, prior: Vec<f64>) -> Self {
        self.prior = Some(prior);
        self
    }
    pub fn with_transition(mut self, transition: Vec<Vec<f64>>) -> Self {
        self.transition = Some(transition);
        self
    }
    pub fn with_emission(mut self, emission: Vec<Vec<f64>>) -> Self {
        self.emission = Some(emission);
        self
    }
    pub fn build(self) -> Result<HmmEngine<O, H>, O> {
        let tables = ModelTables {
            observation_states: self
                .observation_states
                .ok_or(ConfigError::MissingTable("observation_states"))?,
            hidden_states: self
                .hidden_states
                .ok_or(ConfigError::MissingTable("hidden_states"))?,
            prior: self.prior.ok_or(ConfigError::MissingTable("prior"))?,
            transition: self
                .transition
                .ok_or(ConfigError::MissingTable("transition"))?,
            emission: self.emission.ok_or(ConfigError::MissingTable("emission"))?,
        };
        HmmEngine::new(tables)
    }
}
