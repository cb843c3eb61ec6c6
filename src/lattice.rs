//! Call-local dynamic-programming lattice.
//!
//! A [`Lattice`] holds one score and one witness per (state, time) cell. It is
//! stored time-major so that each column (all states at one time step) is a
//! contiguous slice: a step reads column `t - 1` and writes column `t`.

/// Dense `n_states × n_steps` table of scores plus per-cell witnesses.
#[derive(Debug, Clone)]
pub struct Lattice<W> {
    n_states: usize,
    n_steps: usize,
    scores: Vec<f64>,
    witnesses: Vec<W>,
}

impl<W: Copy + Default> Lattice<W> {
    /// Allocate a zero-filled lattice.
    pub fn new(n_states: usize, n_steps: usize) -> Self {
        let cells = n_states * n_steps;
        Self {
            n_states,
            n_steps,
            scores: vec![0.0; cells],
            witnesses: vec![W::default(); cells],
        }
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of time steps `T`.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_steps
    }

    /// Returns true if the lattice has no time steps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_steps == 0
    }

    #[inline]
    pub fn score(&self, state: usize, t: usize) -> f64 {
        self.scores[t * self.n_states + state]
    }

    #[inline]
    pub fn witness(&self, state: usize, t: usize) -> W {
        self.witnesses[t * self.n_states + state]
    }

    /// Scores of every state at time `t`.
    #[inline]
    pub fn column(&self, t: usize) -> &[f64] {
        let n = self.n_states;
        &self.scores[t * n..(t + 1) * n]
    }

    /// Mutable scores of column 0.
    #[inline]
    pub fn first_column_mut(&mut self) -> &mut [f64] {
        let n = self.n_states;
        &mut self.scores[..n]
    }

    /// Split at time `t > 0`: the finished column `t - 1`, and mutable
    /// scores and witnesses for column `t`.
    ///
    /// # Panics
    /// Panics if `t == 0` or `t >= len()`.
    pub fn step_columns(&mut self, t: usize) -> (&[f64], &mut [f64], &mut [W]) {
        assert!(t > 0 && t < self.n_steps, "step column {t} out of range");
        let n = self.n_states;
        let (done, rest) = self.scores.split_at_mut(t * n);
        let done: &[f64] = done;
        let prev = &done[(t - 1) * n..];
        let cur = &mut rest[..n];
        let wit = &mut self.witnesses[t * n..(t + 1) * n];
        (prev, cur, wit)
    }

    /// Follow witnesses back from `last` at the final time step.
    ///
    /// Only meaningful when `W` is a predecessor index; returns the state
    /// index for every time step in forward order.
    pub fn traceback(&self, last: usize) -> Vec<usize>
    where
        W: Into<usize>,
    {
        if self.n_steps == 0 {
            return Vec::new();
        }
        let mut path = Vec::with_capacity(self.n_steps);
        let mut state = last;
        path.push(state);
        for t in (1..self.n_steps).rev() {
            state = self.witness(state, t).into();
            path.push(state);
        }
        path.reverse();
        path
    }
}
