//! Assorted numeric helpers shared by the recurrences.

/// Index of the first maximum in `values`, together with that maximum.
///
/// Ties resolve to the lowest index. Returns `(f64::NEG_INFINITY, 0)` for an
/// empty slice so callers never see an out-of-range index.
#[inline]
pub fn argmax_first(values: impl IntoIterator<Item = f64>) -> (f64, usize) {
    let mut best = f64::NEG_INFINITY;
    let mut arg = 0;
    for (i, v) in values.into_iter().enumerate() {
        if i == 0 || v > best {
            best = v;
            arg = i;
        }
    }
    (best, arg)
}

/// Numerically stable `ln(Σ exp(x_i))`.
///
/// Returns `-inf` if the input is empty or every term is `-inf`.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.iter().map(|&x| (x - max).exp()).sum();
    max + sum.ln()
}

/// Natural log of a probability, mapping `0.0` to `-inf`.
#[inline]
pub fn ln_prob(p: f64) -> f64 {
    if p == 0.0 {
        f64::NEG_INFINITY
    } else {
        p.ln()
    }
}
