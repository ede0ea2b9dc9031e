//! Statistics engine: point estimates over `f64` slices.
//!
//! `NaN` inputs are not filtered: they propagate into every result they
//! touch. Empty inputs yield `None` (or empty containers), never `NaN`.

pub mod histogram;
pub mod moments;
pub mod ranking;
pub mod regression;

pub use histogram::{histogram, Histogram};
pub use moments::{mean_and_variance, shape_stats, MeanVariance, ShapeStats};
pub use ranking::smallest_by;
pub use regression::{linear_fit, LinearFit};

/// Minimum that propagates `NaN` instead of skipping it.
pub(crate) fn nan_min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.min(v)
        }
    })
}

/// Maximum that propagates `NaN` instead of skipping it.
pub(crate) fn nan_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
