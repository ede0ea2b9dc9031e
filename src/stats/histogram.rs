use super::{nan_max, nan_min};

/// Equal-width histogram with one display label per bin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// `"a–b"` bin bounds with one decimal.
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
    /// Left edge of the first bin.
    pub min: f64,
    pub width: f64,
}

impl Histogram {
    /// `(label, count)` pairs in bin order.
    pub fn bins(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// Bin `values` into `bin_count` equal-width bins spanning `[min, max]`.
///
/// Bins are half-open on the right except the last, which also takes the
/// maximum. When every value is equal the width falls back to `1`. Empty
/// input (or zero bins) gives an empty histogram. Values that cannot be
/// placed, such as `NaN`, are not counted.
pub fn histogram(values: &[f64], bin_count: usize) -> Histogram {
    if values.is_empty() || bin_count == 0 {
        return Histogram::default();
    }

    let min = nan_min(values);
    let max = nan_max(values);
    let raw_width = (max - min) / bin_count as f64;
    // Zero range, and NaN ranges from poisoned input, fall back to width 1.
    let width = if raw_width == 0.0 || raw_width.is_nan() {
        1.0
    } else {
        raw_width
    };

    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let pos = ((v - min) / width).floor();
        if !(pos >= 0.0) {
            continue;
        }
        let mut idx = pos as usize;
        if idx == bin_count {
            idx = bin_count - 1;
        }
        if let Some(slot) = counts.get_mut(idx) {
            *slot += 1;
        }
    }

    let labels = (0..bin_count)
        .map(|i| {
            let a = min + i as f64 * width;
            let b = a + width;
            format!("{a:.1}–{b:.1}")
        })
        .collect();

    Histogram {
        labels,
        counts,
        min,
        width,
    }
}
