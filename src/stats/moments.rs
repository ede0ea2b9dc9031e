use super::mean;

/// Arithmetic mean and sample variance of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanVariance {
    pub mean: f64,
    /// Sample variance (divisor `n - 1`).
    pub variance: f64,
}

/// Mean and sample variance (Bessel's correction).
///
/// Returns `None` for an empty slice. A single value has variance `0`.
pub fn mean_and_variance(values: &[f64]) -> Option<MeanVariance> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let mean = mean(values);
    if n == 1 {
        return Some(MeanVariance {
            mean,
            variance: 0.0,
        });
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(MeanVariance {
        mean,
        variance: sum_sq / (n - 1) as f64,
    })
}

// ---------------------------------------------------------------------------
// Shape: skewness and kurtosis from central moments
// ---------------------------------------------------------------------------

/// Central moments (divisor `n`) and the shape coefficients derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStats {
    pub n: usize,
    pub mean: f64,
    pub m2: f64,
    pub m3: f64,
    pub m4: f64,
    /// g1 = m3 / m2^(3/2)
    pub skewness: f64,
    /// g2 = m4 / m2^2 - 3
    pub excess_kurtosis: f64,
    /// Fisher-Pearson adjusted G1, `NaN` below three values.
    pub adjusted_skewness: f64,
    /// Adjusted G2, `NaN` below four values.
    pub adjusted_excess_kurtosis: f64,
}

impl ShapeStats {
    /// Short reading of the skewness sign, with a dead band of ±0.1.
    pub fn symmetry_label(&self) -> &'static str {
        if self.skewness.is_nan() {
            "undefined"
        } else if self.skewness.abs() < 0.1 {
            "roughly symmetric"
        } else if self.skewness > 0.0 {
            "right-skewed"
        } else {
            "left-skewed"
        }
    }

    pub fn tail_label(&self) -> &'static str {
        if self.excess_kurtosis.is_nan() {
            "undefined"
        } else if self.excess_kurtosis.abs() < 0.1 {
            "mesokurtic"
        } else if self.excess_kurtosis > 0.0 {
            "leptokurtic"
        } else {
            "platykurtic"
        }
    }
}

pub fn shape_stats(values: &[f64]) -> Option<ShapeStats> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let mean = mean(values);
    let moment = |k: i32| values.iter().map(|v| (v - mean).powi(k)).sum::<f64>() / n as f64;
    let (m2, m3, m4) = (moment(2), moment(3), moment(4));

    let skewness = m3 / m2.powf(1.5);
    let excess_kurtosis = m4 / m2.powi(2) - 3.0;

    let nf = n as f64;
    let adjusted_skewness = if n < 3 {
        f64::NAN
    } else {
        (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * skewness
    };
    let adjusted_excess_kurtosis = if n < 4 {
        f64::NAN
    } else {
        (nf - 1.0) / ((nf - 2.0) * (nf - 3.0)) * ((nf + 1.0) * excess_kurtosis + 6.0)
    };

    Some(ShapeStats {
        n,
        mean,
        m2,
        m3,
        m4,
        skewness,
        excess_kurtosis,
        adjusted_skewness,
        adjusted_excess_kurtosis,
    })
}
