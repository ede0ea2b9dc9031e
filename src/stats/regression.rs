use super::mean;

/// Least-squares line `y = slope * x + intercept` with its fit measures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Number of pairs used.
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Centred sums `Σ(x−x̄)²`, `Σ(y−ȳ)²` and `Σ(x−x̄)(y−ȳ)`.
    pub sxx: f64,
    pub syy: f64,
    pub sxy: f64,
    /// Total sum of squares (equal to `syy`).
    pub sst: f64,
    /// Residual (error) sum of squares `Σ(y−ŷ)²`.
    pub sse: f64,
    /// Regression sum of squares `sst − sse`.
    pub ssr: f64,
    /// Residual variance `sse / (n − 2)`; `NaN` with fewer than three pairs.
    pub residual_variance: f64,
    pub residual_std_dev: f64,
    /// Coefficient of determination. `NaN` when `y` is constant.
    pub r_squared: f64,
    /// Pearson correlation `sxy / √(sxx·syy)`.
    pub r: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over paired samples, using centred sums.
///
/// Pairs beyond the shorter slice are ignored. When every `x` is equal the
/// slope is `NaN` (0/0), and so is everything derived from it.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> LinearFit {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let x_bar = mean(xs);
    let y_bar = mean(ys);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - x_bar;
        let dy = y - y_bar;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;
    let sse: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| {
            let residual = y - (slope * x + intercept);
            residual * residual
        })
        .sum();
    let residual_variance = if n > 2 {
        sse / (n - 2) as f64
    } else {
        f64::NAN
    };

    LinearFit {
        n,
        slope,
        intercept,
        sxx,
        syy,
        sxy,
        sst: syy,
        sse,
        ssr: syy - sse,
        residual_variance,
        residual_std_dev: residual_variance.sqrt(),
        r_squared: (sxy * sxy) / (sxx * syy),
        r: sxy / (sxx * syy).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_an_exact_line() {
        let xs = [0.0, 1.0, 2.5, 4.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let fit = linear_fit(&xs, &ys);
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r, 1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.sse, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 21.0, epsilon = 1e-9);
    }

    #[test]
    fn noisy_points_fit_between() {
        let fit = linear_fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 3.0, 5.0, 6.0]);
        // sxy = 7, sxx = 5
        assert_relative_eq!(fit.slope, 1.4);
        assert_relative_eq!(fit.intercept, 0.5, epsilon = 1e-12);
        assert!(fit.r_squared > 0.9 && fit.r_squared < 1.0);
    }

    #[test]
    fn sums_of_squares_and_residual_spread() {
        // Fitted values 1.9, 3.3, 4.7, 6.1 leave residuals ±0.1 and ±0.3.
        let fit = linear_fit(&[1.0, 2.0, 3.0, 4.0], &[2.0, 3.0, 5.0, 6.0]);
        assert_eq!(fit.n, 4);
        assert_relative_eq!(fit.sxx, 5.0);
        assert_relative_eq!(fit.syy, 10.0);
        assert_relative_eq!(fit.sxy, 7.0);
        assert_relative_eq!(fit.sst, 10.0);
        assert_relative_eq!(fit.sse, 0.2, epsilon = 1e-12);
        assert_relative_eq!(fit.ssr, 9.8, epsilon = 1e-12);
        assert_relative_eq!(fit.ssr / fit.sst, fit.r_squared, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 0.98, epsilon = 1e-12);
        assert_relative_eq!(fit.residual_variance, 0.1, epsilon = 1e-12);
        assert_relative_eq!(fit.residual_std_dev, 0.1f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(fit.r, 7.0 / 50f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn two_points_have_no_residual_variance() {
        let fit = linear_fit(&[1.0, 2.0], &[3.0, 5.0]);
        assert_relative_eq!(fit.slope, 2.0);
        assert_relative_eq!(fit.r, 1.0, epsilon = 1e-12);
        assert!(fit.residual_variance.is_nan());
        assert!(fit.residual_std_dev.is_nan());
    }

    #[test]
    fn negative_relation_has_negative_r() {
        let fit = linear_fit(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]);
        assert_relative_eq!(fit.r, -1.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn vertical_input_has_nan_slope() {
        let fit = linear_fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!(fit.slope.is_nan());
        assert!(fit.intercept.is_nan());
        assert!(fit.r.is_nan());
    }

    #[test]
    fn constant_response_has_zero_slope() {
        let fit = linear_fit(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.0);
        assert!(fit.r_squared.is_nan());
        assert_eq!(fit.residual_variance, 0.0);
    }
}
