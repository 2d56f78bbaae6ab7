//! Number accumulators implementing the combination rules of each
//! aggregated quantity.
//!
//! | Accumulator           | Used for                           | `combine()`        |
//! |-----------------------|------------------------------------|--------------------|
//! | [`ArithmeticMean`]    | SST, anomaly, large-scale, sea ice | `Σ(w·x) / Σw`      |
//! | [`WeightedUncertainty`] | random and propagated uncertainties | `sqrt(Σ(w·x)²) / Σw` |
//! | [`QuadratureSum`]     | synoptic and adjustment inputs     | `sqrt(Σx²)`        |
//!
//! NaN samples or weights are ignored and do not count as samples. Combining
//! an accumulator that has not seen any sample yields NaN.

use crate::error::{AggregationError, Result};

/// Mutable accumulator of weighted samples.
pub trait NumberAccumulator {
    /// Add one sample with the given weight.
    fn accumulate(&mut self, sample: f64, weight: f64) -> Result<()>;

    /// Number of accepted samples.
    fn sample_count(&self) -> usize;

    /// Combined value of all accepted samples.
    fn combine(&self) -> f64;
}

#[inline]
fn is_missing(sample: f64, weight: f64) -> bool {
    sample.is_nan() || weight.is_nan()
}

/// Weighted arithmetic mean.
#[derive(Debug, Clone, Default)]
pub struct ArithmeticMean {
    sum_x: f64,
    sum_w: f64,
    count: usize,
}

impl ArithmeticMean {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumberAccumulator for ArithmeticMean {
    fn accumulate(&mut self, sample: f64, weight: f64) -> Result<()> {
        if !is_missing(sample, weight) {
            self.sum_x += weight * sample;
            self.sum_w += weight;
            self.count += 1;
        }
        Ok(())
    }

    fn sample_count(&self) -> usize {
        self.count
    }

    fn combine(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        if self.sum_x == 0.0 {
            return 0.0;
        }
        if self.sum_w == 0.0 {
            return f64::NAN;
        }
        self.sum_x / self.sum_w
    }
}

/// Uncertainty of a weighted mean of independent samples.
///
/// This is `sqrt(Σ(w·x)²) / Σw`, the standard deviation of the weighted
/// mean, not a weighted RMS.
#[derive(Debug, Clone, Default)]
pub struct WeightedUncertainty {
    sum_xx: f64,
    sum_w: f64,
    count: usize,
}

impl WeightedUncertainty {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumberAccumulator for WeightedUncertainty {
    fn accumulate(&mut self, sample: f64, weight: f64) -> Result<()> {
        if !is_missing(sample, weight) {
            let wx = weight * sample;
            self.sum_xx += wx * wx;
            self.sum_w += weight;
            self.count += 1;
        }
        Ok(())
    }

    fn sample_count(&self) -> usize {
        self.count
    }

    fn combine(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.sum_xx.sqrt() / self.sum_w
    }
}

/// Unweighted root of the sum of squares.
#[derive(Debug, Clone, Default)]
pub struct QuadratureSum {
    sum_xx: f64,
    count: usize,
}

impl QuadratureSum {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumberAccumulator for QuadratureSum {
    /// Fails unless `weight` is exactly 1.
    fn accumulate(&mut self, sample: f64, weight: f64) -> Result<()> {
        if weight != 1.0 {
            return Err(AggregationError::invalid_argument(format!(
                "quadrature sums are unweighted, got weight {}",
                weight
            )));
        }
        if !sample.is_nan() {
            self.sum_xx += sample * sample;
            self.count += 1;
        }
        Ok(())
    }

    fn sample_count(&self) -> usize {
        self.count
    }

    fn combine(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.sum_xx.sqrt()
    }
}

/// Combine an optional accumulator, NaN when absent.
#[inline]
pub(crate) fn combine_or_nan<A: NumberAccumulator>(accumulator: &Option<A>) -> f64 {
    accumulator.as_ref().map_or(f64::NAN, |a| a.combine())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_fresh_accumulators_combine_to_nan() {
        assert!(ArithmeticMean::new().combine().is_nan());
        assert!(WeightedUncertainty::new().combine().is_nan());
        assert!(QuadratureSum::new().combine().is_nan());
    }

    #[test]
    fn test_arithmetic_mean() {
        let mut acc = ArithmeticMean::new();
        acc.accumulate(3.0, 0.8).unwrap();
        acc.accumulate(7.0, 0.5).unwrap();
        acc.accumulate(4.0, 0.7).unwrap();
        assert_eq!(acc.sample_count(), 3);
        assert_approx_eq!(acc.combine(), (2.4 + 3.5 + 2.8) / 2.0, 1e-12);
    }

    #[test]
    fn test_arithmetic_mean_zero_sum_and_zero_weights() {
        let mut acc = ArithmeticMean::new();
        acc.accumulate(0.0, 1.0).unwrap();
        assert_eq!(acc.combine(), 0.0);

        // A zero weighted sum wins over zero weights.
        let mut acc = ArithmeticMean::new();
        acc.accumulate(2.0, 0.0).unwrap();
        assert_eq!(acc.sample_count(), 1);
        assert_eq!(acc.combine(), 0.0);

        let mut acc = ArithmeticMean::new();
        acc.accumulate(2.0, 1.0).unwrap();
        acc.accumulate(3.0, -1.0).unwrap();
        assert_eq!(acc.sample_count(), 2);
        assert!(acc.combine().is_nan());
    }

    #[test]
    fn test_nan_samples_are_ignored() {
        let mut acc = ArithmeticMean::new();
        acc.accumulate(f64::NAN, 1.0).unwrap();
        acc.accumulate(1.0, f64::NAN).unwrap();
        acc.accumulate(2.0, 1.0).unwrap();
        assert_eq!(acc.sample_count(), 1);
        assert_eq!(acc.combine(), 2.0);
    }

    #[test]
    fn test_weighted_uncertainty() {
        let mut acc = WeightedUncertainty::new();
        acc.accumulate(0.1, 0.8).unwrap();
        acc.accumulate(0.2, 0.5).unwrap();
        let expected = ((0.08f64).powi(2) + (0.1f64).powi(2)).sqrt() / 1.3;
        assert_approx_eq!(acc.combine(), expected, 1e-12);
    }

    #[test]
    fn test_weighted_uncertainty_shrinks_with_samples() {
        let mut acc = WeightedUncertainty::new();
        for _ in 0..100 {
            acc.accumulate(1.0, 1.0).unwrap();
        }
        assert_approx_eq!(acc.combine(), 0.1, 1e-12);
    }

    #[test]
    fn test_quadrature_sum() {
        let mut acc = QuadratureSum::new();
        acc.accumulate(3.0, 1.0).unwrap();
        acc.accumulate(4.0, 1.0).unwrap();
        assert_eq!(acc.combine(), 5.0);
    }

    #[test]
    fn test_quadrature_sum_rejects_weights() {
        let mut acc = QuadratureSum::new();
        let err = acc.accumulate(3.0, 0.5).unwrap_err();
        assert!(matches!(err, AggregationError::InvalidArgument(_)));
        assert_eq!(acc.sample_count(), 0);
    }
}
