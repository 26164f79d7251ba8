//! Sample statistics over per-trial egg counts.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean and Bessel-corrected standard deviation of a sample
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of samples
    pub samples: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (divisor `n - 1`)
    pub std_dev: f64,
}

impl SampleStats {
    /// Format as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "n:{:6} | mean:{:10.2} | std dev:{:10.2}",
            self.samples, self.mean, self.std_dev
        )
    }
}

impl fmt::Display for SampleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} std dev {}", self.mean, self.std_dev)
    }
}

/// Reduce egg counts to mean and sample standard deviation.
///
/// Sums run in sample order. Needs at least two samples.
pub fn aggregate(eggs: &[u64]) -> Result<SampleStats> {
    if eggs.len() < 2 {
        return Err(SimError::InsufficientSamples { got: eggs.len() });
    }

    let n = eggs.len() as f64;
    let mean = eggs.iter().map(|&e| e as f64).sum::<f64>() / n;
    let squared: f64 = eggs
        .iter()
        .map(|&e| {
            let deviation = e as f64 - mean;
            deviation * deviation
        })
        .sum();
    let variance = squared / (n - 1.0);

    Ok(SampleStats {
        samples: eggs.len(),
        mean,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_small_sample() {
        let stats = aggregate(&[1, 2, 3]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.std_dev, 1.0);
        assert_eq!(stats.samples, 3);
    }

    #[test]
    fn test_aggregate_constant_sample() {
        let stats = aggregate(&[7; 10]).unwrap();
        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_aggregate_order_independent() {
        let a = aggregate(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        let b = aggregate(&[9, 7, 5, 5, 4, 4, 4, 2]).unwrap();
        assert!((a.mean - b.mean).abs() < 1e-12);
        assert!((a.std_dev - b.std_dev).abs() < 1e-12);
        // population sd would be 2.0; sample sd is sqrt(32 / 7)
        assert!((a.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_rejects_short_samples() {
        assert!(matches!(
            aggregate(&[]),
            Err(SimError::InsufficientSamples { got: 0 })
        ));
        assert!(matches!(
            aggregate(&[3]),
            Err(SimError::InsufficientSamples { got: 1 })
        ));
    }

    #[test]
    fn test_display() {
        let stats = aggregate(&[1, 2, 3]).unwrap();
        assert_eq!(stats.to_string(), "2 std dev 1");
    }
}
