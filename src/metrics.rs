//! Scoring predicted fish counts against ground truth.
//!
//! Used when tuning a pipeline over a batch of annotated videos: one expected
//! and one predicted total per video.

use ndarray::Array1;
use serde::Serialize;

use crate::error::MetricsError;

/// Aggregate error of a batch of count predictions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountMetrics {
    pub mse: f64,
    pub mae: f64,
    pub samples: usize,
}

fn residuals(expected: &[u64], predicted: &[u64]) -> Result<Array1<f64>, MetricsError> {
    if expected.len() != predicted.len() {
        return Err(MetricsError::LengthMismatch {
            expected: expected.len(),
            predicted: predicted.len(),
        });
    }
    if expected.is_empty() {
        return Err(MetricsError::Empty);
    }

    let expected: Array1<f64> = expected.iter().map(|&v| v as f64).collect();
    let predicted: Array1<f64> = predicted.iter().map(|&v| v as f64).collect();
    Ok(expected - predicted)
}

/// Mean squared error.
pub fn mse(expected: &[u64], predicted: &[u64]) -> Result<f64, MetricsError> {
    let diff = residuals(expected, predicted)?;
    Ok(diff.mapv(|d| d * d).mean().unwrap_or(0.0))
}

/// Mean absolute error.
pub fn mae(expected: &[u64], predicted: &[u64]) -> Result<f64, MetricsError> {
    let diff = residuals(expected, predicted)?;
    Ok(diff.mapv(f64::abs).mean().unwrap_or(0.0))
}

pub fn evaluate(expected: &[u64], predicted: &[u64]) -> Result<CountMetrics, MetricsError> {
    Ok(CountMetrics {
        mse: mse(expected, predicted)?,
        mae: mae(expected, predicted)?,
        samples: expected.len(),
    })
}
