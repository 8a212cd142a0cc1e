use std::time::Duration;

/// Mean and population standard deviation of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation (divides by `n`, not `n - 1`)
    pub std_dev: f64,
    /// Number of samples summarized
    pub samples: usize,
}

impl Summary {
    /// Summarize `samples`. An empty slice summarizes to all zeros.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
            samples: samples.len(),
        }
    }

    /// Summarize durations in milliseconds.
    pub fn from_durations(durations: &[Duration]) -> Self {
        let millis: Vec<f64> = durations.iter().map(|d| d.as_secs_f64() * 1000.0).collect();
        Self::from_samples(&millis)
    }
}
