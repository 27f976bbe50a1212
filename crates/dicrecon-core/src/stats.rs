//! Summary statistics over raster samples.

use crate::raster::Sample;

/// Min, max and mean of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RasterStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl RasterStats {
    /// Compute statistics in a single pass.
    ///
    /// Returns all zeros for an empty slice.
    pub fn compute<T: Sample>(samples: &[T]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for sample in samples {
            let v = sample.to_f64();
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }

        Self {
            min,
            max,
            mean: sum / samples.len() as f64,
        }
    }

    /// Difference between max and min.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
