//! Exponential decay weights by pixel distance.

/// Precomputed weights `exp(-d * i)` for `i` in `0..len`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayTable {
    coefficient: f64,
    weights: Vec<f64>,
}

impl DecayTable {
    /// Build the table for decay coefficient `coefficient` and `len` entries.
    pub fn build(coefficient: f64, len: usize) -> Self {
        let weights = (0..len).map(|i| (-coefficient * i as f64).exp()).collect();
        Self {
            coefficient,
            weights,
        }
    }

    /// Weight for a distance of `distance` pixels.
    #[inline]
    pub fn get(&self, distance: usize) -> f64 {
        self.weights[distance]
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Ratio between consecutive weights, `exp(-d)`.
    pub fn ratio(&self) -> f64 {
        (-self.coefficient).exp()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
