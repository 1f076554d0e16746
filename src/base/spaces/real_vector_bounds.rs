use anyhow::{ensure, Result};

#[derive(Debug, Clone)]
pub struct RealVectorBounds {
    pub(crate) low: Vec<f64>,
    pub(crate) high: Vec<f64>,
}

impl RealVectorBounds {
    /// Constructor; `dim` represents the dimension of the space these bounds are for. Bounds
    /// start at `[0, 0]` in every dimension and must be set before use.
    pub fn new(dim: usize) -> Self {
        Self {
            low: vec![0.0; dim],
            high: vec![0.0; dim],
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (low, high): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        Self { low, high }
    }

    /// Set the lower bound in each dimension to a specific value.
    pub fn set_low(&mut self, value: f64) {
        self.low.iter_mut().for_each(|l| *l = value);
    }

    /// Set the upper bound in each dimension to a specific value.
    pub fn set_high(&mut self, value: f64) {
        self.high.iter_mut().for_each(|h| *h = value);
    }

    pub fn set_low_at(&mut self, index: usize, value: f64) {
        self.low[index] = value;
    }

    pub fn set_high_at(&mut self, index: usize, value: f64) {
        self.high[index] = value;
    }

    pub fn dimension(&self) -> usize {
        self.low.len()
    }

    /// Volume of the axis-aligned box enclosed by the bounds.
    pub fn volume(&self) -> f64 {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(l, h)| h - l)
            .product()
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Validate that low/high have matching lengths and that `high[i] > low[i]` everywhere.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.low.len() == self.high.len(),
            "low and high bounds must have the same length ({} vs {})",
            self.low.len(),
            self.high.len()
        );
        for i in 0..self.low.len() {
            ensure!(
                self.high[i] > self.low[i],
                "high bound must be greater than low bound at index {i} (low={}, high={})",
                self.low[i],
                self.high[i]
            );
        }
        Ok(())
    }
}
