use crate::error::FilterError;

/// A geometric scale schedule for rotation invariant filters.
///
/// The standard deviation of the i-th scale is
/// `base_sigma * sigma_factor^i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSpace {
    /// Number of scales.
    pub n_sigma: usize,
    /// Standard deviation of the first scale.
    pub base_sigma: f64,
    /// Multiplicative growth factor between consecutive scales.
    pub sigma_factor: f64,
}

impl Default for ScaleSpace {
    fn default() -> Self {
        Self {
            n_sigma: 4,
            base_sigma: 1.0,
            sigma_factor: std::f64::consts::SQRT_2,
        }
    }
}

impl ScaleSpace {
    /// A schedule with the given number of scales and default base and factor.
    pub fn with_scales(n_sigma: usize) -> Self {
        Self {
            n_sigma,
            ..Default::default()
        }
    }

    /// The standard deviation of the i-th scale.
    pub fn sigma(&self, i: usize) -> f64 {
        self.base_sigma * self.sigma_factor.powi(i as i32)
    }

    pub(crate) fn validate(&self) -> Result<(), FilterError> {
        if self.n_sigma == 0 {
            return Err(FilterError::invalid_param("n_sigma", 0.0));
        }
        if self.base_sigma <= 0.0 {
            return Err(FilterError::invalid_param("base_sigma", self.base_sigma));
        }
        if self.sigma_factor <= 0.0 {
            return Err(FilterError::invalid_param("sigma_factor", self.sigma_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigma_schedule() {
        let scales = ScaleSpace::default();
        assert_relative_eq!(scales.sigma(0), 1.0);
        assert_relative_eq!(scales.sigma(2), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_invalid() {
        assert!(ScaleSpace::with_scales(0).validate().is_err());
        let scales = ScaleSpace {
            base_sigma: 0.0,
            ..Default::default()
        };
        assert!(scales.validate().is_err());
    }
}
