use filterbank_image::ImageError;

/// An error type for filter bank construction and feature extraction.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The local window size must be an odd integer.
    #[error("Window size must be odd, got {0}")]
    InvalidWindowSize(usize),

    /// A filter generator received an invalid parameter.
    #[error("Invalid filter parameter {name}: {value}")]
    InvalidFilterParam {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A flattened batch input cannot be reshaped to the claimed image size.
    #[error("Flat data length ({0}) is not a multiple of 3 x {1} x {2}")]
    InvalidFlatLength(usize, usize, usize),

    /// The visualization grid cannot hold all kernels.
    #[error("Grid of {0}x{1} tiles cannot hold {2} kernels")]
    GridTooSmall(usize, usize, usize),
}

impl FilterError {
    /// Helper to build an [`FilterError::InvalidFilterParam`] from a numeric value.
    pub fn invalid_param(name: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidFilterParam {
            name,
            value: value.into(),
        }
    }
}
