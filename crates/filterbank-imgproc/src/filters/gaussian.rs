use std::f64::consts::PI;

use crate::error::FilterError;
use crate::kernel::Kernel;

use super::ScaleSpace;

/// Generate rotation invariant Gaussian filters on different scales.
///
/// The i-th kernel has standard deviation `base_sigma * sigma_factor^i` and
/// half extent `floor(2 * sigma)`, evaluated with the isotropic 2D Gaussian
/// `1 / (2 pi sigma^2) * exp(-(x^2 + y^2) / (2 sigma^2))` and normalized to
/// sum to 1.
///
/// # Arguments
///
/// * `scales` - The scale schedule, see [`ScaleSpace`].
///
/// # Returns
///
/// A list of `n_sigma` Gaussian kernels.
///
/// # Errors
///
/// Returns an error for a zero scale count or non-positive sigmas.
///
/// # Example
///
/// ```
/// use filterbank_imgproc::filters::{make_gaussian_filters, ScaleSpace};
///
/// let kernels = make_gaussian_filters(&ScaleSpace::with_scales(4)).unwrap();
/// assert_eq!(kernels.len(), 4);
/// ```
pub fn make_gaussian_filters(scales: &ScaleSpace) -> Result<Vec<Kernel>, FilterError> {
    scales.validate()?;

    let mut kernels = Vec::with_capacity(scales.n_sigma);
    for i in 0..scales.n_sigma {
        let sigma = scales.sigma(i);
        let half = (2.0 * sigma) as usize;

        let norm = 1.0 / (2.0 * PI * sigma * sigma);
        let mut kernel =
            Kernel::from_fn(half, |x, y| norm * (-(x * x + y * y) / (2.0 * sigma * sigma)).exp());
        kernel.normalize_sum();

        kernels.push(kernel);
    }

    Ok(kernels)
}
