use std::f64::consts::PI;

use crate::error::FilterError;
use crate::kernel::Kernel;

use super::ScaleSpace;

/// Generate Laplacian of Gaussian filters on different scales.
///
/// The i-th kernel has standard deviation `base_sigma * sigma_factor^i` and
/// half extent `floor(3 * sigma)`. With `a = (x^2 + y^2) / (2 sigma^2)` the
/// weight is `-(1 - a) * exp(-a) / (pi sigma^4)`; the kernel is demeaned and
/// rescaled so its maximum absolute weight is 1.
///
/// # Arguments
///
/// * `scales` - The scale schedule, see [`ScaleSpace`].
///
/// # Returns
///
/// A list of `n_sigma` LoG kernels.
///
/// # Errors
///
/// Returns an error for a zero scale count or non-positive sigmas.
///
/// # Example
///
/// ```
/// use filterbank_imgproc::filters::{make_log_filters, ScaleSpace};
///
/// let kernels = make_log_filters(&ScaleSpace::with_scales(4)).unwrap();
/// assert_eq!(kernels.len(), 4);
/// ```
pub fn make_log_filters(scales: &ScaleSpace) -> Result<Vec<Kernel>, FilterError> {
    scales.validate()?;

    let mut kernels = Vec::with_capacity(scales.n_sigma);
    for i in 0..scales.n_sigma {
        let sigma = scales.sigma(i);
        let half = (3.0 * sigma) as usize;

        let norm = 1.0 / (PI * sigma.powi(4));
        let mut kernel = Kernel::from_fn(half, |x, y| {
            let a = (x * x + y * y) / (2.0 * sigma * sigma);
            -(1.0 - a) * (-a).exp() * norm
        });
        kernel.demean();
        kernel.normalize_max_abs();

        kernels.push(kernel);
    }

    Ok(kernels)
}
