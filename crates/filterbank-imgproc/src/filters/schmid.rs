use std::f64::consts::PI;

use crate::kernel::Kernel;

/// The (sigma, tau) pairs of the Schmid filter bank.
pub const SCHMID_SIGMA_TAU: [(f64, f64); 13] = [
    (2.0, 1.0),
    (4.0, 1.0),
    (4.0, 2.0),
    (6.0, 1.0),
    (6.0, 2.0),
    (6.0, 3.0),
    (8.0, 1.0),
    (8.0, 2.0),
    (8.0, 3.0),
    (10.0, 1.0),
    (10.0, 2.0),
    (10.0, 3.0),
    (10.0, 4.0),
];

/// Synthesize a single Schmid kernel for the given (sigma, tau) pair.
///
/// The weight at radius `r` is `cos(pi tau r / sigma) * exp(-r^2 / (2 sigma^2))`
/// on a grid of half extent `floor(2 * sigma)`; the kernel is demeaned and
/// rescaled so its maximum absolute weight is 1.
pub fn schmid_kernel(sigma: f64, tau: f64) -> Kernel {
    let half = (2.0 * sigma) as usize;

    let mut kernel = Kernel::from_fn(half, |x, y| {
        let r = (x * x + y * y).sqrt();
        (PI * tau * r / sigma).cos() * (-(r * r) / (2.0 * sigma * sigma)).exp()
    });
    kernel.demean();
    kernel.normalize_max_abs();

    kernel
}

/// Generate the Schmid filter bank.
///
/// The bank consists of 13 rotation invariant filters, a radial cosine
/// modulated by a Gaussian envelope, on the fixed (sigma, tau) schedule of
/// [`SCHMID_SIGMA_TAU`].
///
/// # Example
///
/// ```
/// use filterbank_imgproc::filters::make_schmid_filters;
///
/// let kernels = make_schmid_filters();
/// assert_eq!(kernels.len(), 13);
/// ```
pub fn make_schmid_filters() -> Vec<Kernel> {
    SCHMID_SIGMA_TAU
        .iter()
        .map(|&(sigma, tau)| schmid_kernel(sigma, tau))
        .collect()
}
