use std::f64::consts::PI;

use crate::error::FilterError;
use crate::kernel::Kernel;

/// Parameters for the Gabor filter bank generator.
///
/// The frequency of the i-th scale is `base_freq / freq_factor^i` and the
/// orientation of the j-th direction is `pi * j / n_orient`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaborParams {
    /// Number of frequencies (scales).
    pub n_freq: usize,
    /// Number of orientations.
    pub n_orient: usize,
    /// Base frequency of the first scale.
    pub base_freq: f64,
    /// Multiplicative factor used to derive the lower frequencies.
    pub freq_factor: f64,
    /// Phase offset of the sinusoidal carrier.
    pub offset: f64,
}

impl Default for GaborParams {
    fn default() -> Self {
        Self {
            n_freq: 4,
            n_orient: 6,
            base_freq: 1.0,
            freq_factor: std::f64::consts::SQRT_2,
            offset: 0.0,
        }
    }
}

impl GaborParams {
    /// The frequency of the i-th scale.
    pub fn frequency(&self, i_freq: usize) -> f64 {
        self.base_freq / self.freq_factor.powi(i_freq as i32)
    }

    /// The orientation angle of the j-th direction, in radians.
    pub fn orientation(&self, i_orient: usize) -> f64 {
        PI * i_orient as f64 / self.n_orient as f64
    }

    fn validate(&self) -> Result<(), FilterError> {
        if self.n_freq == 0 {
            return Err(FilterError::invalid_param("n_freq", 0.0));
        }
        if self.n_orient == 0 {
            return Err(FilterError::invalid_param("n_orient", 0.0));
        }
        if self.base_freq <= 0.0 {
            return Err(FilterError::invalid_param("base_freq", self.base_freq));
        }
        if self.freq_factor <= 0.0 {
            return Err(FilterError::invalid_param("freq_factor", self.freq_factor));
        }
        Ok(())
    }
}

/// Gaussian envelope width for a carrier frequency, at a bandwidth of one
/// octave: `sigma = (3 / pi) * sqrt(ln(2) / 2) / frequency`.
fn envelope_sigma(frequency: f64) -> f64 {
    3.0 / PI * (2.0f64.ln() / 2.0).sqrt() / frequency
}

/// Half extent of the support grid, three standard deviations of the
/// envelope projected on the grid axes, at least one pixel.
fn support_half(sigma: f64, theta: f64) -> usize {
    let extent = 3.0 * sigma * theta.cos().abs().max(theta.sin().abs());
    extent.max(1.0).ceil() as usize
}

/// Synthesize the imaginary and real parts of a complex Gabor kernel at the
/// given frequency and orientation.
///
/// Each part is demeaned and rescaled so its maximum absolute weight is 1.
fn gabor_pair(frequency: f64, theta: f64, offset: f64) -> (Kernel, Kernel) {
    let sigma = envelope_sigma(frequency);
    let half = support_half(sigma, theta);

    let (sin_t, cos_t) = theta.sin_cos();
    let norm = 1.0 / (2.0 * PI * sigma * sigma);

    let sample = |x: f64, y: f64| {
        let rot_x = x * cos_t + y * sin_t;
        let rot_y = -x * sin_t + y * cos_t;
        let envelope = norm * (-0.5 * (rot_x * rot_x + rot_y * rot_y) / (sigma * sigma)).exp();
        let phase = 2.0 * PI * frequency * rot_x + offset;
        (envelope, phase)
    };

    let mut imag = Kernel::from_fn(half, |x, y| {
        let (envelope, phase) = sample(x, y);
        envelope * phase.sin()
    });
    let mut real = Kernel::from_fn(half, |x, y| {
        let (envelope, phase) = sample(x, y);
        envelope * phase.cos()
    });

    for k in [&mut imag, &mut real] {
        k.demean();
        k.normalize_max_abs();
    }

    (imag, real)
}

/// Generate a Gabor filter bank.
///
/// For every frequency (outer loop) and orientation (inner loop) the complex
/// Gabor kernel is split into its imaginary and real parts, appended in that
/// order. Lower frequencies produce larger kernels, so the returned kernels
/// are of different sizes.
///
/// # Arguments
///
/// * `params` - The frequency/orientation schedule, see [`GaborParams`].
///
/// # Returns
///
/// A list of `n_freq * n_orient * 2` kernels, each zero-mean with maximum
/// absolute weight 1.
///
/// # Errors
///
/// Returns an error for zero counts or non-positive frequencies.
///
/// # Example
///
/// ```
/// use filterbank_imgproc::filters::{make_gabor_filters, GaborParams};
///
/// let kernels = make_gabor_filters(&GaborParams::default()).unwrap();
/// assert_eq!(kernels.len(), 48);
/// ```
pub fn make_gabor_filters(params: &GaborParams) -> Result<Vec<Kernel>, FilterError> {
    params.validate()?;

    let mut kernels = Vec::with_capacity(params.n_freq * params.n_orient * 2);
    for i_freq in 0..params.n_freq {
        let frequency = params.frequency(i_freq);
        for i_orient in 0..params.n_orient {
            let theta = params.orientation(i_orient);
            let (imag, real) = gabor_pair(frequency, theta, params.offset);
            kernels.push(imag);
            kernels.push(real);
        }
    }

    Ok(kernels)
}
