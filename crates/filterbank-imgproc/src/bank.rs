use crate::error::FilterError;
use crate::filters::{
    make_gabor_filters, make_gaussian_filters, make_log_filters, make_schmid_filters, GaborParams,
    ScaleSpace, SCHMID_SIGMA_TAU,
};
use crate::kernel::Kernel;

/// Which part of the complex Gabor kernel a filter holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaborPart {
    /// The imaginary (odd) part.
    Imaginary,
    /// The real (even) part.
    Real,
}

/// Provenance of a filter in a bank.
///
/// Response columns of the feature matrix follow bank order, so this is what
/// makes a column traceable back to the filter that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterFamily {
    /// An oriented, frequency tuned Gabor filter part.
    Gabor {
        /// Carrier frequency.
        frequency: f64,
        /// Orientation angle in radians.
        orientation: f64,
        /// Imaginary or real part of the complex kernel.
        part: GaborPart,
    },
    /// A Schmid filter.
    Schmid {
        /// Gaussian envelope scale.
        sigma: f64,
        /// Radial cosine order.
        tau: f64,
    },
    /// An isotropic Gaussian filter.
    Gaussian {
        /// Standard deviation.
        sigma: f64,
    },
    /// A Laplacian of Gaussian filter.
    Log {
        /// Standard deviation.
        sigma: f64,
    },
}

/// A kernel together with its provenance.
#[derive(Clone, Debug, PartialEq)]
pub struct BankFilter {
    /// Which generator produced the kernel, and with which parameters.
    pub family: FilterFamily,
    /// The kernel weights.
    pub kernel: Kernel,
}

/// Parameters of the standard filter bank composition.
///
/// The Schmid filters have a fixed (sigma, tau) schedule and take no
/// parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterBankParams {
    /// Gabor frequency/orientation schedule.
    pub gabor: GaborParams,
    /// Gaussian scale schedule.
    pub gaussian: ScaleSpace,
    /// Laplacian of Gaussian scale schedule.
    pub log: ScaleSpace,
}

/// An ordered collection of filters applied collectively to an image.
///
/// The order is significant: response columns in the output feature matrix
/// follow bank order exactly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterBank {
    filters: Vec<BankFilter>,
}

impl FilterBank {
    /// Build the standard 69 filter bank: 48 Gabor (4 frequencies x 6
    /// orientations x 2 parts), 13 Schmid, 4 Gaussian and 4 LoG filters, in
    /// that order.
    ///
    /// # Example
    ///
    /// ```
    /// use filterbank_imgproc::bank::FilterBank;
    ///
    /// let bank = FilterBank::standard().unwrap();
    /// assert_eq!(bank.len(), 69);
    /// ```
    pub fn standard() -> Result<Self, FilterError> {
        Self::from_params(&FilterBankParams::default())
    }

    /// An empty bank, for extracting color and location features only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a bank with the given schedules, keeping the fixed family
    /// order: Gabor, Schmid, Gaussian, LoG.
    ///
    /// # Errors
    ///
    /// Returns an error if any schedule is invalid.
    pub fn from_params(params: &FilterBankParams) -> Result<Self, FilterError> {
        let mut filters = Vec::new();

        let gabor_families = (0..params.gabor.n_freq).flat_map(|i_freq| {
            (0..params.gabor.n_orient).flat_map(move |i_orient| {
                [GaborPart::Imaginary, GaborPart::Real]
                    .into_iter()
                    .map(move |part| FilterFamily::Gabor {
                        frequency: params.gabor.frequency(i_freq),
                        orientation: params.gabor.orientation(i_orient),
                        part,
                    })
            })
        });
        for (kernel, family) in make_gabor_filters(&params.gabor)?.into_iter().zip(gabor_families) {
            filters.push(BankFilter { family, kernel });
        }

        for (kernel, (sigma, tau)) in make_schmid_filters().into_iter().zip(SCHMID_SIGMA_TAU) {
            filters.push(BankFilter {
                family: FilterFamily::Schmid { sigma, tau },
                kernel,
            });
        }

        for (i, kernel) in make_gaussian_filters(&params.gaussian)?.into_iter().enumerate() {
            filters.push(BankFilter {
                family: FilterFamily::Gaussian {
                    sigma: params.gaussian.sigma(i),
                },
                kernel,
            });
        }

        for (i, kernel) in make_log_filters(&params.log)?.into_iter().enumerate() {
            filters.push(BankFilter {
                family: FilterFamily::Log {
                    sigma: params.log.sigma(i),
                },
                kernel,
            });
        }

        Ok(Self { filters })
    }

    /// The number of filters in the bank.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the bank holds no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The filters in bank order.
    pub fn filters(&self) -> &[BankFilter] {
        &self.filters
    }

    /// Iterate over the kernels in bank order.
    pub fn kernels(&self) -> impl Iterator<Item = &Kernel> {
        self.filters.iter().map(|f| &f.kernel)
    }

    /// The filter at the given bank position.
    pub fn get(&self, index: usize) -> Option<&BankFilter> {
        self.filters.get(index)
    }
}
