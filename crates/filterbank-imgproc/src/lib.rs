#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// filter bank assembly module.
pub mod bank;

/// batch driver module.
pub mod batch;

/// color transformations module.
pub mod color;

/// same-size convolution with symmetric boundary extension.
pub mod conv;

/// error types for filter bank construction and feature extraction.
pub mod error;

/// per-pixel feature extraction module.
pub mod features;

/// filter kernel generators.
pub mod filters;

/// the convolution kernel type.
pub mod kernel;

/// module containing parallelization utilities.
pub mod parallel;

/// kernel visualization module.
pub mod viz;

pub use crate::error::FilterError;
