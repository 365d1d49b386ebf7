#![deny(missing_docs)]
//! Image types and traits for the filterbank feature extraction crates

/// image representation for feature extraction purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{cast_and_scale, Image, ImageSize};
