//! Filter kernel generators
//!
//! Each generator is a pure function producing a list of normalized square
//! kernels parameterized by scale and orientation.

/// Gabor filter generator.
mod gabor;
pub use gabor::*;

/// Gaussian filter generator.
mod gaussian;
pub use gaussian::*;

/// Laplacian of Gaussian filter generator.
mod log;
pub use log::*;

/// Schmid filter generator.
mod schmid;
pub use schmid::*;

/// Scale schedule shared by the rotation invariant generators.
mod scale;
pub use scale::*;
