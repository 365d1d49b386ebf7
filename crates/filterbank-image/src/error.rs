/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes of an operation do not match.
    #[error("Invalid image size ({0}, {1}) != ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the image has no spatial extent.
    #[error("Image must be at least 1x1 pixels, got ({0}, {1})")]
    EmptyImage(usize, usize),

    /// Error when accessing a pixel out of bounds.
    #[error("Pixel ({0}, {1}) is out of bounds for image of size ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a numeric cast fails.
    #[error("Failed to cast image value")]
    CastError,
}
