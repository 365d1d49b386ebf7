use filterbank_image::{Image, ImageSize};

use crate::bank::FilterBank;
use crate::error::FilterError;
use crate::features::{apply_filter_bank, FeatureMatrix};

/// Observer of batch progress.
///
/// The batch loop itself is side-effect free; progress reporting is injected
/// through this trait.
pub trait ProgressObserver {
    /// Called after each image has been processed.
    fn image_done(&self, index: usize, total: usize);
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn image_done(&self, index: usize, total: usize) {
        log::info!("Processed {}/{} images", index + 1, total);
    }
}

/// Discards progress events.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn image_done(&self, _index: usize, _total: usize) {}
}

/// Apply a filter bank to a set of images.
///
/// Images are processed in input order and the returned responses keep that
/// order. The batch fails fast: the first per-image error aborts the whole
/// batch, so a partial, index-shifted collection is never returned.
///
/// # Arguments
///
/// * `images` - The input RGB images with values in [0, 255].
/// * `bank` - The shared, read-only filter bank.
/// * `window_size` - Side length of the local color window, odd.
/// * `observer` - Progress observer, e.g. [`LogProgress`] or [`NoProgress`].
///
/// # Returns
///
/// One feature matrix per image, in input order.
pub fn filter_response_with(
    images: &[Image<f32, 3>],
    bank: &FilterBank,
    window_size: usize,
    observer: &dyn ProgressObserver,
) -> Result<Vec<FeatureMatrix>, FilterError> {
    let total = images.len();
    let mut responses = Vec::with_capacity(total);

    for (index, image) in images.iter().enumerate() {
        responses.push(apply_filter_bank(image, bank, window_size)?);
        observer.image_done(index, total);
    }

    Ok(responses)
}

/// Apply the standard 69 filter bank to a set of images.
///
/// Builds the bank once and shares it across all images. See
/// [`filter_response_with`] for the batch contract.
///
/// # Arguments
///
/// * `images` - The input RGB images with values in [0, 255].
/// * `window_size` - Side length of the local color window, odd.
/// * `verbose` - Report progress through [`LogProgress`] when true.
pub fn filter_response(
    images: &[Image<f32, 3>],
    window_size: usize,
    verbose: bool,
) -> Result<Vec<FeatureMatrix>, FilterError> {
    let bank = FilterBank::standard()?;
    if verbose {
        filter_response_with(images, &bank, window_size, &LogProgress)
    } else {
        filter_response_with(images, &bank, window_size, &NoProgress)
    }
}

/// Extract color and location features for a set of images.
///
/// Same as [`filter_response`] but with an empty bank, so the feature
/// matrices hold only the color window, Lab and location blocks.
pub fn extract_color_features(
    images: &[Image<f32, 3>],
    window_size: usize,
    verbose: bool,
) -> Result<Vec<FeatureMatrix>, FilterError> {
    let bank = FilterBank::empty();
    if verbose {
        filter_response_with(images, &bank, window_size, &LogProgress)
    } else {
        filter_response_with(images, &bank, window_size, &NoProgress)
    }
}

/// Reshape flattened image rows into RGB images.
///
/// Each image occupies `3 * H * W` consecutive values in interleaved
/// (H, W, C) row-major order, the layout produced by flattening an RGB
/// image.
///
/// # Arguments
///
/// * `data` - The concatenated flattened images.
/// * `size` - The spatial size (H, W) each row is reshaped to.
///
/// # Errors
///
/// Returns an error if the data length is not a multiple of `3 * H * W`.
pub fn images_from_flat(data: &[f32], size: ImageSize) -> Result<Vec<Image<f32, 3>>, FilterError> {
    let stride = 3 * size.width * size.height;
    if stride == 0 || data.len() % stride != 0 {
        return Err(FilterError::InvalidFlatLength(
            data.len(),
            size.height,
            size.width,
        ));
    }

    data.chunks_exact(stride)
        .map(|chunk| Image::new(size, chunk.to_vec()).map_err(FilterError::from))
        .collect()
}
