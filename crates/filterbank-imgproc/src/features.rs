use filterbank_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

use crate::bank::FilterBank;
use crate::color::{gray_mean_from_rgb, lab_from_rgb, rgb_from_gray};
use crate::conv::convolve2d_symm;
use crate::error::FilterError;

/// Column layout of a feature matrix.
///
/// The blocks appear in fixed order: color window, Lab, normalized location,
/// filter responses (in bank order).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureLayout {
    /// Side length of the local color window.
    pub window_size: usize,
    /// Number of filters in the bank.
    pub n_filters: usize,
}

impl FeatureLayout {
    /// Build a layout, rejecting even window sizes.
    pub fn new(window_size: usize, n_filters: usize) -> Result<Self, FilterError> {
        if window_size % 2 == 0 {
            return Err(FilterError::InvalidWindowSize(window_size));
        }
        Ok(Self {
            window_size,
            n_filters,
        })
    }

    /// Width of the color window block: `3 * window_size^2`.
    pub fn color_dim(&self) -> usize {
        3 * self.window_size * self.window_size
    }

    /// Columns of the color window block.
    pub fn color_range(&self) -> std::ops::Range<usize> {
        0..self.color_dim()
    }

    /// Columns of the Lab block.
    pub fn lab_range(&self) -> std::ops::Range<usize> {
        let start = self.color_dim();
        start..start + 3
    }

    /// Columns of the normalized location block.
    pub fn loc_range(&self) -> std::ops::Range<usize> {
        let start = self.color_dim() + 3;
        start..start + 2
    }

    /// Columns of the filter response block.
    pub fn response_range(&self) -> std::ops::Range<usize> {
        let start = self.color_dim() + 5;
        start..start + self.n_filters
    }

    /// Total number of feature columns.
    pub fn total_dim(&self) -> usize {
        self.color_dim() + 5 + self.n_filters
    }

    /// The bank position of the filter that fills the given column, if the
    /// column belongs to the response block.
    pub fn filter_index_of_column(&self, col: usize) -> Option<usize> {
        let range = self.response_range();
        range.contains(&col).then(|| col - range.start)
    }
}

/// The per-pixel feature table for one image.
///
/// Row `r * width + c` holds the features of pixel (r, c); the column layout
/// is described by [`FeatureLayout`].
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    layout: FeatureLayout,
    rows: usize,
    data: Vec<f32>,
}

impl FeatureMatrix {
    fn from_parts(layout: FeatureLayout, rows: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), rows * layout.total_dim());
        Self { layout, rows, data }
    }

    /// The number of rows, one per pixel.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of feature columns.
    pub fn cols(&self) -> usize {
        self.layout.total_dim()
    }

    /// The column layout.
    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    /// The feature vector of the given pixel row.
    pub fn row(&self, index: usize) -> &[f32] {
        let cols = self.cols();
        &self.data[index * cols..(index + 1) * cols]
    }

    /// The underlying data in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Build a padded copy of the image for local window extraction.
///
/// The border of width `half` mirrors the adjacent rows/columns (edge pixel
/// included) while the four corner blocks replicate the nearest corner
/// pixel.
fn pad_for_window(src: &Image<f32, 3>, half: usize) -> Result<Image<f32, 3>, ImageError> {
    let rows = src.rows();
    let cols = src.cols();
    let mut dst = Image::<f32, 3>::from_size_val(
        ImageSize {
            width: cols + 2 * half,
            height: rows + 2 * half,
        },
        0.0,
    )?;

    let mirror = |i: isize, len: usize| -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i - 1;
            } else {
                i = 2 * len - i - 1;
            }
        }
        i as usize
    };

    let src_data = src.as_slice();
    let dst_cols = cols + 2 * half;
    let dst_data = dst.as_slice_mut();

    for pr in 0..rows + 2 * half {
        let or = pr as isize - half as isize;
        let row_inside = or >= 0 && (or as usize) < rows;
        for pc in 0..dst_cols {
            let oc = pc as isize - half as isize;
            let col_inside = oc >= 0 && (oc as usize) < cols;

            let (sr, sc) = match (row_inside, col_inside) {
                (true, true) => (or as usize, oc as usize),
                // corner blocks replicate the nearest corner pixel
                (false, false) => (
                    or.clamp(0, rows as isize - 1) as usize,
                    oc.clamp(0, cols as isize - 1) as usize,
                ),
                (false, true) => (mirror(or, rows), oc as usize),
                (true, false) => (or as usize, mirror(oc, cols)),
            };

            let src_off = (sr * cols + sc) * 3;
            let dst_off = (pr * dst_cols + pc) * 3;
            dst_data[dst_off..dst_off + 3].copy_from_slice(&src_data[src_off..src_off + 3]);
        }
    }

    Ok(dst)
}

/// Apply a filter bank to an RGB image and collect per-pixel features.
///
/// The output matrix has one row per pixel in raster order and the fixed
/// column layout of [`FeatureLayout`]:
///
/// * a local window of RGB values divided by 255 (`3 * window_size^2`
///   columns),
/// * the CIE Lab color divided by 255 (3 columns),
/// * the pixel row and column, each divided by `dimension - 1` (2 columns;
///   a dimension of size 1 yields 0 instead of dividing by zero),
/// * one response column per filter, in bank order, computed on the channel
///   mean intensity with same-size symmetric-boundary convolution.
///
/// # Arguments
///
/// * `image` - The input RGB image with values in [0, 255].
/// * `bank` - The ordered filter bank; may be empty for color and location
///   features only.
/// * `window_size` - Side length of the local color window, odd.
///
/// # Errors
///
/// Returns an error for an even window size or an image without spatial
/// extent.
///
/// # Example
///
/// ```
/// use filterbank_image::{Image, ImageSize};
/// use filterbank_imgproc::bank::FilterBank;
/// use filterbank_imgproc::features::apply_filter_bank;
///
/// let image = Image::<f32, 3>::from_size_val(
///     ImageSize {
///         width: 10,
///         height: 10,
///     },
///     128.0,
/// )
/// .unwrap();
///
/// let features = apply_filter_bank(&image, &FilterBank::empty(), 1).unwrap();
/// assert_eq!(features.rows(), 100);
/// assert_eq!(features.cols(), 8);
/// ```
pub fn apply_filter_bank(
    image: &Image<f32, 3>,
    bank: &FilterBank,
    window_size: usize,
) -> Result<FeatureMatrix, FilterError> {
    let layout = FeatureLayout::new(window_size, bank.len())?;

    let rows = image.rows();
    let cols = image.cols();
    if rows == 0 || cols == 0 {
        return Err(ImageError::EmptyImage(rows, cols).into());
    }

    let n_pix = rows * cols;
    let total = layout.total_dim();
    let mut data = vec![0.0f32; n_pix * total];

    // color window block
    let color_start = layout.color_range().start;
    if window_size == 1 {
        for (p, pixel) in image.as_slice().chunks_exact(3).enumerate() {
            let off = p * total + color_start;
            data[off] = pixel[0] / 255.0;
            data[off + 1] = pixel[1] / 255.0;
            data[off + 2] = pixel[2] / 255.0;
        }
    } else {
        let half = (window_size - 1) / 2;
        let padded = pad_for_window(image, half)?;
        let padded_cols = padded.cols();
        let padded_data = padded.as_slice();

        let mut block = color_start;
        for wr in 0..window_size {
            for wc in 0..window_size {
                for r in 0..rows {
                    for c in 0..cols {
                        let p = r * cols + c;
                        let src_off = ((r + wr) * padded_cols + (c + wc)) * 3;
                        let dst_off = p * total + block;
                        data[dst_off] = padded_data[src_off] / 255.0;
                        data[dst_off + 1] = padded_data[src_off + 1] / 255.0;
                        data[dst_off + 2] = padded_data[src_off + 2] / 255.0;
                    }
                }
                block += 3;
            }
        }
    }

    // Lab block
    let mut lab = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;
    lab_from_rgb(image, &mut lab)?;
    let lab_start = layout.lab_range().start;
    for (p, pixel) in lab.as_slice().chunks_exact(3).enumerate() {
        let off = p * total + lab_start;
        data[off] = pixel[0] / 255.0;
        data[off + 1] = pixel[1] / 255.0;
        data[off + 2] = pixel[2] / 255.0;
    }

    // normalized location block
    let loc_start = layout.loc_range().start;
    for r in 0..rows {
        let loc_x = if rows > 1 {
            r as f32 / (rows - 1) as f32
        } else {
            0.0
        };
        for c in 0..cols {
            let loc_y = if cols > 1 {
                c as f32 / (cols - 1) as f32
            } else {
                0.0
            };
            let off = (r * cols + c) * total + loc_start;
            data[off] = loc_x;
            data[off + 1] = loc_y;
        }
    }

    // filter response block, computed on the channel mean intensity
    if !bank.is_empty() {
        let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
        gray_mean_from_rgb(image, &mut gray)?;

        let responses = bank
            .filters()
            .par_iter()
            .map(|filter| {
                let mut response = Image::<f32, 1>::from_size_val(gray.size(), 0.0)?;
                convolve2d_symm(&gray, &mut response, &filter.kernel)?;
                Ok(response)
            })
            .collect::<Result<Vec<_>, FilterError>>()?;

        let response_start = layout.response_range().start;
        for (i, response) in responses.iter().enumerate() {
            for (p, &v) in response.as_slice().iter().enumerate() {
                data[p * total + response_start + i] = v;
            }
        }
    }

    Ok(FeatureMatrix::from_parts(layout, n_pix, data))
}

/// Apply a filter bank to a single channel image.
///
/// The image is broadcast to three identical channels and passed to
/// [`apply_filter_bank`].
pub fn apply_filter_bank_gray(
    image: &Image<f32, 1>,
    bank: &FilterBank,
    window_size: usize,
) -> Result<FeatureMatrix, FilterError> {
    let mut rgb = Image::<f32, 3>::from_size_val(image.size(), 0.0)?;
    rgb_from_gray(image, &mut rgb)?;
    apply_filter_bank(&rgb, bank, window_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::FilterFamily;
    use approx::assert_relative_eq;

    fn gradient_image(width: usize, height: usize) -> Image<f32, 3> {
        let mut data = Vec::with_capacity(width * height * 3);
        for r in 0..height {
            for c in 0..width {
                let v = ((r * width + c) % 256) as f32;
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Image::new(ImageSize { width, height }, data).unwrap()
    }

    #[test]
    fn layout_blocks_partition_columns() -> Result<(), FilterError> {
        let layout = FeatureLayout::new(3, 69)?;
        assert_eq!(layout.color_range(), 0..27);
        assert_eq!(layout.lab_range(), 27..30);
        assert_eq!(layout.loc_range(), 30..32);
        assert_eq!(layout.response_range(), 32..101);
        assert_eq!(layout.total_dim(), 101);

        assert_eq!(layout.filter_index_of_column(32), Some(0));
        assert_eq!(layout.filter_index_of_column(100), Some(68));
        assert_eq!(layout.filter_index_of_column(31), None);

        Ok(())
    }

    #[test]
    fn even_window_is_rejected() {
        let image = gradient_image(4, 4);
        let res = apply_filter_bank(&image, &FilterBank::empty(), 2);
        assert!(matches!(res, Err(FilterError::InvalidWindowSize(2))));
    }

    #[test]
    fn empty_bank_shape() -> Result<(), FilterError> {
        let image = gradient_image(10, 10);
        let features = apply_filter_bank(&image, &FilterBank::empty(), 1)?;

        // 3 color + 3 Lab + 2 location + 0 responses
        assert_eq!(features.rows(), 100);
        assert_eq!(features.cols(), 8);

        Ok(())
    }

    #[test]
    fn constant_image_features() -> Result<(), FilterError> {
        let v = 128.0f32;
        let image = Image::<f32, 3>::from_size_val(
            ImageSize {
                width: 6,
                height: 5,
            },
            v,
        )?;
        let bank = FilterBank::standard()?;
        let features = apply_filter_bank(&image, &bank, 1)?;

        let layout = features.layout();
        let first = features.row(0).to_vec();

        for p in 0..features.rows() {
            let row = features.row(p);

            // color and Lab blocks constant across all pixels
            for col in layout.color_range().chain(layout.lab_range()) {
                assert_relative_eq!(row[col], first[col], epsilon = 1e-6);
            }

            for col in layout.response_range() {
                let i = layout.filter_index_of_column(col).unwrap();
                match bank.get(i).unwrap().family {
                    // a sum-to-one kernel maps a constant field to itself
                    FilterFamily::Gaussian { .. } => {
                        assert_relative_eq!(row[col], v / 255.0, epsilon = 1e-4);
                    }
                    // zero-mean kernels respond with ~0 on a constant field
                    _ => {
                        assert_relative_eq!(row[col], 0.0, epsilon = 1e-3);
                    }
                }
            }
        }

        // location varies linearly from 0 to 1
        let loc = layout.loc_range().start;
        assert_relative_eq!(features.row(0)[loc], 0.0);
        assert_relative_eq!(features.row(0)[loc + 1], 0.0);
        let last = features.rows() - 1;
        assert_relative_eq!(features.row(last)[loc], 1.0);
        assert_relative_eq!(features.row(last)[loc + 1], 1.0);

        Ok(())
    }

    #[test]
    fn window_block_on_interior_pixel() -> Result<(), FilterError> {
        let image = gradient_image(4, 4);
        let features = apply_filter_bank(&image, &FilterBank::empty(), 3)?;

        assert_eq!(features.cols(), 27 + 3 + 2);

        // pixel (1, 1): the window covers values 0..=2, 4..=6, 8..=10,
        // scanned row-major, each replicated over RGB and divided by 255
        let row = features.row(5);
        let expected = [0.0, 1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0, 10.0];
        for (w, &e) in expected.iter().enumerate() {
            for ch in 0..3 {
                assert_relative_eq!(row[w * 3 + ch], e / 255.0, epsilon = 1e-6);
            }
        }

        // the center offset of the window is the pixel's own color
        let center = 4 * 3;
        assert_relative_eq!(row[center], 5.0 / 255.0, epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn window_border_mirrors_and_replicates_corners() -> Result<(), FilterError> {
        // 3x3 gradient with values 0..=8, window 5 so the padding reaches two
        // pixels deep
        let image = gradient_image(3, 3);
        let features = apply_filter_bank(&image, &FilterBank::empty(), 5)?;

        let row = features.row(0);

        // offset (0, 0) for pixel (0, 0) reads the padded corner block,
        // which replicates the corner pixel (a pure mirror would give 4)
        assert_relative_eq!(row[0], 0.0, epsilon = 1e-6);

        // offset (0, 2) sits two rows above the pixel: the mirrored top edge
        // gives image row 1, so the value is pixel (1, 0) = 3
        assert_relative_eq!(row[2 * 3], 3.0 / 255.0, epsilon = 1e-6);

        // offset (2, 0) sits two columns left: the mirrored left edge gives
        // image column 1, so the value is pixel (0, 1) = 1
        assert_relative_eq!(row[2 * 5 * 3], 1.0 / 255.0, epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn single_channel_broadcast_matches_rgb() -> Result<(), FilterError> {
        let gray = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0.0, 50.0, 100.0, 150.0, 200.0, 250.0],
        )?;
        let mut rgb = Image::<f32, 3>::from_size_val(gray.size(), 0.0)?;
        rgb_from_gray(&gray, &mut rgb)?;

        let bank = FilterBank::standard()?;
        let from_gray = apply_filter_bank_gray(&gray, &bank, 1)?;
        let from_rgb = apply_filter_bank(&rgb, &bank, 1)?;

        assert_eq!(from_gray.as_slice(), from_rgb.as_slice());

        Ok(())
    }

    #[test]
    fn one_pixel_dimension_skips_normalization() -> Result<(), FilterError> {
        let image = gradient_image(1, 4);
        let features = apply_filter_bank(&image, &FilterBank::empty(), 1)?;

        let loc = features.layout().loc_range().start;
        for p in 0..4 {
            // the column axis has size 1, its location stays 0
            assert_eq!(features.row(p)[loc + 1], 0.0);
        }
        assert_relative_eq!(features.row(3)[loc], 1.0);

        Ok(())
    }

    #[test]
    fn deterministic() -> Result<(), FilterError> {
        let image = gradient_image(8, 6);
        let bank = FilterBank::standard()?;

        let a = apply_filter_bank(&image, &bank, 3)?;
        let b = apply_filter_bank(&image, &bank, 3)?;
        assert_eq!(a.as_slice(), b.as_slice());

        Ok(())
    }

    #[test]
    fn no_nan_or_inf() -> Result<(), FilterError> {
        let image = gradient_image(12, 9);
        let bank = FilterBank::standard()?;
        let features = apply_filter_bank(&image, &bank, 3)?;

        assert!(features.as_slice().iter().all(|v| v.is_finite()));

        Ok(())
    }
}
