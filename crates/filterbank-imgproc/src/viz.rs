use filterbank_image::{Image, ImageSize};

use crate::error::FilterError;
use crate::kernel::Kernel;

/// Render a list of kernels as one grayscale mosaic.
///
/// Each kernel is min-max scaled to [0, 255] independently and centered in a
/// cell sized to the largest kernel; cells are laid out row-major on a
/// `grid_rows x grid_cols` grid. Purely a presentation aid with no effect on
/// numeric results.
///
/// # Arguments
///
/// * `kernels` - The kernels to render.
/// * `grid_rows` - Number of tile rows.
/// * `grid_cols` - Number of tile columns.
///
/// # Errors
///
/// Returns an error if the grid cannot hold all kernels.
pub fn render_filter_grid(
    kernels: &[Kernel],
    grid_rows: usize,
    grid_cols: usize,
) -> Result<Image<u8, 1>, FilterError> {
    if grid_rows * grid_cols < kernels.len() {
        return Err(FilterError::GridTooSmall(grid_rows, grid_cols, kernels.len()));
    }

    let cell = kernels.iter().map(Kernel::size).max().unwrap_or(1);
    let mut canvas = Image::<u8, 1>::from_size_val(
        ImageSize {
            width: grid_cols * cell,
            height: grid_rows * cell,
        },
        0,
    )?;

    let canvas_cols = canvas.cols();
    let canvas_data = canvas.as_slice_mut();

    for (index, kernel) in kernels.iter().enumerate() {
        let tile_r = (index / grid_cols) * cell;
        let tile_c = (index % grid_cols) * cell;

        let min = kernel.as_slice().iter().cloned().fold(f32::INFINITY, f32::min);
        let max = kernel.as_slice().iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let span = if max > min { max - min } else { 1.0 };

        // center the kernel in its cell
        let offset = (cell - kernel.size()) / 2;
        for kr in 0..kernel.size() {
            for kc in 0..kernel.size() {
                let v = (kernel.get(kr, kc) - min) / span;
                let r = tile_r + offset + kr;
                let c = tile_c + offset + kc;
                canvas_data[r * canvas_cols + c] = (v * 255.0).round() as u8;
            }
        }
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::make_schmid_filters;

    #[test]
    fn grid_shape_and_range() -> Result<(), FilterError> {
        let kernels = make_schmid_filters();
        let mosaic = render_filter_grid(&kernels, 4, 4)?;

        // the largest Schmid kernel is 41x41
        assert_eq!(mosaic.cols(), 4 * 41);
        assert_eq!(mosaic.rows(), 4 * 41);

        Ok(())
    }

    #[test]
    fn rejects_too_small_grid() {
        let kernels = make_schmid_filters();
        let res = render_filter_grid(&kernels, 2, 2);
        assert!(matches!(res, Err(FilterError::GridTooSmall(2, 2, 13))));
    }

    #[test]
    fn tile_is_min_max_scaled() -> Result<(), FilterError> {
        let kernel = Kernel::new(3, vec![-1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let mosaic = render_filter_grid(&[kernel], 1, 1)?;

        let data = mosaic.as_slice();
        assert_eq!(data[0], 0);
        assert_eq!(data[2], 255);
        assert_eq!(data[1], 128);

        Ok(())
    }
}
