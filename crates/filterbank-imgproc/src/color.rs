use filterbank_image::{Image, ImageError};

use crate::parallel;

/// D65 reference white, sRGB primaries.
const XN: f32 = 0.95047;
const ZN: f32 = 1.08883;

/// Convert a grayscale image to an RGB image by replicating the grayscale
/// value across all three channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}

/// Convert an RGB image in [0, 255] to a grayscale image in [0, 1] by
/// averaging the channels and dividing by 255.
///
/// This is the intensity used for the filter responses, deliberately a plain
/// channel mean rather than a luminance weighting.
///
/// # Arguments
///
/// * `src` - The input RGB image with values in [0, 255].
/// * `dst` - The output grayscale image with values in [0, 1].
///
/// Precondition: the input and output images must have the same size.
pub fn gray_mean_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let three = T::from(3.0).ok_or(ImageError::CastError)?;
    let max_val = T::from(255.0).ok_or(ImageError::CastError)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = (src_pixel[0] + src_pixel[1] + src_pixel[2]) / three / max_val;
    });

    Ok(())
}

/// Inverse sRGB gamma, mapping a nonlinear channel in [0, 1] to linear light.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The CIE Lab cube root companding function.
fn lab_f(t: f32) -> f32 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert an RGB image to the CIE Lab color space.
///
/// The input is assumed to have 3 channels in the order R, G, B with values
/// in [0, 255]. The channels are scaled to [0, 1], linearized with the
/// inverse sRGB gamma and converted through XYZ (D65 white point).
///
/// # Arguments
///
/// * `src` - The input RGB image with values in [0, 255].
/// * `dst` - The output Lab image: L in [0, 100], a and b roughly in
///   [-128, 127].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use filterbank_image::{Image, ImageSize};
/// use filterbank_imgproc::color::lab_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut lab = Image::<f32, 3>::from_size_val(image.size(), 0.0).unwrap();
///
/// lab_from_rgb(&image, &mut lab).unwrap();
///
/// assert_eq!(lab.num_channels(), 3);
/// ```
pub fn lab_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = srgb_to_linear(src_pixel[0] / 255.0);
        let g = srgb_to_linear(src_pixel[1] / 255.0);
        let b = srgb_to_linear(src_pixel[2] / 255.0);

        // sRGB to XYZ, D65
        let x = 0.412453 * r + 0.357580 * g + 0.180423 * b;
        let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
        let z = 0.019334 * r + 0.119193 * g + 0.950227 * b;

        let fx = lab_f(x / XN);
        let fy = lab_f(y);
        let fz = lab_f(z / ZN);

        dst_pixel[0] = 116.0 * fy - 16.0;
        dst_pixel[1] = 500.0 * (fx - fy);
        dst_pixel[2] = 200.0 * (fy - fz);
    });

    Ok(())
}
