use filterbank_image::{Image, ImageError};
use rayon::prelude::*;

use crate::kernel::Kernel;

/// Map a possibly out-of-range coordinate into `[0, len)` by mirroring
/// across the border, edge pixel included.
///
/// The fold loop stays valid for overshoots of arbitrary size, so kernels
/// larger than the image are handled.
#[inline]
fn reflect(i: isize, len: usize) -> usize {
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
}

/// Convolve a single channel image with a kernel, producing an output of the
/// same size with symmetric boundary extension.
///
/// This is a true convolution: the kernel is flipped on both axes, which
/// matters for the antisymmetric Gabor parts.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel` - The kernel to convolve with; may be larger than the image.
///
/// Precondition: `src` and `dst` must have the same size.
pub fn convolve2d_symm(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = src.rows();
    let cols = src.cols();
    let half = kernel.half() as isize;
    let ksize = kernel.size();

    let src_data = src.as_slice();
    let kernel_data = kernel.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, dst_row)| {
            for (c, dst_val) in dst_row.iter_mut().enumerate() {
                let mut sum = 0.0f32;
                for (kr, kernel_row) in kernel_data.chunks_exact(ksize).enumerate() {
                    let src_r = reflect(r as isize + half - kr as isize, rows);
                    let src_row = &src_data[src_r * cols..(src_r + 1) * cols];
                    for (kc, &w) in kernel_row.iter().enumerate() {
                        let src_c = reflect(c as isize + half - kc as isize, cols);
                        sum += w * src_row[src_c];
                    }
                }
                *dst_val = sum;
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use filterbank_image::ImageSize;

    #[test]
    fn reflect_folds_arbitrary_overshoot() {
        assert_eq!(reflect(-1, 4), 0);
        assert_eq!(reflect(-4, 4), 3);
        assert_eq!(reflect(4, 4), 3);
        assert_eq!(reflect(7, 4), 0);
        assert_eq!(reflect(9, 4), 1);
        assert_eq!(reflect(5, 1), 0);
    }

    #[test]
    fn identity_kernel() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        let mut data = vec![0.0; 9];
        data[4] = 1.0;
        let kernel = Kernel::new(3, data).unwrap();

        convolve2d_symm(&src, &mut dst, &kernel)?;

        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn kernel_is_flipped() -> Result<(), ImageError> {
        // a kernel with a single off-center weight shifts the image in the
        // same direction as the weight offset under true convolution
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![1.0, 2.0, 3.0],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        // weight at (1, 2), i.e. one step right of center
        let mut data = vec![0.0; 9];
        data[5] = 1.0;
        let kernel = Kernel::new(3, data).unwrap();

        convolve2d_symm(&src, &mut dst, &kernel)?;

        // out[c] = src[c - 1], with symmetric extension at the left border
        assert_eq!(dst.as_slice(), &[1.0, 1.0, 2.0]);

        Ok(())
    }

    #[test]
    fn averaging_kernel_on_constant_image() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            0.5,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        let kernel = Kernel::new(3, vec![1.0 / 9.0; 9]).unwrap();
        convolve2d_symm(&src, &mut dst, &kernel)?;

        for &v in dst.as_slice() {
            assert_relative_eq!(v, 0.5, epsilon = 1e-6);
        }

        Ok(())
    }

    #[test]
    fn kernel_larger_than_image() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1.0,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

        // 7x7 sum-to-one kernel over a 2x2 image still returns the constant
        let kernel = Kernel::new(7, vec![1.0 / 49.0; 49]).unwrap();
        convolve2d_symm(&src, &mut dst, &kernel)?;

        for &v in dst.as_slice() {
            assert_relative_eq!(v, 1.0, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), ImageError> {
        let src = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0.0,
        )?;
        let kernel = Kernel::new(1, vec![1.0]).unwrap();

        assert!(convolve2d_symm(&src, &mut dst, &kernel).is_err());

        Ok(())
    }
}
