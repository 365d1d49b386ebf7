use crate::error::FilterError;

/// A square 2D convolution kernel with odd side length, centered at its
/// middle cell.
///
/// The weights are stored contiguously in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from weights.
    ///
    /// # Arguments
    ///
    /// * `size` - The side length, must be odd.
    /// * `data` - The weights in row-major order, length `size * size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the side length is even or the data length does
    /// not match.
    pub fn new(size: usize, data: Vec<f32>) -> Result<Self, FilterError> {
        if size % 2 == 0 {
            return Err(FilterError::invalid_param("kernel_size", size as f64));
        }
        if data.len() != size * size {
            return Err(FilterError::invalid_param("kernel_data_len", data.len() as f64));
        }
        Ok(Self { size, data })
    }

    /// Build a kernel of the given half extent by evaluating a function on a
    /// centered integer grid.
    ///
    /// The closure receives `(x, y)` where `x` runs left to right from
    /// `-half` to `half` and `y` runs top to bottom from `-half` to `half`.
    /// The side length is `2 * half + 1`.
    pub fn from_fn(half: usize, f: impl Fn(f64, f64) -> f64) -> Self {
        let size = 2 * half + 1;
        let mut data = Vec::with_capacity(size * size);
        for row in 0..size {
            let y = row as f64 - half as f64;
            for col in 0..size {
                let x = col as f64 - half as f64;
                data.push(f(x, y) as f32);
            }
        }
        Self { size, data }
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The half extent of the kernel, i.e. `(size - 1) / 2`.
    pub fn half(&self) -> usize {
        (self.size - 1) / 2
    }

    /// The weights as a flat row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The weight at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.size + col]
    }

    /// The sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// The mean of all weights.
    pub fn mean(&self) -> f32 {
        self.sum() / (self.data.len() as f32)
    }

    /// The maximum absolute weight.
    pub fn max_abs(&self) -> f32 {
        self.data.iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
    }

    /// Subtract the mean from every weight so the kernel becomes zero-mean.
    pub fn demean(&mut self) {
        let mean = self.mean();
        self.data.iter_mut().for_each(|v| *v -= mean);
    }

    /// Scale the weights so the maximum absolute weight becomes 1.
    ///
    /// A kernel of all zeros is left untouched.
    pub fn normalize_max_abs(&mut self) {
        let max_abs = self.max_abs();
        if max_abs > 0.0 {
            self.data.iter_mut().for_each(|v| *v /= max_abs);
        }
    }

    /// Scale the weights so they sum to 1.
    ///
    /// A kernel summing to zero is left untouched.
    pub fn normalize_sum(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            self.data.iter_mut().for_each(|v| *v /= sum);
        }
    }
}
