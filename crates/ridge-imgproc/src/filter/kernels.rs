use std::f32::consts::PI;

use crate::error::ProcessingError;

/// A 1D kernel sampled at the integer offsets `-support..=support`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel1d {
    support: usize,
    values: Vec<f32>,
}

impl Kernel1d {
    /// The support radius of the kernel.
    pub fn support(&self) -> usize {
        self.support
    }

    /// The kernel values ordered from offset `-support` to `+support`.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// The kernel value at the signed offset `i`.
    ///
    /// PRECONDITION: `|i| <= support`.
    #[inline]
    pub fn at(&self, i: isize) -> f32 {
        self.values[(i + self.support as isize) as usize]
    }

    /// Iterate over `(offset, value)` pairs from `-support` to `+support`.
    pub fn iter(&self) -> impl Iterator<Item = (isize, f32)> + '_ {
        let support = self.support as isize;
        self.values
            .iter()
            .enumerate()
            .map(move |(k, &v)| (k as isize - support, v))
    }
}

fn check_sigma(sigma: f32) -> Result<(), ProcessingError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ProcessingError::InvalidSigma(sigma));
    }
    Ok(())
}

/// Compute the convolution support radius for a gaussian of scale `sigma`.
///
/// The radius is `floor(2 * sigma + 0.5)`.
///
/// # Errors
///
/// Returns [`ProcessingError::InvalidSigma`] if `sigma` is not strictly positive
/// or the radius does not fit in an `isize`.
pub fn support_radius(sigma: f32) -> Result<usize, ProcessingError> {
    check_sigma(sigma)?;
    let radius = (sigma * 2.0 + 0.5).floor();
    // kernels are indexed by signed offsets
    if radius >= isize::MAX as f32 {
        return Err(ProcessingError::InvalidSigma(sigma));
    }
    Ok(radius as usize)
}

/// Evaluate the 1D gaussian of scale `sigma` at offset `i`.
#[inline]
pub fn gaussian_1d(i: f32, sigma: f32) -> f32 {
    let inverse_term = 1.0 / (sigma * (2.0 * PI).sqrt());
    inverse_term * (-(i * i) / (2.0 * sigma * sigma)).exp()
}

/// Evaluate the first derivative of the 1D gaussian of scale `sigma` at offset `i`.
#[inline]
pub fn gaussian_derivative_1d(i: f32, sigma: f32) -> f32 {
    -i / (sigma * sigma) * gaussian_1d(i, sigma)
}

/// Evaluate the isotropic 2D gaussian of scale `sigma` at offset `(i, j)`.
#[inline]
pub fn gaussian_2d(i: f32, j: f32, sigma: f32) -> f32 {
    let inverse_term = 1.0 / (2.0 * PI * sigma * sigma);
    inverse_term * (-(i * i + j * j) / (2.0 * sigma * sigma)).exp()
}

/// Create a gaussian smoothing kernel.
///
/// The kernel is not normalized: its sum only approaches one as the support grows.
///
/// # Arguments
///
/// * `sigma` - The scale of the gaussian.
///
/// # Example
///
/// ```
/// use ridge_imgproc::filter::kernels::gaussian_kernel_1d;
///
/// let kernel = gaussian_kernel_1d(1.0).unwrap();
/// assert_eq!(kernel.support(), 2);
/// assert_eq!(kernel.as_slice().len(), 5);
/// assert_eq!(kernel.at(-2), kernel.at(2));
/// ```
pub fn gaussian_kernel_1d(sigma: f32) -> Result<Kernel1d, ProcessingError> {
    let support = support_radius(sigma)?;
    let values = (-(support as isize)..=support as isize)
        .map(|i| gaussian_1d(i as f32, sigma))
        .collect();
    Ok(Kernel1d { support, values })
}

/// Create a gaussian first derivative kernel.
///
/// The kernel is antisymmetric and zero at the origin.
///
/// # Arguments
///
/// * `sigma` - The scale of the gaussian.
pub fn gaussian_derivative_kernel_1d(sigma: f32) -> Result<Kernel1d, ProcessingError> {
    let support = support_radius(sigma)?;
    let values = (-(support as isize)..=support as isize)
        .map(|i| gaussian_derivative_1d(i as f32, sigma))
        .collect();
    Ok(Kernel1d { support, values })
}

/// Create a 2D gaussian kernel of shape `(2 * support + 1, 2 * support + 1)`.
///
/// The kernel is row-major and not normalized.
///
/// # Returns
///
/// The support radius and the kernel values.
pub fn gaussian_kernel_2d(sigma: f32) -> Result<(usize, Vec<f32>), ProcessingError> {
    let support = support_radius(sigma)? as isize;
    let mut kernel = Vec::with_capacity(((2 * support + 1) * (2 * support + 1)) as usize);
    for j in -support..=support {
        for i in -support..=support {
            kernel.push(gaussian_2d(i as f32, j as f32, sigma));
        }
    }
    Ok((support as usize, kernel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_support_radius() -> Result<(), ProcessingError> {
        assert_eq!(support_radius(0.2)?, 0);
        assert_eq!(support_radius(0.25)?, 1);
        assert_eq!(support_radius(1.0)?, 2);
        assert_eq!(support_radius(1.5)?, 3);
        assert_eq!(support_radius(2.0)?, 4);
        Ok(())
    }

    #[test]
    fn test_invalid_sigma() {
        assert_eq!(
            gaussian_kernel_1d(0.0),
            Err(ProcessingError::InvalidSigma(0.0))
        );
        assert_eq!(
            gaussian_derivative_kernel_1d(-1.0),
            Err(ProcessingError::InvalidSigma(-1.0))
        );
        assert!(gaussian_kernel_2d(f32::NAN).is_err());
    }

    #[test]
    fn test_huge_sigma() {
        assert_eq!(support_radius(1e30), Err(ProcessingError::InvalidSigma(1e30)));
        assert_eq!(
            gaussian_derivative_kernel_1d(f32::MAX),
            Err(ProcessingError::InvalidSigma(f32::MAX))
        );
    }

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), ProcessingError> {
        let kernel = gaussian_kernel_1d(1.0)?;

        let expected = [0.05399097, 0.24197073, 0.39894229, 0.24197073, 0.05399097];
        for (k, e) in kernel.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(k, e, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_derivative_kernel_1d() -> Result<(), ProcessingError> {
        let kernel = gaussian_derivative_kernel_1d(1.0)?;
        assert_eq!(kernel.at(0), 0.0);
        assert_relative_eq!(kernel.at(1), -0.24197073, epsilon = 1e-6);
        assert_relative_eq!(kernel.at(-2), 2.0 * 0.05399097, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_kernel_symmetry() -> Result<(), ProcessingError> {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let sigma = rng.random_range(0.1f32..6.0);
            let smooth = gaussian_kernel_1d(sigma)?;
            let deriv = gaussian_derivative_kernel_1d(sigma)?;
            let support = smooth.support() as isize;

            assert_eq!(deriv.at(0), 0.0);
            for i in 1..=support {
                assert_eq!(smooth.at(i), smooth.at(-i));
                assert_eq!(deriv.at(i), -deriv.at(-i));
            }
        }
        Ok(())
    }

    #[test]
    fn test_kernel_iter_offsets() -> Result<(), ProcessingError> {
        let kernel = gaussian_kernel_1d(0.5)?;
        let offsets = kernel.iter().map(|(i, _)| i).collect::<Vec<_>>();
        assert_eq!(offsets, vec![-1, 0, 1]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_2d() -> Result<(), ProcessingError> {
        let (support, kernel) = gaussian_kernel_2d(1.0)?;
        assert_eq!(support, 2);
        assert_eq!(kernel.len(), 25);

        // the 2d gaussian is the outer product of two 1d gaussians
        let k1 = gaussian_kernel_1d(1.0)?;
        for (idx, v) in kernel.iter().enumerate() {
            let j = (idx / 5) as isize - 2;
            let i = (idx % 5) as isize - 2;
            assert_relative_eq!(*v, k1.at(i) * k1.at(j), epsilon = 1e-6);
        }

        let sum = kernel.iter().sum::<f32>();
        assert!(sum < 1.0 && sum > 0.9);
        Ok(())
    }
}
