use crate::border::wrap_index;
use crate::error::RasterError;

/// Raster size in pixels
///
/// # Examples
///
/// ```
/// use ridge_image::RasterSize;
///
/// let size = RasterSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RasterSize {
    /// Width of the raster in pixels
    pub width: usize,
    /// Height of the raster in pixels
    pub height: usize,
}

impl std::fmt::Display for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RasterSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for RasterSize {
    fn from(size: [usize; 2]) -> Self {
        RasterSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A rectangular buffer of `f32` samples with shape (H, W, C).
///
/// The data is stored row-major with interleaved channels, so the sample at
/// `(row, col, ch)` lives at `(row * width + col) * depth + ch`.
///
/// Rasters are never modified in place by the processing stages: every stage
/// builds a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    size: RasterSize,
    depth: usize,
    data: Vec<f32>,
}

impl Raster {
    /// Create a new raster from sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the raster in pixels.
    /// * `depth` - The number of channels.
    /// * `data` - The samples, row-major with interleaved channels.
    ///
    /// # Errors
    ///
    /// If any extent is zero or the data length does not match the shape, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ridge_image::{Raster, RasterSize};
    ///
    /// let raster = Raster::new(
    ///     RasterSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     vec![0f32; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(raster.size().width, 10);
    /// assert_eq!(raster.size().height, 20);
    /// assert_eq!(raster.num_channels(), 3);
    /// ```
    pub fn new(size: RasterSize, depth: usize, data: Vec<f32>) -> Result<Self, RasterError> {
        if size.width == 0 || size.height == 0 || depth == 0 {
            return Err(RasterError::EmptyRaster(size.height, size.width, depth));
        }

        let expected = size.width * size.height * depth;
        if data.len() != expected {
            return Err(RasterError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, depth, data })
    }

    /// Create a new raster with every sample set to `val`.
    pub fn from_size_val(size: RasterSize, depth: usize, val: f32) -> Result<Self, RasterError> {
        Self::new(size, depth, vec![val; size.width * size.height * depth])
    }

    /// Create a new raster by evaluating `f(row, col, ch)` for every sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use ridge_image::Raster;
    ///
    /// let ramp = Raster::from_fn([4, 2].into(), 1, |_, col, _| col as f32).unwrap();
    /// assert_eq!(ramp.as_slice(), &[0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0]);
    /// ```
    pub fn from_fn(
        size: RasterSize,
        depth: usize,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Result<Self, RasterError> {
        let mut data = Vec::with_capacity(size.width * size.height * depth);
        for row in 0..size.height {
            for col in 0..size.width {
                for ch in 0..depth {
                    data.push(f(row, col, ch));
                }
            }
        }
        Self::new(size, depth, data)
    }

    /// Get the size of the raster in pixels.
    pub fn size(&self) -> RasterSize {
        self.size
    }

    /// Get the number of columns of the raster.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the raster.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the raster in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the raster.
    pub fn num_channels(&self) -> usize {
        self.depth
    }

    /// Get the samples as a flat slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the raster and return its samples.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Get the sample at `[row, col, ch]`, or `None` when out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&f32> {
        let [row, col, ch] = index;
        if row >= self.size.height || col >= self.size.width || ch >= self.depth {
            return None;
        }
        self.data.get((row * self.size.width + col) * self.depth + ch)
    }

    /// Get the sample at `(row, col, ch)` wrapping the coordinates around the raster.
    ///
    /// Rows and columns outside the raster read from the opposite edge, as if
    /// the raster tiled the plane.
    ///
    /// PRECONDITION: `ch < self.num_channels()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ridge_image::Raster;
    ///
    /// let raster = Raster::new([3, 1].into(), 1, vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(raster.get_wrapped(0, -1, 0), 3.0);
    /// assert_eq!(raster.get_wrapped(4, 3, 0), 1.0);
    /// ```
    #[inline]
    pub fn get_wrapped(&self, row: isize, col: isize, ch: usize) -> f32 {
        let r = wrap_index(row, self.size.height);
        let c = wrap_index(col, self.size.width);
        self.data[(r * self.size.width + c) * self.depth + ch]
    }

    /// Get a single channel of the raster as a new raster.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, ch: usize) -> Result<Raster, RasterError> {
        if ch >= self.depth {
            return Err(RasterError::ChannelIndexOutOfBounds(ch, self.depth));
        }

        let data = self
            .data
            .chunks_exact(self.depth)
            .map(|pixel| pixel[ch])
            .collect();

        Raster::new(self.size, 1, data)
    }

    /// Apply `f` to every sample, producing a raster of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Raster {
        Raster {
            size: self.size,
            depth: self.depth,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// The largest sample in the raster.
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Raster, RasterError, RasterSize};

    #[test]
    fn raster_size() {
        let size = RasterSize {
            width: 10,
            height: 20,
        };
        assert_eq!(size.width, 10);
        assert_eq!(size.height, 20);
        assert_eq!(RasterSize::from([10, 20]), size);
    }

    #[test]
    fn raster_smoke() -> Result<(), RasterError> {
        let raster = Raster::new(
            RasterSize {
                width: 10,
                height: 20,
            },
            3,
            vec![0f32; 10 * 20 * 3],
        )?;
        assert_eq!(raster.size().width, 10);
        assert_eq!(raster.size().height, 20);
        assert_eq!(raster.rows(), 20);
        assert_eq!(raster.cols(), 10);
        assert_eq!(raster.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn raster_invalid_shape() {
        let res = Raster::new([2, 2].into(), 1, vec![0.0; 5]);
        assert_eq!(res, Err(RasterError::InvalidChannelShape(5, 4)));

        let res = Raster::new([0, 2].into(), 1, vec![]);
        assert_eq!(res, Err(RasterError::EmptyRaster(2, 0, 1)));
    }

    #[test]
    fn raster_get() -> Result<(), RasterError> {
        let raster = Raster::new([1, 2].into(), 3, vec![0., 1., 2., 3., 4., 5.])?;
        assert_eq!(raster.get([1, 0, 2]), Some(&5.0));
        assert_eq!(raster.get([2, 0, 0]), None);
        assert_eq!(raster.get([0, 0, 3]), None);
        Ok(())
    }

    #[test]
    fn raster_wrapped_matches_period() -> Result<(), RasterError> {
        let (h, w) = (3isize, 4isize);
        let raster = Raster::from_fn([4, 3].into(), 1, |r, c, _| (r * 10 + c) as f32)?;
        for y in 0..h {
            for x in 0..w {
                let v = raster.get_wrapped(y, x, 0);
                assert_eq!(v, raster.get_wrapped(y + h, x, 0));
                assert_eq!(v, raster.get_wrapped(y, x + w, 0));
                assert_eq!(v, raster.get_wrapped(y - h, x - w, 0));
            }
        }
        assert_eq!(raster.get_wrapped(-1, -1, 0), 23.0);
        Ok(())
    }

    #[test]
    fn raster_channel() -> Result<(), RasterError> {
        let raster = Raster::new([1, 2].into(), 3, vec![0., 1., 2., 3., 4., 5.])?;

        let channel = raster.channel(2)?;
        assert_eq!(channel.num_channels(), 1);
        assert_eq!(channel.as_slice(), &[2.0, 5.0]);

        assert_eq!(
            raster.channel(3),
            Err(RasterError::ChannelIndexOutOfBounds(3, 3))
        );
        Ok(())
    }

    #[test]
    fn raster_map_and_max() -> Result<(), RasterError> {
        let raster = Raster::new([3, 1].into(), 1, vec![-1.0, 4.0, 2.0])?;
        assert_eq!(raster.max_value(), 4.0);
        assert_eq!(raster.map(f32::abs).as_slice(), &[1.0, 4.0, 2.0]);
        Ok(())
    }
}
