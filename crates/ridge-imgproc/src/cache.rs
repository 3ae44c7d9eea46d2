use std::sync::Arc;

use ridge_image::Raster;

use crate::error::ProcessingError;
use crate::filter::{spatial_gradient_gaussian_with_strategy, GradientField};
use crate::parallel::ExecutionStrategy;

/// Memoizes gradient fields by source raster and scale.
///
/// Entries are keyed by the identity of the shared source raster (not its
/// contents) together with the exact bits of `sigma`, so two rasters holding
/// the same samples are cached separately.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ridge_image::Raster;
/// use ridge_imgproc::cache::GradientCache;
///
/// let gray = Arc::new(Raster::from_size_val([6, 6].into(), 1, 0.5).unwrap());
/// let mut cache = GradientCache::new();
///
/// let first = cache.get_or_compute(&gray, 1.0).unwrap();
/// let second = cache.get_or_compute(&gray, 1.0).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GradientCache {
    strategy: ExecutionStrategy,
    entries: Vec<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    source: Arc<Raster>,
    sigma_bits: u32,
    field: Arc<GradientField>,
}

impl GradientCache {
    /// Create an empty cache using the default execution strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache computing with the given execution strategy.
    pub fn with_strategy(strategy: ExecutionStrategy) -> Self {
        Self {
            strategy,
            entries: Vec::new(),
        }
    }

    /// Return the gradient field of `src` at `sigma`, computing it on the first request.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`spatial_gradient_gaussian_with_strategy`].
    /// Failed computations are not cached.
    pub fn get_or_compute(
        &mut self,
        src: &Arc<Raster>,
        sigma: f32,
    ) -> Result<Arc<GradientField>, ProcessingError> {
        let sigma_bits = sigma.to_bits();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.sigma_bits == sigma_bits && Arc::ptr_eq(&e.source, src))
        {
            log::trace!("gradient cache hit: sigma {sigma}");
            return Ok(Arc::clone(&entry.field));
        }

        let field = Arc::new(spatial_gradient_gaussian_with_strategy(
            src,
            sigma,
            self.strategy,
        )?);
        self.entries.push(CacheEntry {
            source: Arc::clone(src),
            sigma_bits,
            field: Arc::clone(&field),
        });
        Ok(field)
    }

    /// Number of cached gradient fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no gradient field.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached gradient field.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
