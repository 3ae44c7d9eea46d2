//! Mapping of possibly out-of-range coordinates onto raster indices.
//!
//! Two policies are used by the detectors:
//!
//! - **wrap**: the raster is treated as a torus, so a coordinate just past the
//!   right edge reads the leftmost column. Convolutions and non-maximum
//!   suppression sample this way.
//! - **checked**: coordinates outside the raster are simply skipped. Edge
//!   linking walks its 8-neighbourhood this way.
//!
//! Example: `wrap_index(-1, 5) == 4`, `checked_index(-1, 5) == None`.

/// Wrap the index `i` into `[0, len)` using a non-negative modulo.
///
/// PRECONDITION: `len > 0`.
#[inline]
pub fn wrap_index(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

/// Return `i` as an index if it lies inside `[0, len)`.
#[inline]
pub fn checked_index(i: isize, len: usize) -> Option<usize> {
    if i >= 0 && (i as usize) < len {
        Some(i as usize)
    } else {
        None
    }
}
