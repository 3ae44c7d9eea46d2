use ridge_image::{border::checked_index, Raster};

use crate::error::{ensure_channels, ProcessingError};

const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Link edge pixels with double threshold hysteresis.
///
/// Every pixel whose value is at least `start_thresh` seeds an edge and keeps
/// its value. The edges then grow in rounds: each pixel added in the previous
/// round pulls in its 8-connected neighbours whose value is strictly greater
/// than `continue_thresh`. Neighbours outside the raster are ignored, the
/// borders do not wrap. Linking stops at the first round that adds nothing.
///
/// `continue_thresh` is expected to be below `start_thresh`; otherwise only the
/// seeds and their strongest neighbours survive.
///
/// # Arguments
///
/// * `magnitude` - The thinned, relativized magnitude with shape (H, W, 1).
/// * `start_thresh` - The value a pixel needs to start an edge.
/// * `continue_thresh` - The value a pixel needs to extend an edge.
///
/// # Returns
///
/// A raster with shape (H, W, 1) holding the source value at linked pixels and zero elsewhere.
///
/// # Example
///
/// ```
/// use ridge_image::Raster;
/// use ridge_imgproc::edges::link_edges;
///
/// let thinned = Raster::new([4, 1].into(), 1, vec![0.9, 0.3, 0.05, 0.3]).unwrap();
/// let linked = link_edges(&thinned, 0.5, 0.1).unwrap();
/// assert_eq!(linked.as_slice(), &[0.9, 0.3, 0.0, 0.0]);
/// ```
pub fn link_edges(
    magnitude: &Raster,
    start_thresh: f32,
    continue_thresh: f32,
) -> Result<Raster, ProcessingError> {
    ensure_channels(magnitude, 1)?;

    let (rows, cols) = (magnitude.rows(), magnitude.cols());
    let src = magnitude.as_slice();

    let mut linked = vec![0.0f32; src.len()];
    let mut visited = vec![false; src.len()];

    let mut front = Vec::new();
    for (idx, &v) in src.iter().enumerate() {
        if v >= start_thresh {
            linked[idx] = v;
            visited[idx] = true;
            front.push(idx);
        }
    }
    let seeds = front.len();

    let mut rounds = 0;
    while !front.is_empty() {
        let mut next = Vec::new();
        for &idx in &front {
            let (row, col) = ((idx / cols) as isize, (idx % cols) as isize);
            for (dy, dx) in NEIGHBOURS {
                let (Some(r), Some(c)) = (
                    checked_index(row + dy, rows),
                    checked_index(col + dx, cols),
                ) else {
                    continue;
                };
                let n = r * cols + c;
                if !visited[n] && linked[n] == 0.0 && src[n] > continue_thresh {
                    linked[n] = src[n];
                    visited[n] = true;
                    next.push(n);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        rounds += 1;
        front = next;
    }

    log::debug!(
        "hysteresis: {seeds} seeds, {rounds} rounds, {} linked pixels",
        visited.iter().filter(|&&v| v).count()
    );

    Ok(Raster::new(magnitude.size(), 1, linked)?)
}
