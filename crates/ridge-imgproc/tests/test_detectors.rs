use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use ridge_image::Raster;
use ridge_imgproc::{
    cache::GradientCache,
    color::luminance_from_rgb,
    corners::{corners, detect_corners, CornerConfig},
    edges::{canny, discretize_orientation, link_edges, thin_gradient, CannyConfig, Orientation},
    filter::{separate_gradient, spatial_gradient_gaussian},
    ProcessingError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_raster(seed: u64, size: [usize; 2]) -> Result<Raster, ProcessingError> {
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(Raster::from_fn(size.into(), 1, |_, _, _| {
        rng.random_range(0.0..1.0)
    })?)
}

#[test]
fn flat_image_has_zero_gradient() -> Result<(), ProcessingError> {
    init_logger();
    let rgb = Raster::from_size_val([5, 5].into(), 3, 0.5)?;
    let gray = luminance_from_rgb(&rgb)?;
    let field = spatial_gradient_gaussian(&gray, 1.0)?;

    for &m in field.magnitude.as_slice() {
        assert_relative_eq!(m, 0.0, epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn vertical_step_thins_at_the_step() -> Result<(), ProcessingError> {
    init_logger();
    // left half 0.0, right half 1.0
    let src = Raster::from_fn([5, 5].into(), 1, |_, col, _| if col >= 3 { 1.0 } else { 0.0 })?;
    let field = spatial_gradient_gaussian(&src, 1.0)?;
    let thinned = thin_gradient(&field.magnitude, &field.direction)?;

    let max = thinned.max_value();
    assert!(max > 0.0);

    for row in 0..5 {
        let at = |col: usize| thinned.as_slice()[row * 5 + col];
        // column 2 is the last dark column before the step
        assert_relative_eq!(at(2), max, max_relative = 1e-5);
        assert_eq!(at(3), 0.0);

        for col in [2, 3] {
            let angle = field.direction.as_slice()[row * 5 + col];
            assert_eq!(discretize_orientation(angle)?, Orientation::Deg0);
        }
    }
    Ok(())
}

#[test]
fn link_edges_is_monotonic() -> Result<(), ProcessingError> {
    init_logger();
    let (start, cont) = (0.6, 0.2);

    for seed in 0..8 {
        let src = random_raster(seed, [12, 9])?;
        let linked = link_edges(&src, start, cont)?;

        for (&s, &l) in src.as_slice().iter().zip(linked.as_slice()) {
            if s >= start {
                assert_eq!(l, s);
            }
            if l != 0.0 {
                assert!(s > cont);
                assert_eq!(l, s);
            }
        }
    }
    Ok(())
}

#[test]
fn link_edges_is_deterministic() -> Result<(), ProcessingError> {
    init_logger();
    let src = random_raster(42, [32, 24])?;
    let first = link_edges(&src, 0.7, 0.3)?;
    let second = link_edges(&src, 0.7, 0.3)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn canny_output_is_relative() -> Result<(), ProcessingError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(3);
    let rgb = Raster::from_fn([24, 16].into(), 3, |_, _, _| rng.random_range(0.0..1.0))?;
    let edges = canny(&rgb, &CannyConfig::default())?;

    assert_eq!(edges.size(), rgb.size());
    assert_eq!(edges.max_value(), 1.0);
    assert!(edges.as_slice().iter().all(|&v| v == 0.0 || v > 0.1));
    Ok(())
}

#[test]
fn single_bright_square_gives_one_corner() -> Result<(), ProcessingError> {
    init_logger();
    // a 3x3 bright square centred on (15, 15)
    let gray = Raster::from_fn([32, 32].into(), 1, |r, c, _| {
        if (14..=16).contains(&r) && (14..=16).contains(&c) {
            1.0
        } else {
            0.0
        }
    })?;
    let (dx, dy, _) = separate_gradient(&gray, 1.0)?;
    let map = detect_corners(&dx, &dy, 1e-3, 4)?;

    assert_eq!(map.get([15, 15, 0]), Some(&1.0));

    // the windows of the equally strong central candidates form a single plateau
    for row in 0..32 {
        for col in 0..32 {
            let v = map.as_slice()[row * 32 + col];
            let in_plateau = (10..=20).contains(&row) && (10..=20).contains(&col);
            assert_eq!(v == 1.0, in_plateau, "({row}, {col}) = {v}");
        }
    }
    Ok(())
}

// 4-connected regions of cells equal to 1.0
fn unit_plateaus(map: &Raster) -> Vec<Vec<(usize, usize)>> {
    let (rows, cols) = (map.rows(), map.cols());
    let data = map.as_slice();
    let mut seen = vec![false; data.len()];
    let mut plateaus = Vec::new();
    for start in 0..data.len() {
        if seen[start] || data[start] != 1.0 {
            continue;
        }
        seen[start] = true;
        let mut stack = vec![start];
        let mut cells = Vec::new();
        while let Some(idx) = stack.pop() {
            let (r, c) = (idx / cols, idx % cols);
            cells.push((r, c));
            let mut next = Vec::new();
            if r > 0 {
                next.push(idx - cols);
            }
            if r + 1 < rows {
                next.push(idx + cols);
            }
            if c > 0 {
                next.push(idx - 1);
            }
            if c + 1 < cols {
                next.push(idx + 1);
            }
            for n in next {
                if !seen[n] && data[n] == 1.0 {
                    seen[n] = true;
                    stack.push(n);
                }
            }
        }
        plateaus.push(cells);
    }
    plateaus
}

#[test]
fn bright_square_corners_sit_on_unit_plateaus() -> Result<(), ProcessingError> {
    init_logger();
    // derivatives of a bright square covering rows and cols 10..=21, one
    // pixel wide along each side with the apex pixels left out
    let sides = 11..=20;
    let dx = Raster::from_fn([32, 32].into(), 1, |r, c, _| match c {
        10 if sides.contains(&r) => 1.0,
        21 if sides.contains(&r) => -1.0,
        _ => 0.0,
    })?;
    let dy = Raster::from_fn([32, 32].into(), 1, |r, c, _| match r {
        10 if sides.contains(&c) => 1.0,
        21 if sides.contains(&c) => -1.0,
        _ => 0.0,
    })?;
    let map = detect_corners(&dx, &dy, 0.5, 2)?;

    let square_corners = [(10, 10), (10, 21), (21, 10), (21, 21)];
    for (row, col) in square_corners {
        assert_eq!(map.get([row, col, 0]), Some(&1.0), "({row}, {col})");
    }

    // one 5x5 plateau per corner, each owned by the window of its strongest pixel
    let plateaus = unit_plateaus(&map);
    assert_eq!(plateaus.len(), 4);
    for plateau in &plateaus {
        assert_eq!(plateau.len(), 25);
        let owned = square_corners
            .iter()
            .filter(|&&corner| plateau.contains(&corner))
            .count();
        assert_eq!(owned, 1);
    }

    let block = |v: usize| (10..=14).contains(&v) || (17..=21).contains(&v);
    for row in 0..32 {
        for col in 0..32 {
            let v = map.as_slice()[row * 32 + col];
            assert_eq!(v == 1.0, block(row) && block(col), "({row}, {col}) = {v}");
        }
    }
    Ok(())
}

#[test]
fn corners_pipeline_matches_stages() -> Result<(), ProcessingError> {
    init_logger();
    let rgb = Raster::from_fn([20, 20].into(), 3, |r, c, ch| {
        if (5..12).contains(&r) && (6..14).contains(&c) {
            0.2 + 0.3 * ch as f32
        } else {
            0.1
        }
    })?;
    let config = CornerConfig::default().with_sigma(1.0).with_threshold(1e-3);

    let gray = luminance_from_rgb(&rgb)?;
    let (dx, dy, _) = separate_gradient(&gray, config.sigma)?;
    let staged = detect_corners(&dx, &dy, config.threshold, config.neighborhood_size)?;

    assert_eq!(corners(&rgb, &config)?, staged);
    Ok(())
}

#[test]
fn gradient_cache_reuses_fields() -> Result<(), ProcessingError> {
    init_logger();
    let gray = std::sync::Arc::new(random_raster(9, [10, 10])?);
    let mut cache = GradientCache::new();

    let cached = cache.get_or_compute(&gray, 1.0)?;
    let fresh = spatial_gradient_gaussian(&gray, 1.0)?;
    assert_eq!(*cached, fresh);

    let again = cache.get_or_compute(&gray, 1.0)?;
    assert!(std::sync::Arc::ptr_eq(&cached, &again));
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn configs_deserialize_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let canny: CannyConfig =
        serde_json::from_str(r#"{"sigma": 1.5, "start_thresh": 0.5, "continue_thresh": 0.2}"#)?;
    assert_eq!(canny, CannyConfig::default().with_sigma(1.5).with_thresholds(0.5, 0.2));

    let corner: CornerConfig =
        serde_json::from_str(r#"{"sigma": 2.0, "threshold": 0.05, "neighborhood_size": 3}"#)?;
    assert_eq!(
        corner,
        CornerConfig::default()
            .with_threshold(0.05)
            .with_neighborhood_size(3)
    );
    Ok(())
}
