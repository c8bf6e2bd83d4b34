mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;

use flow_core::asset::{Asset, GeoSample};
use flow_core::config::LayoutConfig;
use flow_core::layout::{compute_layout, depth_for, GeoCoverage, LayoutMode};

use common::{approx, assets};

fn config(range: f64, depth_step: f64) -> LayoutConfig {
    LayoutConfig {
        range,
        depth_step,
        ..Default::default()
    }
}

#[test]
fn test_counts_match_asset_count() {
    for n in [0usize, 1, 2, 7, 40] {
        let a = assets(n);
        let samples = vec![GeoSample::absent(); n];
        let layout = compute_layout(&a, &samples, &config(65.0, 0.25), &mut StdRng::seed_from_u64(1));
        assert_eq!(layout.geo.len(), n);
        assert_eq!(layout.random.len(), n);
        assert_eq!(layout.len(), n);
    }
}

#[test]
fn test_empty_gallery_is_valid() {
    let layout = compute_layout(&[], &[], &config(65.0, 0.25), &mut StdRng::seed_from_u64(1));
    assert!(layout.is_empty());
    assert!(layout.positions(LayoutMode::Geo).is_empty());
    assert!(layout.positions(LayoutMode::Random).is_empty());
}

#[test]
fn test_three_asset_scenario() {
    let a = assets(3);
    let samples = vec![
        GeoSample::new(10.0, 20.0),
        GeoSample::new(10.0, 20.0),
        GeoSample::new(30.0, 40.0),
    ];
    let d = 0.5;
    let layout = compute_layout(&a, &samples, &config(60.0, d), &mut StdRng::seed_from_u64(7));
    let geo = &layout.geo;

    assert_eq!(geo[0].x, geo[1].x);
    assert_eq!(geo[0].y, geo[1].y);
    assert!(approx(geo[0].x, -30.0));
    assert!(approx(geo[0].y, -30.0));
    assert!(approx(geo[2].x, 30.0));
    assert!(approx(geo[2].y, 30.0));

    assert!(approx(geo[0].z, 0.0));
    assert!(approx(geo[1].z, -d));
    assert!(approx(geo[2].z, -2.0 * d));
}

#[test]
fn test_located_assets_stay_in_range() {
    let a = assets(5);
    let samples = vec![
        GeoSample::new(35.68, 139.69),
        GeoSample::new(-33.86, 151.21),
        GeoSample::new(51.50, -0.12),
        GeoSample::new(40.71, -74.00),
        GeoSample::new(-22.90, -43.17),
    ];
    let range = 65.0;
    let layout = compute_layout(&a, &samples, &config(range, 0.25), &mut StdRng::seed_from_u64(3));
    for p in &layout.geo {
        assert!(p.x >= -range / 2.0 && p.x <= range / 2.0, "x out of range: {p}");
        assert!(p.y >= -range / 2.0 && p.y <= range / 2.0, "y out of range: {p}");
    }
    // extremes land on the edges
    assert!(approx(layout.geo[0].y, range / 2.0));
    assert!(approx(layout.geo[1].y, -range / 2.0));
    assert!(approx(layout.geo[1].x, range / 2.0));
    assert!(approx(layout.geo[3].x, -range / 2.0));
}

#[test]
fn test_single_located_asset_is_centered() {
    let a = assets(3);
    let samples = vec![
        GeoSample::absent(),
        GeoSample::new(48.85, 2.35),
        GeoSample::absent(),
    ];
    let layout = compute_layout(&a, &samples, &config(65.0, 0.25), &mut StdRng::seed_from_u64(11));
    assert_eq!(layout.geo[1].x, 0.0);
    assert_eq!(layout.geo[1].y, 0.0);
}

#[test]
fn test_identical_latitudes_are_centered() {
    let a = assets(3);
    let samples = vec![
        GeoSample::new(12.0, 1.0),
        GeoSample::new(12.0, 2.0),
        GeoSample::new(12.0, 3.0),
    ];
    let layout = compute_layout(&a, &samples, &config(65.0, 0.25), &mut StdRng::seed_from_u64(5));
    for p in &layout.geo {
        assert_eq!(p.y, 0.0);
    }
    assert!(approx(layout.geo[0].x, -32.5));
    assert!(approx(layout.geo[2].x, 32.5));
}

#[test]
fn test_z_strictly_decreasing() {
    let a = assets(20);
    let samples: Vec<GeoSample> = (0..20)
        .map(|i| {
            if i % 3 == 0 {
                GeoSample::absent()
            } else {
                GeoSample::new(i as f64, -(i as f64))
            }
        })
        .collect();
    let layout = compute_layout(&a, &samples, &config(70.0, 0.05), &mut StdRng::seed_from_u64(9));
    for positions in [&layout.geo, &layout.random] {
        for w in positions.windows(2) {
            assert!(w[0].z > w[1].z);
        }
    }
    assert!(approx(layout.geo[19].z, depth_for(19, 0.05)));
}

#[test]
fn test_z_follows_asset_index() {
    let a = vec![Asset::new("late", 4), Asset::new("early", 1)];
    let layout = compute_layout(
        &a,
        &[GeoSample::absent(), GeoSample::absent()],
        &config(65.0, 1.0),
        &mut StdRng::seed_from_u64(2),
    );
    assert!(approx(layout.geo[0].z, -4.0));
    assert!(approx(layout.geo[1].z, -1.0));
}

#[test]
fn test_geo_layout_is_reproducible() {
    let a = assets(6);
    let samples = vec![
        GeoSample::new(1.0, 2.0),
        GeoSample::absent(),
        GeoSample::new(3.0, 5.0),
        GeoSample {
            latitude: Some(2.0),
            longitude: None,
        },
        GeoSample::absent(),
        GeoSample::new(0.5, 4.0),
    ];
    let cfg = config(65.0, 0.25);
    let first = compute_layout(&a, &samples, &cfg, &mut StdRng::seed_from_u64(42));
    let second = compute_layout(&a, &samples, &cfg, &mut StdRng::seed_from_u64(42));
    assert_eq!(first.geo, second.geo);
    assert_eq!(first.random, second.random);
}

#[test]
fn test_absent_metadata_is_placed_not_dropped() {
    let a = assets(50);
    let samples = vec![GeoSample::absent(); 50];
    let range = 65.0;
    let layout = compute_layout(&a, &samples, &config(range, 0.25), &mut StdRng::seed_from_u64(17));
    assert_eq!(layout.geo.len(), 50);
    for p in layout.geo.iter().chain(&layout.random) {
        assert!(p.x >= -range / 2.0 && p.x < range / 2.0);
        assert!(p.y >= -range / 2.0 && p.y < range / 2.0);
    }
    // random draws should not all collapse onto one point
    assert!(layout.geo.iter().any(|p| p.x != layout.geo[0].x));
}

#[test]
fn test_partial_metadata_axes_are_independent() {
    let a = assets(3);
    let samples = vec![
        GeoSample {
            latitude: Some(0.0),
            longitude: None,
        },
        GeoSample {
            latitude: Some(10.0),
            longitude: Some(100.0),
        },
        GeoSample {
            latitude: None,
            longitude: Some(200.0),
        },
    ];
    let layout = compute_layout(&a, &samples, &config(60.0, 0.25), &mut StdRng::seed_from_u64(8));
    // latitude bounds come from assets 0 and 1 only
    assert!(approx(layout.geo[0].y, -30.0));
    assert!(approx(layout.geo[1].y, 30.0));
    // longitude bounds come from assets 1 and 2 only
    assert!(approx(layout.geo[1].x, -30.0));
    assert!(approx(layout.geo[2].x, 30.0));
}

#[test]
fn test_zero_coordinate_is_not_absent() {
    let a = assets(2);
    let samples = vec![GeoSample::new(0.0, 0.0), GeoSample::new(10.0, 10.0)];
    let layout = compute_layout(&a, &samples, &config(20.0, 0.25), &mut StdRng::seed_from_u64(4));
    assert!(approx(layout.geo[0].x, -10.0));
    assert!(approx(layout.geo[0].y, -10.0));
}

#[test]
fn test_non_finite_samples_fall_back_to_random() {
    let a = assets(3);
    let samples = vec![
        GeoSample::new(f64::NAN, 5.0),
        GeoSample::new(1.0, 1.0),
        GeoSample::new(3.0, 9.0),
    ];
    let range = 65.0;
    let layout = compute_layout(&a, &samples, &config(range, 0.25), &mut StdRng::seed_from_u64(6));
    for p in &layout.geo {
        assert!(p.is_finite());
    }
    assert!(approx(layout.geo[1].y, -range / 2.0));
    assert!(approx(layout.geo[2].y, range / 2.0));
}

#[test]
fn test_missing_samples_count_as_absent() {
    let a = assets(4);
    let samples = vec![GeoSample::new(1.0, 1.0), GeoSample::new(2.0, 2.0)];
    let layout = compute_layout(&a, &samples, &config(65.0, 0.25), &mut StdRng::seed_from_u64(12));
    assert_eq!(layout.geo.len(), 4);
    assert!(approx(layout.geo[0].x, -32.5));
    assert!(approx(layout.geo[1].x, 32.5));
}

#[test]
fn test_random_layout_differs_from_geo() {
    let a = assets(4);
    let samples = vec![
        GeoSample::new(1.0, 1.0),
        GeoSample::new(2.0, 2.0),
        GeoSample::new(3.0, 3.0),
        GeoSample::new(4.0, 4.0),
    ];
    let layout = compute_layout(&a, &samples, &config(65.0, 0.25), &mut StdRng::seed_from_u64(21));
    assert_ne!(layout.geo, layout.random);
    for (g, r) in layout.geo.iter().zip(&layout.random) {
        assert_eq!(g.z, r.z);
    }
}

#[test]
fn test_geo_coverage_counts() {
    let samples = vec![
        GeoSample::new(1.0, 2.0),
        GeoSample::absent(),
        GeoSample {
            latitude: None,
            longitude: Some(3.0),
        },
        GeoSample::new(4.0, 5.0),
    ];
    let c = GeoCoverage::from_samples(&samples);
    assert_eq!(c.total, 4);
    assert_eq!(c.located, 2);
    assert_eq!(c.partial, 1);
    assert_eq!(c.missing, 1);
}

#[test]
fn test_layout_mode_display_and_toggle() {
    assert_eq!(format!("{}", LayoutMode::Geo), "Geo");
    assert_eq!(format!("{}", LayoutMode::Random), "Random");
    assert_eq!(LayoutMode::Geo.toggled(), LayoutMode::Random);
    assert_eq!(LayoutMode::Random.toggled(), LayoutMode::Geo);
    assert_eq!(LayoutMode::default(), LayoutMode::Geo);
}
