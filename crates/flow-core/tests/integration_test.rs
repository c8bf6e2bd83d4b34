#[allow(dead_code)]
mod common;

use std::sync::Arc;

use tempfile::TempDir;

use flow_core::asset::GeoSample;
use flow_core::camera::{Camera, Viewport};
use flow_core::config::GalleryConfig;
use flow_core::io::{DirectorySource, ExifGpsExtractor, NoOpReporter, StaticSource};
use flow_core::layout::LayoutMode;
use flow_core::loader::load_gallery;
use flow_core::picking::{plane_half_extents, resolve_pointer, PickTarget, PointerEvent};

use common::write_jpeg;

fn seeded_config() -> GalleryConfig {
    let mut config = GalleryConfig::default();
    config.layout.seed = Some(2024);
    config.layout.range = 60.0;
    config
}

fn photo_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_jpeg(dir.path(), "01.jpg", Some(GeoSample::new(10.0, 20.0)));
    write_jpeg(dir.path(), "02.jpg", Some(GeoSample::new(10.0, 20.0)));
    write_jpeg(dir.path(), "03.jpg", Some(GeoSample::new(30.0, 40.0)));
    write_jpeg(dir.path(), "04.jpg", None);
    std::fs::write(dir.path().join("05.jpg"), b"garbage").unwrap();
    std::fs::write(dir.path().join("readme.md"), b"# trip").unwrap();
    dir
}

#[test]
fn test_folder_to_session_end_to_end() {
    let dir = photo_folder();
    let config = seeded_config();
    let source = DirectorySource::new(dir.path(), false);

    let loaded = load_gallery(
        &source,
        Arc::new(ExifGpsExtractor),
        &config.loading,
        &NoOpReporter,
    );
    assert_eq!(loaded.assets.len(), 5);
    assert_eq!(loaded.samples.len(), 5);
    assert!(loaded.samples[3].is_absent());
    assert!(loaded.samples[4].is_absent());

    let session = loaded.into_session(config);
    let geo = &session.layout().geo;
    assert_eq!(geo[0].x, geo[1].x);
    assert_eq!(geo[0].y, geo[1].y);
    assert!((geo[0].x + 30.0).abs() < 1e-6);
    assert!((geo[2].y - 30.0).abs() < 1e-6);
    for (i, p) in geo.iter().enumerate() {
        assert!((p.z + i as f64 * 0.25).abs() < 1e-12);
    }

    let coverage = session.geo_coverage();
    assert_eq!(coverage.located, 3);
    assert_eq!(coverage.missing, 2);
}

#[test]
fn test_missing_folder_gives_empty_session() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path().join("absent"), false);
    let loaded = load_gallery(
        &source,
        Arc::new(ExifGpsExtractor),
        &GalleryConfig::default().loading,
        &NoOpReporter,
    );
    let session = loaded.into_session(seeded_config());
    assert!(session.is_empty());
    assert_eq!(session.render_items().count(), 0);
}

#[test]
fn test_click_focus_and_release() {
    let dir = photo_folder();
    let config = seeded_config();
    let urls = (1..=3)
        .map(|i| dir.path().join(format!("0{i}.jpg")).to_string_lossy().into_owned())
        .collect();
    let loaded = load_gallery(
        &StaticSource::new(urls),
        Arc::new(ExifGpsExtractor),
        &config.loading,
        &NoOpReporter,
    );
    let mut session = loaded.into_session(config);

    let mut camera = Camera::default();
    let viewport = Viewport::new(0.0, 0.0, 1280.0, 720.0);
    let (half_width, half_height) = plane_half_extents(None);
    let targets: Vec<PickTarget> = session
        .render_items()
        .map(|item| PickTarget {
            index: item.index,
            center: item.position,
            half_width,
            half_height,
        })
        .collect();

    // aim straight at photo 2
    let p = viewport.project(&camera, targets[2].center).unwrap();
    let event = resolve_pointer(&camera, &viewport, (p.x, p.y), &targets);
    assert_eq!(event, PointerEvent::Click(2));
    session.handle_pointer(event).unwrap();

    for _ in 0..240 {
        camera.pan(0.01, 0.0);
        session.tick(camera.position, 1.0 / 60.0);
    }
    let focused = session.rendered_positions()[2];
    // a moving camera leaves a small steady lag
    assert!((focused.x - camera.position.x).abs() < 0.1);
    assert!((focused.z - (camera.position.z - 10.0)).abs() < 1e-3);

    let event = resolve_pointer(&camera, &viewport, (1.0, 1.0), &[]);
    session.handle_pointer(event).unwrap();
    assert_eq!(session.selected(), None);

    session.toggle_mode();
    assert_eq!(session.mode(), LayoutMode::Random);
    session.settle(camera.position);
    assert_eq!(session.rendered_positions(), session.layout().random.as_slice());
}
