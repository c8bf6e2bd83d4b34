mod common;

use flow_core::camera::{Camera, Viewport};
use flow_core::geometry::Position;
use flow_core::picking::{pick, plane_half_extents, resolve_pointer, PickTarget, PointerEvent};

use common::approx;

fn camera() -> Camera {
    let mut c = Camera::default();
    c.position = Position::new(0.0, 0.0, 20.0);
    c.fov_y_degrees = 90.0;
    c
}

fn viewport() -> Viewport {
    Viewport::new(0.0, 0.0, 800.0, 600.0)
}

fn target(index: usize, center: Position) -> PickTarget {
    let (half_width, half_height) = plane_half_extents(None);
    PickTarget {
        index,
        center,
        half_width,
        half_height,
    }
}

#[test]
fn test_projection_of_centre_point() {
    let p = viewport()
        .project(&camera(), Position::new(0.0, 0.0, 0.0))
        .unwrap();
    assert!(approx(p.x, 400.0));
    assert!(approx(p.y, 300.0));
    assert!(approx(p.depth, 20.0));
    // fov 90: focal length equals half the height
    assert!(approx(p.scale, 300.0 / 20.0));
}

#[test]
fn test_projection_flips_y() {
    let p = viewport()
        .project(&camera(), Position::new(2.0, 2.0, 0.0))
        .unwrap();
    assert!(p.x > 400.0);
    assert!(p.y < 300.0);
}

#[test]
fn test_point_behind_camera_is_not_projected() {
    let c = camera();
    assert!(viewport().project(&c, Position::new(0.0, 0.0, 25.0)).is_none());
    assert!(viewport().project(&c, Position::new(0.0, 0.0, 20.0)).is_none());
}

#[test]
fn test_world_per_pixel_matches_projection() {
    let c = camera();
    let wpp = c.world_per_pixel(600.0, 20.0);
    let p = viewport().project(&c, Position::ZERO).unwrap();
    assert!(approx(wpp * p.scale, 1.0));
}

#[test]
fn test_pick_front_most() {
    let targets = [
        target(0, Position::new(0.0, 0.0, 0.0)),
        target(1, Position::new(0.0, 0.0, 5.0)),
        target(2, Position::new(0.0, 0.0, -5.0)),
    ];
    let hit = pick(&camera(), &viewport(), (400.0, 300.0), &targets);
    assert_eq!(hit, Some(1));
}

#[test]
fn test_pick_tie_goes_to_lower_index() {
    let targets = [
        target(3, Position::new(0.0, 0.0, 0.0)),
        target(1, Position::new(0.5, 0.0, 0.0)),
    ];
    let hit = pick(&camera(), &viewport(), (402.0, 300.0), &targets);
    assert_eq!(hit, Some(1));
}

#[test]
fn test_pick_respects_plane_extents() {
    let targets = [target(0, Position::ZERO)];
    let (hw, _) = plane_half_extents(None);
    let scale = 300.0 / 20.0;
    let inside = 400.0 + (hw - 0.1) * scale;
    let outside = 400.0 + (hw + 0.1) * scale;
    assert_eq!(pick(&camera(), &viewport(), (inside, 300.0), &targets), Some(0));
    assert_eq!(pick(&camera(), &viewport(), (outside, 300.0), &targets), None);
}

#[test]
fn test_resolve_pointer_yields_one_event() {
    let targets = [target(0, Position::ZERO)];
    assert_eq!(
        resolve_pointer(&camera(), &viewport(), (400.0, 300.0), &targets),
        PointerEvent::Click(0)
    );
    assert_eq!(
        resolve_pointer(&camera(), &viewport(), (5.0, 5.0), &targets),
        PointerEvent::Missed
    );
    assert_eq!(
        resolve_pointer(&camera(), &viewport(), (400.0, 300.0), &[]),
        PointerEvent::Missed
    );
}

#[test]
fn test_plane_extents_follow_aspect() {
    let (w, h) = plane_half_extents(Some(2.0));
    assert!(approx(w, (5.0 + 0.25) / 2.0));
    assert!(approx(h, (2.5 + 0.25) / 2.0));
    assert_eq!(plane_half_extents(Some(0.0)), plane_half_extents(None));
}

#[test]
fn test_dolly_is_clamped() {
    let mut c = camera();
    c.dolly(1000.0);
    assert!(approx(c.position.z, c.min_distance));
    c.dolly(-1000.0);
    assert!(approx(c.position.z, c.max_distance));
}

#[test]
fn test_pan_moves_sideways() {
    let mut c = camera();
    c.pan(3.0, -1.5);
    assert!(approx(c.position.x, 3.0));
    assert!(approx(c.position.y, -1.5));
    assert!(approx(c.position.z, 20.0));
}
