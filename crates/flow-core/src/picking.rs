use crate::camera::{Camera, Viewport};
use crate::consts::{DEFAULT_PHOTO_ASPECT, PHOTO_BORDER, PHOTO_WIDTH};
use crate::geometry::Position;

/// What a pointer press resolved to. Exactly one per press: a hit on an item
/// never also counts as a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Click(usize),
    Missed,
}

/// Half extents of a photo plane including its border.
pub fn plane_half_extents(aspect: Option<f64>) -> (f64, f64) {
    let aspect = aspect
        .filter(|a| a.is_finite() && *a > 0.0)
        .unwrap_or(DEFAULT_PHOTO_ASPECT);
    let width = PHOTO_WIDTH + PHOTO_BORDER;
    let height = PHOTO_WIDTH / aspect + PHOTO_BORDER;
    (width / 2.0, height / 2.0)
}

/// An axis-aligned quad facing the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickTarget {
    pub index: usize,
    pub center: Position,
    pub half_width: f64,
    pub half_height: f64,
}

/// Item under `cursor`, if any.
///
/// Ordering contract:
/// - The hit nearest to the camera wins.
/// - At equal depth the lower index wins.
pub fn pick(
    camera: &Camera,
    viewport: &Viewport,
    cursor: (f64, f64),
    targets: &[PickTarget],
) -> Option<usize> {
    let mut best: Option<(f64, usize)> = None;

    for target in targets {
        let Some(p) = viewport.project(camera, target.center) else {
            continue;
        };
        let hw = target.half_width * p.scale;
        let hh = target.half_height * p.scale;
        if (cursor.0 - p.x).abs() > hw || (cursor.1 - p.y).abs() > hh {
            continue;
        }
        let better = match best {
            None => true,
            Some((depth, index)) => {
                p.depth < depth || (p.depth == depth && target.index < index)
            }
        };
        if better {
            best = Some((p.depth, target.index));
        }
    }

    best.map(|(_, index)| index)
}

/// Resolve a press into the single event the selection reacts to.
pub fn resolve_pointer(
    camera: &Camera,
    viewport: &Viewport,
    cursor: (f64, f64),
    targets: &[PickTarget],
) -> PointerEvent {
    match pick(camera, viewport, cursor, targets) {
        Some(index) => PointerEvent::Click(index),
        None => PointerEvent::Missed,
    }
}
