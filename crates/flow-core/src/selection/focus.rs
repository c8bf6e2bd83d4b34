use crate::config::FocusConfig;
use crate::geometry::Position;

use super::state::Selection;

/// Where item `index` should be heading this frame.
///
/// - The selected item sits `focus_distance` in front of the camera.
/// - While something is selected, every other item is pushed out along its
///   camera-relative offset by `fanout_scale`, keeping its own depth.
/// - With nothing selected, items rest at their layout position.
pub fn target_position(
    index: usize,
    base: Position,
    selection: &Selection,
    camera: Position,
    config: &FocusConfig,
) -> Position {
    match selection.selected() {
        Some(selected) if selected == index => focus_point(camera, config.focus_distance),
        Some(_) => Position::new(
            (base.x - camera.x) * config.fanout_scale,
            (base.y - camera.y) * config.fanout_scale,
            base.z,
        ),
        None => base,
    }
}

/// The point the focused photo settles on, straight ahead of the camera.
pub fn focus_point(camera: Position, focus_distance: f64) -> Position {
    Position::new(camera.x, camera.y, camera.z - focus_distance)
}

/// Targets for every item of a layout in one pass.
pub fn targets(
    layout: &[Position],
    selection: &Selection,
    camera: Position,
    config: &FocusConfig,
) -> Vec<Position> {
    layout
        .iter()
        .enumerate()
        .map(|(i, &base)| target_position(i, base, selection, camera, config))
        .collect()
}
