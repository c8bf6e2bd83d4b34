use crate::config::CameraConfig;
use crate::geometry::Position;

/// Perspective camera that always looks down -Z with +Y up.
///
/// The gallery only pans and dollies, it never rotates, so the view
/// direction is fixed and projection reduces to a divide by depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Position,
    pub fov_y_degrees: f64,
    pub near: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: Position::from_array(config.position),
            fov_y_degrees: config.fov_y_degrees,
            near: config.near,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        }
    }

    /// Translate sideways in world units.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Move toward (positive) or away from (negative) the gallery.
    ///
    /// The distance from the z=0 plane stays within the configured limits.
    pub fn dolly(&mut self, amount: f64) {
        let z = self.position.z - amount;
        self.position.z = z.clamp(self.min_distance, self.max_distance.max(self.min_distance));
    }

    /// Depth of `point` in front of the camera. Negative means behind it.
    pub fn depth_of(&self, point: Position) -> f64 {
        self.position.z - point.z
    }

    /// Focal length in pixels for a viewport `height_px` tall.
    pub fn focal_length_px(&self, height_px: f64) -> f64 {
        let half_fov = (self.fov_y_degrees.to_radians() / 2.0).tan();
        (height_px / 2.0) / half_fov
    }

    /// World units covered by one pixel at `depth` in front of the camera.
    pub fn world_per_pixel(&self, height_px: f64, depth: f64) -> f64 {
        depth.max(self.near) / self.focal_length_px(height_px)
    }
}

/// Screen area the scene is drawn into, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A world point mapped into the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Pixels per world unit at this depth.
    pub scale: f64,
    pub depth: f64,
}

impl Viewport {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Project `point` for `camera`, or `None` if it is closer than the near plane.
    pub fn project(&self, camera: &Camera, point: Position) -> Option<Projected> {
        let depth = camera.depth_of(point);
        if depth < camera.near || self.height <= 0.0 {
            return None;
        }
        let scale = camera.focal_length_px(self.height) / depth;
        let (cx, cy) = self.center();
        Some(Projected {
            x: cx + (point.x - camera.position.x) * scale,
            y: cy - (point.y - camera.position.y) * scale,
            scale,
            depth,
        })
    }
}
