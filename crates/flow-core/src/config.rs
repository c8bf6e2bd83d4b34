use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CAMERA_POSITION, DEFAULT_DAMPING, DEFAULT_DEPTH_STEP, DEFAULT_FANOUT_SCALE,
    DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_FOCUS_DISTANCE, DEFAULT_FOV_Y_DEGREES,
    DEFAULT_MAX_CAMERA_DISTANCE, DEFAULT_MIN_CAMERA_DISTANCE, DEFAULT_NEAR, DEFAULT_RANGE,
    DEFAULT_THUMBNAIL_SIZE,
};
use crate::error::{FlowError, Result};
use crate::layout::LayoutMode;

/// Everything a gallery session can be tuned with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// World-space span of normalized and random x/y coordinates.
    pub range: f64,
    /// Z distance between consecutive assets.
    pub depth_step: f64,
    /// Layout shown when a session starts.
    pub mode: LayoutMode,
    /// Seed for random placement. `None` draws a fresh seed per session.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE,
            depth_step: DEFAULT_DEPTH_STEP,
            mode: LayoutMode::Geo,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Distance in front of the camera where the selected photo settles.
    pub focus_distance: f64,
    /// Outward scale for unselected photos while one is focused.
    pub fanout_scale: f64,
    /// Fraction of remaining distance closed per reference frame, in (0, 1].
    pub damping: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            focus_distance: DEFAULT_FOCUS_DISTANCE,
            fanout_scale: DEFAULT_FANOUT_SCALE,
            damping: DEFAULT_DAMPING,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 3],
    pub fov_y_degrees: f64,
    pub near: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            near: DEFAULT_NEAR,
            min_distance: DEFAULT_MIN_CAMERA_DISTANCE,
            max_distance: DEFAULT_MAX_CAMERA_DISTANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Descend into sub-folders when listing a directory.
    pub recursive: bool,
    /// Longest one photo's metadata read may take, counted from when it
    /// starts. 0 waits indefinitely.
    pub fetch_timeout_ms: u64,
    /// Metadata reads running at once. 0 uses one per CPU.
    pub metadata_workers: usize,
    /// Longest edge of decoded photo textures, in pixels.
    pub thumbnail_size: u32,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            metadata_workers: 0,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl LoadingConfig {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        if self.fetch_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.fetch_timeout_ms))
        }
    }
}

impl GalleryConfig {
    /// Reject values the layout and focus math cannot work with.
    pub fn validate(&self) -> Result<()> {
        positive("layout.range", self.layout.range)?;
        positive("layout.depth_step", self.layout.depth_step)?;
        positive("focus.focus_distance", self.focus.focus_distance)?;
        positive("focus.fanout_scale", self.focus.fanout_scale)?;
        let d = self.focus.damping;
        if !d.is_finite() || d <= 0.0 || d > 1.0 {
            return Err(FlowError::InvalidConfig(format!(
                "focus.damping must be in (0, 1], got {d}"
            )));
        }
        let fov = self.camera.fov_y_degrees;
        if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
            return Err(FlowError::InvalidConfig(format!(
                "camera.fov_y_degrees must be in (0, 180), got {fov}"
            )));
        }
        positive("camera.near", self.camera.near)?;
        positive("camera.min_distance", self.camera.min_distance)?;
        if self.camera.max_distance < self.camera.min_distance {
            return Err(FlowError::InvalidConfig(format!(
                "camera.max_distance ({}) is below camera.min_distance ({})",
                self.camera.max_distance, self.camera.min_distance
            )));
        }
        if self.camera.position.iter().any(|v| !v.is_finite()) {
            return Err(FlowError::InvalidConfig(
                "camera.position must be finite".into(),
            ));
        }
        if self.loading.thumbnail_size == 0 {
            return Err(FlowError::InvalidConfig(
                "loading.thumbnail_size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FlowError::InvalidConfig(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}
