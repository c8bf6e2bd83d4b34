use flow_core::camera::Camera;
use flow_core::config::CameraConfig;

/// 3D view state: the camera plus one texture slot per photo.
pub struct ViewportState {
    pub camera: Camera,
    pub textures: Vec<Option<egui::TextureHandle>>,
    /// Width / height of each photo once its thumbnail is decoded.
    pub aspects: Vec<Option<f64>>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            textures: Vec::new(),
            aspects: Vec::new(),
        }
    }
}

impl ViewportState {
    /// Drop all textures and make room for `count` photos.
    pub fn reset(&mut self, count: usize) {
        self.textures = vec![None; count];
        self.aspects = vec![None; count];
    }

    pub fn reset_camera(&mut self, config: &CameraConfig) {
        self.camera = Camera::from_config(config);
    }

    pub fn loaded_textures(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }
}
