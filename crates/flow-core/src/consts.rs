/// Default world-space span of normalized and random x/y coordinates.
pub const DEFAULT_RANGE: f64 = 65.0;

/// Default z-stacking increment between consecutive assets.
pub const DEFAULT_DEPTH_STEP: f64 = 0.25;

/// Default distance in front of the camera at which a focused photo settles.
pub const DEFAULT_FOCUS_DISTANCE: f64 = 10.0;

/// Default outward scale applied to unselected photos while one is focused.
pub const DEFAULT_FANOUT_SCALE: f64 = 1.5;

/// Default fraction of the remaining distance closed per reference frame.
pub const DEFAULT_DAMPING: f64 = 0.15;

/// Frame rate at which `damping` is defined. Ticks with a different elapsed
/// time are rescaled so motion speed does not depend on the display rate.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Default camera position: looking down -Z from 25 units out.
pub const DEFAULT_CAMERA_POSITION: [f64; 3] = [0.0, 0.0, 25.0];

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_Y_DEGREES: f64 = 100.0;

/// Near clip distance. Points closer to the camera than this are not drawn.
pub const DEFAULT_NEAR: f64 = 0.1;

/// Dolly limits, measured as the camera's z distance from the z=0 plane.
pub const DEFAULT_MIN_CAMERA_DISTANCE: f64 = 2.0;
pub const DEFAULT_MAX_CAMERA_DISTANCE: f64 = 120.0;

/// Photo plane width in world units. Height follows the image aspect ratio.
pub const PHOTO_WIDTH: f64 = 5.0;

/// Aspect ratio (width / height) assumed until a photo's dimensions are known.
pub const DEFAULT_PHOTO_ASPECT: f64 = 1.5;

/// Width of the white frame drawn around each photo.
pub const PHOTO_BORDER: f64 = 0.25;

/// File extensions (lowercase) treated as photos by the directory source.
pub const PHOTO_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "tif", "tiff", "webp"];

/// Default per-photo metadata deadline in milliseconds (0 disables it).
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Concurrent metadata reads when the CPU count cannot be queried.
pub const DEFAULT_METADATA_WORKERS: usize = 4;

/// Longest edge of decoded photo textures.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 512;

/// Upper bound on bytes scanned for JPEG segments before giving up on EXIF.
pub const EXIF_SCAN_LIMIT: usize = 1 << 20;
