pub mod batch;
pub mod exif;
pub mod photo;
pub mod progress;
pub mod source;

pub use batch::{fetch_geo_batch, BatchLimits};
pub use exif::{ExifGpsExtractor, MetadataExtractor};
pub use progress::{LoadReporter, LoadStage, NoOpReporter};
pub use source::{load_assets, AssetSource, DirectorySource, StaticSource};
