use std::sync::Arc;

use tracing::info;

use crate::asset::{Asset, GeoSample};
use crate::config::{GalleryConfig, LoadingConfig};
use crate::io::{
    fetch_geo_batch, load_assets, AssetSource, BatchLimits, LoadReporter, LoadStage,
    MetadataExtractor,
};
use crate::session::GallerySession;

/// Assets and their geolocation, ready to be laid out.
#[derive(Clone, Debug, Default)]
pub struct LoadedGallery {
    pub assets: Vec<Asset>,
    pub samples: Vec<GeoSample>,
}

impl LoadedGallery {
    pub fn into_session(self, config: GalleryConfig) -> GallerySession {
        GallerySession::new(self.assets, self.samples, config)
    }
}

/// List `source` and read every photo's location.
///
/// Never fails: an unavailable source gives an empty gallery and unreadable
/// metadata gives absent samples, both logged.
pub fn load_gallery(
    source: &dyn AssetSource,
    extractor: Arc<dyn MetadataExtractor>,
    loading: &LoadingConfig,
    reporter: &dyn LoadReporter,
) -> LoadedGallery {
    reporter.begin_stage(LoadStage::Listing, None);
    let assets = load_assets(source);
    reporter.finish_stage();

    let samples = fetch_geo_batch(
        extractor,
        &assets,
        BatchLimits::from_config(loading),
        reporter,
    );
    info!(assets = assets.len(), "Gallery loaded");
    LoadedGallery { assets, samples }
}
