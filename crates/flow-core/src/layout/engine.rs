use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::asset::{Asset, GeoSample};
use crate::config::LayoutConfig;
use crate::geometry::Position;

use super::bounds::{Bounds, GeoBounds};

/// Which precomputed position array drives the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    Geo,
    Random,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Geo => Self::Random,
            Self::Random => Self::Geo,
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geo => write!(f, "Geo"),
            Self::Random => write!(f, "Random"),
        }
    }
}

/// Both layouts for one asset batch. Immutable once computed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Positions derived from geolocation, random on absent axes.
    pub geo: Vec<Position>,
    /// Fully random positions, drawn once per session.
    pub random: Vec<Position>,
}

impl Layout {
    pub fn positions(&self, mode: LayoutMode) -> &[Position] {
        match mode {
            LayoutMode::Geo => &self.geo,
            LayoutMode::Random => &self.random,
        }
    }

    pub fn len(&self) -> usize {
        self.geo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geo.is_empty()
    }
}

/// How much of a batch carries usable geolocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoCoverage {
    pub total: usize,
    /// Both axes present.
    pub located: usize,
    /// Exactly one axis present.
    pub partial: usize,
    /// Neither axis present.
    pub missing: usize,
}

impl GeoCoverage {
    pub fn from_samples(samples: &[GeoSample]) -> Self {
        let mut coverage = GeoCoverage {
            total: samples.len(),
            ..Default::default()
        };
        for s in samples {
            match (present(s.latitude), present(s.longitude)) {
                (Some(_), Some(_)) => coverage.located += 1,
                (None, None) => coverage.missing += 1,
                _ => coverage.partial += 1,
            }
        }
        coverage
    }
}

/// Z coordinate of the asset at `index`: later assets sit further back.
pub fn depth_for(index: usize, depth_step: f64) -> f64 {
    -(index as f64) * depth_step
}

/// Compute the geo and random layouts for a batch.
///
/// `samples[i]` belongs to `assets[i]`; assets without a sample count as
/// having no location. Every asset gets a position in both layouts: axes
/// with metadata are normalized against the batch bounds of that axis, axes
/// without it draw uniformly from `[-range/2, range/2)`.
pub fn compute_layout<R: Rng>(
    assets: &[Asset],
    samples: &[GeoSample],
    config: &LayoutConfig,
    rng: &mut R,
) -> Layout {
    let samples: Vec<GeoSample> = (0..assets.len())
        .map(|i| samples.get(i).copied().map(sanitize).unwrap_or_default())
        .collect();
    let bounds = GeoBounds::from_samples(&samples);
    let range = config.range;

    let geo: Vec<Position> = assets
        .iter()
        .zip(&samples)
        .map(|(asset, sample)| {
            let y = axis_coordinate(sample.latitude, bounds.latitude, range, rng);
            let x = axis_coordinate(sample.longitude, bounds.longitude, range, rng);
            Position::new(x, y, depth_for(asset.index, config.depth_step))
        })
        .collect();

    let random: Vec<Position> = assets
        .iter()
        .map(|asset| {
            let x = random_coordinate(rng, range);
            let y = random_coordinate(rng, range);
            Position::new(x, y, depth_for(asset.index, config.depth_step))
        })
        .collect();

    let coverage = GeoCoverage::from_samples(&samples);
    debug!(
        latitude = ?bounds.latitude,
        longitude = ?bounds.longitude,
        "Geo bounds"
    );
    info!(
        assets = assets.len(),
        located = coverage.located,
        partial = coverage.partial,
        missing = coverage.missing,
        range,
        "Layout computed"
    );

    Layout { geo, random }
}

fn axis_coordinate<R: Rng>(
    value: Option<f64>,
    bounds: Option<Bounds>,
    range: f64,
    rng: &mut R,
) -> f64 {
    match (value, bounds) {
        (Some(v), Some(b)) => b.normalize(v, range),
        _ => random_coordinate(rng, range),
    }
}

fn random_coordinate<R: Rng>(rng: &mut R, range: f64) -> f64 {
    rng.gen::<f64>() * range - range / 2.0
}

fn present(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

/// Non-finite coordinates are unreadable metadata, not positions.
fn sanitize(sample: GeoSample) -> GeoSample {
    GeoSample {
        latitude: present(sample.latitude),
        longitude: present(sample.longitude),
    }
}
