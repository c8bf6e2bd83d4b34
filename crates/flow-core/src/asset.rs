use serde::{Deserialize, Serialize};

/// A single photo in the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Opaque locator handed back to the metadata extractor and the renderer.
    pub url: String,
    /// Position in the source listing. Defines default depth stacking.
    pub index: usize,
}

impl Asset {
    pub fn new(url: impl Into<String>, index: usize) -> Self {
        Self {
            url: url.into(),
            index,
        }
    }

    /// Build assets from a listing, numbering them in listing order.
    pub fn from_urls<I, S>(urls: I) -> Vec<Asset>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(index, url)| Asset::new(url, index))
            .collect()
    }
}

/// Geolocation read from a photo's metadata.
///
/// `None` means the value was absent or unreadable. It is never the same as
/// a real 0.0 coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoSample {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Sample for a photo with no usable location.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn is_absent(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}

impl std::fmt::Display for GeoSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let axis = |v: Option<f64>| match v {
            Some(v) => format!("{v:.6}"),
            None => "-".to_string(),
        };
        write!(f, "{}, {}", axis(self.latitude), axis(self.longitude))
    }
}
