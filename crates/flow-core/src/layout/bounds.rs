use crate::asset::GeoSample;

/// Closed interval covered by the present values of one coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Bounds over the finite values in `values`, or `None` when there are none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Bounds { min: v, max: v }),
                Some(b) => Some(Bounds {
                    min: b.min.min(v),
                    max: b.max.max(v),
                }),
            })
    }

    /// All present values are identical (this includes a single value).
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn normalize(&self, value: f64, range: f64) -> f64 {
        normalize(value, self.min, self.max, range)
    }
}

/// Linearly remap `value` from `[min, max]` onto `[-range/2, range/2]`.
///
/// A degenerate interval maps to the center, 0.
pub fn normalize(value: f64, min: f64, max: f64, range: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    ((value - min) / (max - min)) * range - range / 2.0
}

/// Per-axis bounds over a batch of samples.
///
/// Latitude and longitude are bounded independently, each only from the
/// samples where that axis is present.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoBounds {
    pub latitude: Option<Bounds>,
    pub longitude: Option<Bounds>,
}

impl GeoBounds {
    pub fn from_samples(samples: &[GeoSample]) -> Self {
        Self {
            latitude: Bounds::from_values(samples.iter().filter_map(|s| s.latitude)),
            longitude: Bounds::from_values(samples.iter().filter_map(|s| s.longitude)),
        }
    }
}
