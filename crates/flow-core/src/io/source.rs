use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::asset::Asset;
use crate::consts::PHOTO_EXTENSIONS;
use crate::error::{FlowError, Result};

/// Enumerates the photos of a gallery as opaque URL strings.
pub trait AssetSource: Send + Sync {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Ordered listing. The order defines each asset's index and depth.
    fn list(&self) -> Result<Vec<String>>;
}

/// Photos stored in a local folder.
///
/// URLs are file paths. The listing is sorted by path so repeated runs
/// stack photos in the same order.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
    recursive: bool,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectorySource {
    fn describe(&self) -> String {
        format!("folder {}", self.root.display())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(FlowError::SourceUnavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        let mut paths = Vec::new();
        collect_photos(&self.root, self.recursive, &mut paths)?;
        paths.sort();
        Ok(paths
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect())
    }
}

fn collect_photos(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                collect_photos(&path, recursive, out)?;
            }
        } else if is_photo(&path) {
            out.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-photo file");
        }
    }
    Ok(())
}

/// Whether `path` has one of the recognised photo extensions.
pub fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| PHOTO_EXTENSIONS.contains(&e.as_str()))
}

/// A fixed listing, e.g. read from a manifest file.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    urls: Vec<String>,
}

impl StaticSource {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    /// One URL per line. Blank lines and lines starting with `#` are ignored.
    pub fn parse_manifest(text: &str) -> Self {
        let urls = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { urls }
    }

    pub fn from_manifest(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse_manifest(&text))
    }
}

impl AssetSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} listed URLs", self.urls.len())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.urls.clone())
    }
}

/// List `source` into assets. A failing source yields an empty gallery.
pub fn load_assets(source: &dyn AssetSource) -> Vec<Asset> {
    match source.list() {
        Ok(urls) => {
            info!(count = urls.len(), source = %source.describe(), "Assets listed");
            Asset::from_urls(urls)
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "Asset listing failed, showing empty gallery");
            Vec::new()
        }
    }
}

/// Local path behind a URL. Accepts plain paths and `file://` URLs.
pub fn url_to_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}
