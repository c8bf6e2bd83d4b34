pub mod config;
pub mod focus;
pub mod info;
pub mod layout;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use flow_core::config::GalleryConfig;
use flow_core::io::{AssetSource, DirectorySource, ExifGpsExtractor, StaticSource};
use flow_core::layout::LayoutMode;
use flow_core::loader::{load_gallery, LoadedGallery};
use tracing::debug;

use crate::progress::BarReporter;

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Geo,
    Random,
}

impl From<ModeArg> for LayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Geo => LayoutMode::Geo,
            ModeArg::Random => LayoutMode::Random,
        }
    }
}

/// Where the photos come from and how to lay them out.
#[derive(Args)]
pub struct GalleryArgs {
    /// Folder of photos
    #[arg(required_unless_present = "manifest")]
    pub dir: Option<PathBuf>,

    /// Text file listing one photo path or URL per line, used instead of a folder
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Gallery config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Include photos in sub-folders
    #[arg(short, long)]
    pub recursive: bool,

    /// Layout to start in
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Seed for random placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// World-space span of the layout
    #[arg(long)]
    pub range: Option<f64>,

    /// Z distance between consecutive photos
    #[arg(long)]
    pub depth_step: Option<f64>,
}

impl GalleryArgs {
    /// Config file (or defaults) with command-line overrides applied.
    ///
    /// Always returns a seeded config so the printed layout can be reproduced.
    pub fn resolve_config(&self) -> Result<GalleryConfig> {
        let mut config = match self.config {
            Some(ref path) => read_config(path)?,
            None => GalleryConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.layout.mode = mode.into();
        }
        if let Some(seed) = self.seed {
            config.layout.seed = Some(seed);
        }
        if let Some(range) = self.range {
            config.layout.range = range;
        }
        if let Some(depth_step) = self.depth_step {
            config.layout.depth_step = depth_step;
        }
        if self.recursive {
            config.loading.recursive = true;
        }
        if config.layout.seed.is_none() {
            config.layout.seed = Some(rand::random());
        }
        config.validate().context("Invalid gallery config")?;
        debug!(
            seed = ?config.layout.seed,
            mode = %config.layout.mode,
            range = config.layout.range,
            "Gallery config resolved"
        );
        Ok(config)
    }

    pub fn source(&self, config: &GalleryConfig) -> Result<Box<dyn AssetSource>> {
        if let Some(ref path) = self.manifest {
            let source = StaticSource::from_manifest(path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))?;
            return Ok(Box::new(source));
        }
        match self.dir {
            Some(ref dir) if dir.is_dir() => {
                Ok(Box::new(DirectorySource::new(dir, config.loading.recursive)))
            }
            Some(ref dir) => bail!("{} is not a folder", dir.display()),
            None => bail!("Give a photo folder or --manifest"),
        }
    }

    /// List the photos and read their locations behind a progress bar.
    pub fn load(&self, config: &GalleryConfig) -> Result<(LoadedGallery, String)> {
        let source = self.source(config)?;
        let reporter = BarReporter::new()?;
        let loaded = load_gallery(
            source.as_ref(),
            Arc::new(ExifGpsExtractor),
            &config.loading,
            &reporter,
        );
        reporter.finish();
        Ok((loaded, source.describe()))
    }
}

pub fn read_config(path: &Path) -> Result<GalleryConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents).context("Invalid gallery config")
}

/// Parse `"x,y,z"` into three numbers.
pub fn parse_triple(text: &str) -> Result<[f64; 3]> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Expected x,y,z but got {text:?}"))?;
    match parts.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        _ => bail!("Expected three comma-separated numbers, got {}", parts.len()),
    }
}

/// Parse `"dx,dy"` into two numbers.
pub fn parse_pair(text: &str) -> Result<(f64, f64)> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Expected dx,dy but got {text:?}"))?;
    match parts.as_slice() {
        &[dx, dy] => Ok((dx, dy)),
        _ => bail!("Expected two comma-separated numbers, got {}", parts.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triples_and_pairs() {
        assert_eq!(parse_triple("1, -2.5,3").unwrap(), [1.0, -2.5, 3.0]);
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("a,b,c").is_err());
        assert_eq!(parse_pair("0.5,0").unwrap(), (0.5, 0.0));
        assert!(parse_pair("1,2,3").is_err());
    }
}
