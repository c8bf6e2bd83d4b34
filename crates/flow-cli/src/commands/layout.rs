use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flow_core::geometry::Position;
use flow_core::layout::{GeoCoverage, LayoutMode};
use flow_core::session::GallerySession;
use serde::Serialize;

use super::GalleryArgs;
use crate::summary::{position_table, print_gallery_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub gallery: GalleryArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write positions to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    source: &'a str,
    mode: LayoutMode,
    range: f64,
    depth_step: f64,
    seed: Option<u64>,
    coverage: GeoCoverage,
    photos: Vec<PhotoEntry<'a>>,
}

#[derive(Serialize)]
struct PhotoEntry<'a> {
    index: usize,
    url: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    geo: Position,
    random: Position,
}

fn build_report<'a>(session: &'a GallerySession, source: &'a str) -> LayoutReport<'a> {
    let config = session.config();
    let layout = session.layout();
    let photos = session
        .assets()
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let sample = session.samples().get(i).copied().unwrap_or_default();
            PhotoEntry {
                index: asset.index,
                url: &asset.url,
                latitude: sample.latitude,
                longitude: sample.longitude,
                geo: layout.geo[i],
                random: layout.random[i],
            }
        })
        .collect();

    LayoutReport {
        source,
        mode: session.mode(),
        range: config.layout.range,
        depth_step: config.layout.depth_step,
        seed: config.layout.seed,
        coverage: session.geo_coverage(),
        photos,
    }
}

pub fn run(args: &LayoutArgs) -> Result<()> {
    let config = args.gallery.resolve_config()?;
    let (loaded, source) = args.gallery.load(&config)?;
    let session = loaded.into_session(config);

    let body = match args.format {
        OutputFormat::Table => position_table(&session),
        OutputFormat::Json => {
            let report = build_report(&session, &source);
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    // keep stdout clean for JSON consumers
    let styled = args.output.is_some() || matches!(args.format, OutputFormat::Table);
    if styled {
        print_gallery_summary(&session, &source);
    }

    if let Some(ref path) = args.output {
        std::fs::write(path, &body)
            .with_context(|| format!("Failed to write layout to {}", path.display()))?;
        println!("Layout saved to {}", path.display());
    } else {
        print!("{}", body);
    }

    Ok(())
}
