use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use flow_core::io::photo::photo_dimensions;
use flow_core::io::{ExifGpsExtractor, MetadataExtractor};
use flow_core::picking::plane_half_extents;

#[derive(Args)]
pub struct InfoArgs {
    /// Photo file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let url = args.file.to_string_lossy();
    let sample = ExifGpsExtractor
        .extract(&url)
        .with_context(|| format!("Failed to read metadata of {}", args.file.display()))?;

    println!("File:        {}", args.file.display());

    let aspect = match photo_dimensions(&args.file) {
        Ok((w, h)) if w > 0 && h > 0 => {
            println!("Dimensions:  {}x{}", w, h);
            let aspect = w as f64 / h as f64;
            println!("Aspect:      {:.3}", aspect);
            Some(aspect)
        }
        Ok(_) | Err(_) => {
            println!("Dimensions:  unreadable");
            None
        }
    };
    let (half_w, half_h) = plane_half_extents(aspect);
    println!("Plane:       {:.2} x {:.2} (with border)", half_w * 2.0, half_h * 2.0);

    match sample.latitude {
        Some(lat) => println!("Latitude:    {:.6}", lat),
        None => println!("Latitude:    absent"),
    }
    match sample.longitude {
        Some(lon) => println!("Longitude:   {:.6}", lon),
        None => println!("Longitude:   absent"),
    }
    if !sample.has_location() {
        println!("Placement:   random on absent axes");
    }

    Ok(())
}
