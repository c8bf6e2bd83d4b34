use anyhow::{Context, Result};
use clap::Args;
use flow_core::geometry::Position;
use flow_core::picking::PointerEvent;

use super::{parse_pair, parse_triple, GalleryArgs};
use crate::summary::{focus_table, print_focus_summary};

#[derive(Args)]
pub struct FocusArgs {
    #[command(flatten)]
    pub gallery: GalleryArgs,

    /// Index of the photo to focus
    #[arg(long)]
    pub select: usize,

    /// Number of 60 Hz frames to simulate
    #[arg(long, default_value = "60")]
    pub frames: usize,

    /// Camera position as x,y,z (defaults to the config camera)
    #[arg(long, allow_hyphen_values = true)]
    pub camera: Option<String>,

    /// Camera movement per frame as dx,dy
    #[arg(long, allow_hyphen_values = true)]
    pub pan: Option<String>,

    /// Also print the focused photo every N frames (0 = only the final table)
    #[arg(long, default_value = "0")]
    pub every: usize,
}

pub fn run(args: &FocusArgs) -> Result<()> {
    let config = args.gallery.resolve_config()?;
    let mut camera = match args.camera {
        Some(ref text) => Position::from_array(parse_triple(text)?),
        None => Position::from_array(config.camera.position),
    };
    let (pan_x, pan_y) = match args.pan {
        Some(ref text) => parse_pair(text)?,
        None => (0.0, 0.0),
    };

    let (loaded, _) = args.gallery.load(&config)?;
    let mut session = loaded.into_session(config);
    session
        .handle_pointer(PointerEvent::Click(args.select))
        .context("Cannot focus photo")?;

    print_focus_summary(&session, args.select, camera, args.frames);

    for frame in 1..=args.frames {
        camera.x += pan_x;
        camera.y += pan_y;
        let rendered = session.tick_frame(camera);
        if args.every > 0 && frame % args.every == 0 {
            println!("  frame {:>5}  {}", frame, rendered[args.select]);
        }
    }
    if args.every > 0 {
        println!();
    }

    let targets = session.targets(camera);
    print!(
        "{}",
        focus_table(session.rendered_positions(), &targets, args.select)
    );

    Ok(())
}
