use std::fmt::Write as _;

use console::Style;
use flow_core::config::GalleryConfig;
use flow_core::geometry::Position;
use flow_core::layout::LayoutMode;
use flow_core::session::GallerySession;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    mode: Style,
    warn: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            mode: Style::new().green(),
            warn: Style::new().dim().yellow(),
        }
    }
}

pub fn print_gallery_summary(session: &GallerySession, source: &str) {
    let s = Styles::new();
    let config = session.config();

    println!();
    println!("  {}", s.title.apply_to("Flow Gallery"));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}")
    );
    println!();
    println!("  {:<14}{}", s.label.apply_to("Source"), s.value.apply_to(source));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Photos"),
        s.value.apply_to(session.len())
    );
    println!();

    print_layout_section(&s, config, session.mode());

    let coverage = session.geo_coverage();
    println!("  {}", s.header.apply_to("Locations"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Located"),
        s.value.apply_to(coverage.located)
    );
    if coverage.partial > 0 {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Partial"),
            s.warn.apply_to(coverage.partial)
        );
    }
    if coverage.missing > 0 {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Missing"),
            s.warn.apply_to(format!("{} (placed at random)", coverage.missing))
        );
    }
    println!();
}

fn print_layout_section(s: &Styles, config: &GalleryConfig, mode: LayoutMode) {
    println!("  {}", s.header.apply_to("Layout"));
    println!("    {:<14}{}", s.label.apply_to("Mode"), s.mode.apply_to(mode));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Range"),
        s.value.apply_to(config.layout.range)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Depth step"),
        s.value.apply_to(config.layout.depth_step)
    );
    if let Some(seed) = config.layout.seed {
        println!("    {:<14}{}", s.label.apply_to("Seed"), s.value.apply_to(seed));
    }
    println!();
}

pub fn print_focus_summary(session: &GallerySession, selected: usize, camera: Position, frames: usize) {
    let s = Styles::new();
    let focus = &session.config().focus;

    println!();
    println!("  {}", s.title.apply_to("Focus"));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}")
    );
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Selected"),
        s.value.apply_to(selected)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Camera"),
        s.value.apply_to(camera)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(frames)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Distance"),
        s.value.apply_to(focus.focus_distance)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Fan-out"),
        s.value.apply_to(format!("{}x", focus.fanout_scale))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Damping"),
        s.value.apply_to(format!("{:.0}% per frame", focus.damping * 100.0))
    );
    println!();
}

/// Plain-text table of every photo's location and both layout positions.
pub fn position_table(session: &GallerySession) -> String {
    let mut out = String::new();
    let layout = session.layout();
    let _ = writeln!(
        out,
        "{:>5}  {:>11}  {:>11}  {:>28}  {:>28}  File",
        "#", "Latitude", "Longitude", "Geo", "Random"
    );
    for (i, asset) in session.assets().iter().enumerate() {
        let sample = session.samples().get(i).copied().unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>5}  {:>11}  {:>11}  {:>28}  {:>28}  {}",
            i,
            fmt_coord(sample.latitude),
            fmt_coord(sample.longitude),
            layout.geo[i].to_string(),
            layout.random[i].to_string(),
            asset.url
        );
    }
    out
}

/// Rendered vs target position of every photo after a focus run.
pub fn focus_table(rendered: &[Position], targets: &[Position], selected: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:>28}  {:>28}  {:>9}", "#", "Rendered", "Target", "Error");
    for (i, (r, t)) in rendered.iter().zip(targets).enumerate() {
        let marker = if i == selected { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:>4}{}  {:>28}  {:>28}  {:>9.4}",
            i,
            marker,
            r.to_string(),
            t.to_string(),
            r.distance(*t)
        );
    }
    out
}

fn fmt_coord(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_table_marks_selection() {
        let rendered = [Position::ZERO, Position::new(1.0, 0.0, 0.0)];
        let targets = [Position::ZERO, Position::new(2.0, 0.0, 0.0)];
        let table = focus_table(&rendered, &targets, 1);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].trim_start().starts_with("1*"));
        assert!(lines[2].ends_with("1.0000"));
    }
}
