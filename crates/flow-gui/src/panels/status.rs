use flow_core::io::LoadStage;
use flow_core::session::GallerySession;

use crate::app::FlowApp;

const LOG_LINES: usize = 4;
const LOAD_STEPS: usize = 4;
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 90, 80);

pub fn show(ctx: &egui::Context, app: &mut FlowApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);
        load_progress(ui, app);
        log_lines(ui, &app.ui_state.log_messages);
        ui.horizontal(|ui| {
            if let Some(ref session) = app.session {
                gallery_readout(ui, session, app.viewport.loaded_textures());
            }
            ui.label(format!("Camera: {}", app.viewport.camera.position));
        });
        ui.add_space(2.0);
    });
}

/// Bar for the running load, or the opened folder when idle. Keeps its
/// height either way so the panel does not jump.
fn load_progress(ui: &mut egui::Ui, app: &FlowApp) {
    let state = &app.ui_state;
    match state.running_stage {
        Some(stage) => {
            let (fraction, label) =
                progress_label(stage, state.progress_items_done, state.progress_items_total);
            ui.add(egui::ProgressBar::new(fraction).text(label).animate(true));
        }
        None => {
            let label = match state.folder {
                Some(ref folder) => folder.display().to_string(),
                None => "No folder open".to_string(),
            };
            ui.add(egui::ProgressBar::new(0.0).text(label));
        }
    }
}

fn stage_step(stage: LoadStage) -> usize {
    match stage {
        LoadStage::Listing => 1,
        LoadStage::ReadingMetadata => 2,
        LoadStage::Layout => 3,
        LoadStage::Thumbnails => 4,
    }
}

/// Fill fraction and text for the progress bar. Stages without a known
/// item count show an empty, animated bar.
fn progress_label(
    stage: LoadStage,
    done: Option<usize>,
    total: Option<usize>,
) -> (f32, String) {
    let step = stage_step(stage);
    match (done, total) {
        (Some(done), Some(total)) if total > 0 => (
            done.min(total) as f32 / total as f32,
            format!("[{step}/{LOAD_STEPS}] {stage}: {done} of {total}"),
        ),
        _ => (0.0, format!("[{step}/{LOAD_STEPS}] {stage}...")),
    }
}

fn log_lines(ui: &mut egui::Ui, messages: &[String]) {
    let line_height = ui.text_style_height(&egui::TextStyle::Body);
    let spacing = ui.spacing().item_spacing.y;
    let height = line_height * LOG_LINES as f32 + spacing * (LOG_LINES - 1) as f32;

    egui::ScrollArea::vertical()
        .max_height(height)
        .min_scrolled_height(height)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for _ in messages.len()..LOG_LINES {
                ui.label("");
            }
            for msg in messages {
                if msg.starts_with("ERROR:") {
                    ui.colored_label(ERROR_COLOR, msg);
                } else {
                    ui.label(msg);
                }
            }
        });
}

fn gallery_readout(ui: &mut egui::Ui, session: &GallerySession, textures: usize) {
    let coverage = session.geo_coverage();
    ui.label(format!(
        "{} photos ({} located)",
        session.len(),
        coverage.located
    ));
    ui.separator();
    ui.label(format!("Layout: {}", session.mode()));
    ui.separator();
    match session.selected() {
        Some(index) => {
            let name = session
                .assets()
                .get(index)
                .map(|a| file_name(&a.url))
                .unwrap_or_default();
            ui.label(format!("Selected: #{index} {name}"));
        }
        None => {
            ui.label("Selected: none");
        }
    }
    ui.separator();
    ui.label(format!("Textures: {textures}/{}", session.len()));
    ui.separator();
}

fn file_name(url: &str) -> String {
    url.rsplit(['/', '\\']).next().unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_label_counts_items() {
        let (fraction, label) = progress_label(LoadStage::ReadingMetadata, Some(3), Some(12));
        assert!((fraction - 0.25).abs() < 1e-6);
        assert_eq!(label, "[2/4] Reading locations: 3 of 12");
    }

    #[test]
    fn test_progress_label_without_total() {
        let (fraction, label) = progress_label(LoadStage::Layout, None, None);
        assert_eq!(fraction, 0.0);
        assert_eq!(label, "[3/4] Computing layout...");

        let (fraction, _) = progress_label(LoadStage::Listing, Some(0), Some(0));
        assert_eq!(fraction, 0.0);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/photos/trip/a.jpg"), "a.jpg");
        assert_eq!(file_name("file:///x/b.png"), "b.png");
        assert_eq!(file_name("plain.jpg"), "plain.jpg");
    }
}
