use anyhow::{Context, Result};
use flow_core::config::GalleryConfig;

use crate::app::FlowApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut FlowApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Folder...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_folder(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let has_gallery = app.session.is_some();

                if ui.add_enabled(has_gallery, egui::Button::new("Toggle Layout").shortcut_text("G")).clicked() {
                    ui.close();
                    if let Some(ref mut session) = app.session {
                        let mode = session.toggle_mode();
                        app.ui_state.add_log(format!("Layout: {mode}"));
                    }
                }

                if ui.add_enabled(has_gallery, egui::Button::new("Clear Selection").shortcut_text("Esc")).clicked() {
                    ui.close();
                    if let Some(ref mut session) = app.session {
                        session.clear_selection();
                    }
                }

                if ui.button("Reset Camera").clicked() {
                    ui.close();
                    app.viewport.reset_camera(&app.config.camera);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_folder(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_folder(app: &mut FlowApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            let _ = result_tx.send(WorkerResult::FolderPicked { path });
        }
    });
}

fn read_config(path: &std::path::Path) -> Result<GalleryConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: GalleryConfig = toml::from_str(&content).context("Invalid gallery config")?;
    config.validate()?;
    Ok(config)
}

fn import_config(app: &mut FlowApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match read_config(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("{e:#}"),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &mut FlowApp) {
    let config = app.config.clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("flow_config.toml")
            .save_file()
        {
            let written = toml::to_string_pretty(&config)
                .context("Failed to serialize config")
                .and_then(|content| {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))
                });
            let result = match written {
                Ok(()) => WorkerResult::Log {
                    message: format!("Config saved to {}", path.display()),
                },
                Err(e) => WorkerResult::Error {
                    message: format!("{e:#}"),
                },
            };
            let _ = result_tx.send(result);
        }
    });
}
