use std::path::PathBuf;
use std::sync::mpsc;

use flow_core::config::GalleryConfig;
use flow_core::io::photo::Thumbnail;
use flow_core::io::source::is_photo;
use flow_core::session::GallerySession;

use crate::convert::thumbnail_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::worker;

pub struct FlowApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: GalleryConfig,
    pub session: Option<GallerySession>,
    pub show_about: bool,
}

impl FlowApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            config: GalleryConfig::default(),
            session: None,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::GalleryReady {
                    generation,
                    root,
                    session,
                    elapsed,
                } => {
                    if !self.ui_state.is_current(generation) {
                        continue;
                    }
                    self.ui_state.add_log(format!(
                        "Laid out {} photos from {} in {}",
                        session.len(),
                        root.display(),
                        format_duration(elapsed)
                    ));
                    self.viewport.reset(session.len());
                    self.viewport.reset_camera(&self.config.camera);
                    self.session = Some(*session);
                }
                WorkerResult::Thumbnail {
                    generation,
                    index,
                    thumbnail,
                } => {
                    if self.ui_state.is_current(generation) {
                        self.set_thumbnail(ctx, index, &thumbnail);
                    }
                }
                WorkerResult::ThumbnailsDone {
                    generation,
                    loaded,
                    failed,
                    elapsed,
                } => {
                    if !self.ui_state.is_current(generation) {
                        continue;
                    }
                    self.ui_state.running_stage = None;
                    let mut msg = format!("{loaded} photos loaded in {}", format_duration(elapsed));
                    if failed > 0 {
                        msg.push_str(&format!(", {failed} unreadable"));
                    }
                    self.ui_state.add_log(msg);
                }
                WorkerResult::Progress {
                    generation,
                    stage,
                    items_done,
                    items_total,
                } => {
                    if self.ui_state.is_current(generation) && self.ui_state.is_busy() {
                        self.ui_state.running_stage = Some(stage);
                        self.ui_state.progress_items_done = items_done;
                        self.ui_state.progress_items_total = items_total;
                    }
                }
                WorkerResult::FolderPicked { path } => {
                    self.open_folder(path);
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.running_stage = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn set_thumbnail(&mut self, ctx: &egui::Context, index: usize, thumbnail: &Thumbnail) {
        if index >= self.viewport.textures.len() {
            return;
        }
        let image = thumbnail_to_color_image(thumbnail);
        let texture = ctx.load_texture(
            format!("photo-{index}"),
            image,
            egui::TextureOptions::LINEAR,
        );
        self.viewport.textures[index] = Some(texture);
        self.viewport.aspects[index] = Some(thumbnail.aspect);
    }

    /// Use `config` from now on. The current gallery is laid out again.
    pub fn apply_config(&mut self, config: GalleryConfig) {
        if let Some(session) = self.session.take() {
            self.session = Some(GallerySession::new(
                session.assets().to_vec(),
                session.samples().to_vec(),
                config.clone(),
            ));
        }
        self.viewport.reset_camera(&config.camera);
        self.config = config;
        self.ui_state.add_log("Config imported".into());
    }

    pub fn open_folder(&mut self, path: PathBuf) {
        let generation = self.ui_state.begin_load(path.clone());
        self.send_command(WorkerCommand::LoadFolder {
            path,
            config: self.config.clone(),
            generation,
        });
    }

    /// Open a folder dropped onto the window, or the folder of a dropped photo.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });
        let Some(path) = dropped else {
            return;
        };
        if path.is_dir() {
            self.open_folder(path);
        } else if is_photo(&path) {
            if let Some(parent) = path.parent() {
                self.open_folder(parent.to_path_buf());
            }
        } else {
            self.ui_state
                .add_log(format!("Not a folder or photo: {}", path.display()));
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for FlowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.handle_dropped_files(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.show_about {
            egui::Window::new("About Flow")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Flow");
                        ui.label("Geotagged 3D Photo Gallery");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.label("Drag to pan, scroll to move closer.");
                        ui.label("Click a photo to focus it, G switches layout.");
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}min")
    }
}
