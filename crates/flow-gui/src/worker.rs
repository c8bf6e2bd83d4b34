use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use flow_core::config::GalleryConfig;
use flow_core::io::photo::load_thumbnail;
use flow_core::io::source::url_to_path;
use flow_core::io::{DirectorySource, ExifGpsExtractor, LoadReporter, LoadStage};
use flow_core::loader::load_gallery;
use rayon::prelude::*;
use tracing::debug;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::progress::ChannelProgressReporter;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("flow-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadFolder {
                path,
                config,
                generation,
            } => {
                handle_load_folder(&path, config, generation, &tx, &ctx);
            }
        }
    }
}

fn handle_load_folder(
    path: &Path,
    config: GalleryConfig,
    generation: u64,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    if !path.is_dir() {
        send_error(tx, ctx, format!("Not a folder: {}", path.display()));
        return;
    }
    send_log(tx, ctx, format!("Opening {}", path.display()));

    let start = Instant::now();
    let reporter = ChannelProgressReporter::new(tx.clone(), ctx.clone(), generation);
    let source = DirectorySource::new(path, config.loading.recursive);
    let loaded = load_gallery(
        &source,
        Arc::new(ExifGpsExtractor),
        &config.loading,
        &reporter,
    );

    if loaded.assets.is_empty() {
        send_log(tx, ctx, "No photos found");
    }

    reporter.begin_stage(LoadStage::Layout, None);
    let thumbnail_size = config.loading.thumbnail_size;
    let session = loaded.into_session(config);
    reporter.finish_stage();

    let coverage = session.geo_coverage();
    send_log(
        tx,
        ctx,
        format!(
            "{} photos, {} located, {} placed at random",
            coverage.total,
            coverage.located,
            coverage.total - coverage.located
        ),
    );

    let urls: Vec<String> = session.assets().iter().map(|a| a.url.clone()).collect();
    send(
        tx,
        ctx,
        WorkerResult::GalleryReady {
            generation,
            root: path.to_path_buf(),
            session: Box::new(session),
            elapsed: start.elapsed(),
        },
    );

    load_thumbnails(&urls, thumbnail_size, generation, &reporter, tx, ctx);
}

/// Decode every photo in parallel, sending each texture as soon as it is ready.
fn load_thumbnails(
    urls: &[String],
    max_edge: u32,
    generation: u64,
    reporter: &ChannelProgressReporter,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    reporter.begin_stage(LoadStage::Thumbnails, Some(urls.len()));

    let done = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    urls.par_iter().enumerate().for_each(|(index, url)| {
        match load_thumbnail(&url_to_path(url), max_edge) {
            Ok(thumbnail) => {
                let _ = tx.send(WorkerResult::Thumbnail {
                    generation,
                    index,
                    thumbnail,
                });
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Thumbnail decode failed");
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }
        reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
    });
    reporter.finish_stage();

    send(
        tx,
        ctx,
        WorkerResult::ThumbnailsDone {
            generation,
            loaded: urls.len() - failed.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            elapsed: start.elapsed(),
        },
    );
}
