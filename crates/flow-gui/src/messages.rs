use std::path::PathBuf;
use std::time::Duration;

use flow_core::config::GalleryConfig;
use flow_core::io::photo::Thumbnail;
use flow_core::io::LoadStage;
use flow_core::session::GallerySession;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// List a folder, read every photo's location, lay it out and decode
    /// thumbnails. `generation` tags every result of this load.
    LoadFolder {
        path: PathBuf,
        config: GalleryConfig,
        generation: u64,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// Layout ready. Thumbnails follow one by one.
    GalleryReady {
        generation: u64,
        root: PathBuf,
        session: Box<GallerySession>,
        elapsed: Duration,
    },

    Thumbnail {
        generation: u64,
        index: usize,
        thumbnail: Thumbnail,
    },

    ThumbnailsDone {
        generation: u64,
        loaded: usize,
        failed: usize,
        elapsed: Duration,
    },

    /// Progress update during any stage.
    Progress {
        generation: u64,
        stage: LoadStage,
        items_done: Option<usize>,
        items_total: Option<usize>,
    },

    /// A folder was chosen in the open dialog.
    FolderPicked {
        path: PathBuf,
    },
    ConfigImported {
        config: GalleryConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
