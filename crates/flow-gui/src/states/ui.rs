use std::path::PathBuf;

use flow_core::io::LoadStage;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub folder: Option<PathBuf>,

    /// Which loading stage is running (None = idle).
    pub running_stage: Option<LoadStage>,

    /// Tag of the most recent load. Results of older loads are dropped.
    pub generation: u64,

    /// Log messages.
    pub log_messages: Vec<String>,

    /// Progress.
    pub progress_items_done: Option<usize>,
    pub progress_items_total: Option<usize>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.running_stage.is_some()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Start tracking a new load and return its tag.
    pub fn begin_load(&mut self, folder: PathBuf) -> u64 {
        self.generation += 1;
        self.folder = Some(folder);
        self.running_stage = Some(LoadStage::Listing);
        self.progress_items_done = None;
        self.progress_items_total = None;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
