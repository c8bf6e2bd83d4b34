use anyhow::Result;
use flow_core::io::{LoadReporter, LoadStage};
use indicatif::{ProgressBar, ProgressStyle};

/// Terminal progress bar fed by gallery loading updates.
pub struct BarReporter {
    pb: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Result<Self> {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self { pb })
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl LoadReporter for BarReporter {
    fn begin_stage(&self, stage: LoadStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        self.pb.set_length(total_items.unwrap_or(0) as u64);
        self.pb.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }
}
