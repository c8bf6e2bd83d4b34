/// Loading stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStage {
    Listing,
    ReadingMetadata,
    Layout,
    Thumbnails,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listing => write!(f, "Listing photos"),
            Self::ReadingMetadata => write!(f, "Reading locations"),
            Self::Layout => write!(f, "Computing layout"),
            Self::Thumbnails => write!(f, "Loading photos"),
        }
    }
}

/// Thread-safe progress reporting for gallery loading.
///
/// All methods have default no-op implementations.
pub trait LoadReporter: Send + Sync {
    /// A new stage has started with `total_items` work items, if known.
    fn begin_stage(&self, _stage: LoadStage, _total_items: Option<usize>) {}

    /// `items_done` work items of the current stage have settled.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores every update.
pub struct NoOpReporter;
impl LoadReporter for NoOpReporter {}
