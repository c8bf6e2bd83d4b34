use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Asset index {index} out of range (total: {total})")]
    AssetIndexOutOfRange { index: usize, total: usize },

    #[error("Asset source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Empty gallery")]
    EmptyGallery,
}

pub type Result<T> = std::result::Result<T, FlowError>;
