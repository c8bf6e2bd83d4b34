mod bounds;
mod engine;

pub use bounds::{normalize, Bounds, GeoBounds};
pub use engine::{compute_layout, depth_for, GeoCoverage, Layout, LayoutMode};
