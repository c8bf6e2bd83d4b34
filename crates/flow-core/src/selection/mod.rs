mod animator;
mod focus;
mod state;

pub use animator::{step_fraction, Animator};
pub use focus::{focus_point, target_position, targets};
pub use state::Selection;
