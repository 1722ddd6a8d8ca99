pub mod controller;
pub mod naming;
pub mod options;
mod ordered_frames;

pub use controller::{ANIMATION_RESOLUTIONS, AnimationRequest, ExportController, STILL_RESOLUTIONS, StillRequest};
pub use options::ExportOptions;
