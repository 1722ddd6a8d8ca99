pub mod errors;
pub mod keyframe;
pub mod pan;
pub mod sweep;
pub mod zoom;
