pub mod antialias;
pub mod cancellation;
pub mod compose;
pub mod normalise;
pub mod plan_animation;
pub mod render;
pub mod resize;
pub mod sample_field;
