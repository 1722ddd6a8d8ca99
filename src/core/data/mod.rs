pub mod bookmark;
pub mod colour;
pub mod complex;
pub mod complex_rect;
pub mod iteration_field;
pub mod pixel_buffer;
pub mod render_params;
pub mod resolution;
pub mod viewport;
