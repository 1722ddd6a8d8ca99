use std::path::PathBuf;

/// Where and how exports are written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub images_dir: PathBuf,
    pub anim_dir: PathBuf,
    pub file_digits: u32,
    pub zoom_fps: u32,
    pub sweep_fps: u32,
    pub pan_fps: u32,
    /// Frames rendered in parallel before they are handed to the sink.
    pub frame_batch_size: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("images"),
            anim_dir: PathBuf::from("anim"),
            file_digits: 3,
            zoom_fps: 60,
            sweep_fps: 30,
            pan_fps: 60,
            frame_batch_size: rayon::current_num_threads(),
        }
    }
}
