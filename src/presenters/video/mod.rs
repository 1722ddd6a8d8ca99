pub mod ffmpeg;
pub mod png_sequence;

pub use ffmpeg::{FfmpegEncoder, FfmpegError};
pub use png_sequence::PngSequenceEncoder;
