use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::ports::frame_sink::{AnimationEncoderPort, FrameSink};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::resolution::Resolution;
use crate::presenters::file::png::PngFilePresenter;

/// Writes each frame as a numbered PNG inside a directory named after the
/// animation. Useful where ffmpeg is not installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngSequenceEncoder;

impl AnimationEncoderPort for PngSequenceEncoder {
    fn open(&self, filepath: &Path, _resolution: Resolution, _fps: u32) -> anyhow::Result<Box<dyn FrameSink>> {
        std::fs::create_dir_all(filepath)
            .with_context(|| format!("failed to create {}", filepath.display()))?;

        Ok(Box::new(PngSequenceSink {
            dir: filepath.to_path_buf(),
            presenter: PngFilePresenter,
        }))
    }

    fn extension(&self) -> &'static str {
        "frames"
    }
}

struct PngSequenceSink {
    dir: PathBuf,
    presenter: PngFilePresenter,
}

impl FrameSink for PngSequenceSink {
    fn push_frame(&mut self, index: usize, frame: &PixelBuffer) -> anyhow::Result<()> {
        let path = self.dir.join(format!("{:05}.png", index));
        self.presenter.present(frame, &path)
    }

    fn finish(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}
