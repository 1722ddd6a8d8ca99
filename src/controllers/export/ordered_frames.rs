use anyhow::Context;
use rayon::prelude::*;

use crate::controllers::ports::frame_sink::FrameSink;
use crate::core::actions::render::render::RenderError;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Renders `frame_count` frames in parallel batches of `batch_size` and
/// pushes them to `sink` in ascending index order.
///
/// The first failing frame aborts its batch; the error names the frame.
pub(crate) fn render_in_order<F>(
    frame_count: usize,
    batch_size: usize,
    sink: &mut dyn FrameSink,
    render: F,
) -> anyhow::Result<()>
where
    F: Fn(usize) -> Result<PixelBuffer, RenderError> + Sync,
{
    let batch_size = batch_size.max(1);

    for start in (0..frame_count).step_by(batch_size) {
        let end = (start + batch_size).min(frame_count);

        let frames = (start..end)
            .into_par_iter()
            .map(|index| render(index).with_context(|| format!("failed to render frame {}", index)))
            .collect::<anyhow::Result<Vec<PixelBuffer>>>()?;

        for (offset, frame) in frames.iter().enumerate() {
            let index = start + offset;
            sink.push_frame(index, frame)
                .with_context(|| format!("failed to write frame {}", index))?;
        }

        tracing::debug!(done = end, total = frame_count, "frame batch written");
    }

    Ok(())
}
