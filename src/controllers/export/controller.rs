use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use tracing::info;

use crate::controllers::export::naming::{pan_file_name, still_file_name, sweep_file_name, zoom_file_name};
use crate::controllers::export::options::ExportOptions;
use crate::controllers::export::ordered_frames::render_in_order;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::ports::frame_sink::AnimationEncoderPort;
use crate::core::actions::plan_animation::keyframe::AnimationKeyframe;
use crate::core::actions::plan_animation::pan::plan_pan;
use crate::core::actions::plan_animation::sweep::{IterationSweep, SweepMode};
use crate::core::actions::plan_animation::zoom::plan_zoom;
use crate::core::actions::render::render::{render_keyframe, render_still, render_sweep_frame, sample_sweep_field};
use crate::core::data::complex::Complex;
use crate::core::data::render_params::RenderParams;
use crate::core::data::resolution::Resolution;
use crate::core::palette::palette::Palette;

/// Still image presets offered by the explorer.
pub const STILL_RESOLUTIONS: [(u32, u32); 4] = [(1920, 1080), (2560, 1440), (3840, 2160), (7680, 4320)];

/// Animation presets offered by the explorer.
pub const ANIMATION_RESOLUTIONS: [(u32, u32); 4] = [(1280, 720), (1920, 1080), (2560, 1440), (3840, 2160)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StillRequest {
    pub output: Resolution,
    pub antialiasing: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationRequest {
    Zoom { output: Resolution, frames: usize },
    Sweep { output: Resolution, mode: SweepMode },
}

/// Renders and writes still images and animations.
pub struct ExportController<P: FilePresenterPort, E: AnimationEncoderPort> {
    presenter: P,
    encoder: E,
    options: ExportOptions,
}

impl<P: FilePresenterPort, E: AnimationEncoderPort> ExportController<P, E> {
    pub fn new(presenter: P, encoder: E, options: ExportOptions) -> Self {
        Self {
            presenter,
            encoder,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn export_still(&self, params: RenderParams, palette: &Palette, request: StillRequest) -> anyhow::Result<PathBuf> {
        let start = Instant::now();
        let image = render_still(params, palette, request.output, request.antialiasing)
            .context("failed to render still image")?;

        let name = still_file_name(
            params.fractal,
            params.center,
            params.width,
            request.output,
            self.options.file_digits,
            self.presenter.extension(),
        );
        let path = prepare_path(&self.options.images_dir, &name)?;

        self.presenter
            .present(&image, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!(
            path = %path.display(),
            output = %request.output,
            aa = request.antialiasing,
            duration = ?start.elapsed(),
            "still image written"
        );

        Ok(path)
    }

    /// Zooms from the default view onto the centre of `params`, ending at its
    /// width and iteration cap.
    pub fn export_zoom(
        &self,
        params: RenderParams,
        palette: &Palette,
        output: Resolution,
        frames: usize,
    ) -> anyhow::Result<PathBuf> {
        let keyframes = plan_zoom(params.center, params.width, params.max_iterations, frames)
            .context("failed to plan zoom")?;
        let name = zoom_file_name(
            params.center,
            params.width,
            output,
            self.options.file_digits,
            self.encoder.extension(),
        );

        self.write_keyframes(&keyframes, palette, output, self.options.zoom_fps, &name)
    }

    /// Walks the Julia constant from `from` to `to`.
    pub fn export_pan(
        &self,
        from: Complex,
        to: Complex,
        palette: &Palette,
        output: Resolution,
        frames: usize,
    ) -> anyhow::Result<PathBuf> {
        let keyframes = plan_pan(from, to, frames).context("failed to plan pan")?;
        let name = pan_file_name(from, to, output, self.options.file_digits, self.encoder.extension());

        self.write_keyframes(&keyframes, palette, output, self.options.pan_fps, &name)
    }

    /// Sweeps the iteration threshold over one field sampled from `params`.
    /// Returns the written path and the number of frames.
    pub fn export_sweep(
        &self,
        params: RenderParams,
        palette: &Palette,
        output: Resolution,
        mode: SweepMode,
    ) -> anyhow::Result<(PathBuf, usize)> {
        let start = Instant::now();
        let field = sample_sweep_field(params, output).context("failed to sample sweep field")?;
        let sweep = IterationSweep::new(field, mode).context("failed to plan iteration sweep")?;
        let frame_count = sweep.frame_count();

        info!(
            mode = %mode,
            min = sweep.min_iterations(),
            max = sweep.max_iterations(),
            frames = frame_count,
            "iteration sweep planned"
        );

        let name = sweep_file_name(
            params.center,
            params.max_iterations,
            output,
            self.options.file_digits,
            self.encoder.extension(),
        );
        let path = prepare_path(&self.options.anim_dir, &name)?;

        let mut sink = self.encoder.open(&path, output, self.options.sweep_fps)?;
        render_in_order(frame_count, self.options.frame_batch_size, sink.as_mut(), |index| {
            render_sweep_frame(&sweep, index, palette, output)
        })?;
        sink.finish()
            .with_context(|| format!("failed to finish {}", path.display()))?;

        info!(path = %path.display(), frames = frame_count, duration = ?start.elapsed(), "animation written");

        Ok((path, frame_count))
    }

    fn write_keyframes(
        &self,
        keyframes: &[AnimationKeyframe],
        palette: &Palette,
        output: Resolution,
        fps: u32,
        name: &str,
    ) -> anyhow::Result<PathBuf> {
        let start = Instant::now();
        let path = prepare_path(&self.options.anim_dir, name)?;

        let mut sink = self.encoder.open(&path, output, fps)?;
        render_in_order(keyframes.len(), self.options.frame_batch_size, sink.as_mut(), |index| {
            render_keyframe(&keyframes[index], palette, output)
        })?;
        sink.finish()
            .with_context(|| format!("failed to finish {}", path.display()))?;

        info!(
            path = %path.display(),
            frames = keyframes.len(),
            fps,
            duration = ?start.elapsed(),
            "animation written"
        );

        Ok(path)
    }
}

fn prepare_path(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    Ok(dir.join(name))
}
