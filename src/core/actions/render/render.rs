use crate::core::actions::antialias::antialias::{AntialiasError, antialias};
use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::compose::compose::{ComposeCancelableError, ComposeError, compose, compose_cancelable};
use crate::core::actions::normalise::normalise::{normalise_preview, palette_bounds};
use crate::core::actions::plan_animation::keyframe::AnimationKeyframe;
use crate::core::actions::plan_animation::sweep::IterationSweep;
use crate::core::actions::resize::resize::{ResizeError, resize_pixel_buffer};
use crate::core::actions::sample_field::sample_field::{sample_field, sample_field_cancelable};
use crate::core::data::iteration_field::IterationField;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_params::RenderParams;
use crate::core::data::resolution::{Resolution, ResolutionError};
use crate::core::data::viewport::ViewportError;
use crate::core::fractals::errors::{IterationCapError, MAX_ITERATION_CAP};
use crate::core::palette::palette::Palette;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Viewport(ViewportError),
    Resolution(ResolutionError),
    IterationCap(IterationCapError),
    Antialias(AntialiasError),
    Compose(ComposeError),
    Resize(ResizeError),
    Cancelled(Cancelled),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewport(err) => write!(f, "invalid viewport: {}", err),
            Self::Resolution(err) => write!(f, "invalid resolution: {}", err),
            Self::IterationCap(err) => write!(f, "invalid iteration cap: {}", err),
            Self::Antialias(err) => write!(f, "antialiasing failed: {}", err),
            Self::Compose(err) => write!(f, "compositing failed: {}", err),
            Self::Resize(err) => write!(f, "resampling failed: {}", err),
            Self::Cancelled(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Viewport(err) => Some(err),
            Self::Resolution(err) => Some(err),
            Self::IterationCap(err) => Some(err),
            Self::Antialias(err) => Some(err),
            Self::Compose(err) => Some(err),
            Self::Resize(err) => Some(err),
            Self::Cancelled(err) => Some(err),
        }
    }
}

impl From<ViewportError> for RenderError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

impl From<ResolutionError> for RenderError {
    fn from(err: ResolutionError) -> Self {
        Self::Resolution(err)
    }
}

impl From<IterationCapError> for RenderError {
    fn from(err: IterationCapError) -> Self {
        Self::IterationCap(err)
    }
}

impl From<AntialiasError> for RenderError {
    fn from(err: AntialiasError) -> Self {
        Self::Antialias(err)
    }
}

impl From<ComposeError> for RenderError {
    fn from(err: ComposeError) -> Self {
        Self::Compose(err)
    }
}

impl From<ResizeError> for RenderError {
    fn from(err: ResizeError) -> Self {
        Self::Resize(err)
    }
}

impl From<Cancelled> for RenderError {
    fn from(err: Cancelled) -> Self {
        Self::Cancelled(err)
    }
}

impl From<ComposeCancelableError> for RenderError {
    fn from(err: ComposeCancelableError) -> Self {
        match err {
            ComposeCancelableError::Cancelled(cancelled) => Self::Cancelled(cancelled),
            ComposeCancelableError::Compose(err) => Self::Compose(err),
        }
    }
}

/// Renders one terminal frame of `cells` character cells.
///
/// For cancel-aware rendering, use [`render_preview_cancelable`].
pub fn render_preview(params: RenderParams, palette: &Palette, cells: Resolution) -> Result<PixelBuffer, RenderError> {
    render_preview_cancelable(params, palette, cells, &NeverCancel)
}

/// Samples at twice the cell resolution, antialiases back down, normalises
/// for display and composes. Returns [`RenderError::Cancelled`] as soon as
/// `cancel` trips during sampling or compositing.
pub fn render_preview_cancelable<C: CancelToken>(
    params: RenderParams,
    palette: &Palette,
    cells: Resolution,
    cancel: &C,
) -> Result<PixelBuffer, RenderError> {
    let region = params.viewport()?.cell_region(cells)?;
    let algorithm = params.fractal.algorithm(params.max_iterations)?;

    let sample_resolution = cells.scaled(2)?.within_sample_limit()?;
    let supersampled = sample_field_cancelable(region, sample_resolution, &algorithm, cancel)?;
    let mut field = antialias(&supersampled, cells)?;

    if cancel.is_cancelled() {
        return Err(Cancelled.into());
    }

    normalise_preview(&mut field, palette.mode());
    let table = palette.build(usize::from(field.max()) + 1, 0, None);

    Ok(compose_cancelable(&field, &table, cancel)?)
}

/// Renders a still image at `output`, supersampled by `aa` in each axis.
///
/// The kernel runs at twice the session cap (clamped to the largest storable
/// cap) and cells are wrapped by that cap, so points that never escape are
/// painted as background. The composed image is resampled to `output`.
pub fn render_still(
    params: RenderParams,
    palette: &Palette,
    output: Resolution,
    aa: u32,
) -> Result<PixelBuffer, RenderError> {
    let sample_resolution = output.scaled(aa)?.within_sample_limit()?;
    let max_iterations = params.max_iterations.saturating_mul(2).min(MAX_ITERATION_CAP);
    let region = params.viewport()?.image_region(sample_resolution)?;
    let algorithm = params.fractal.algorithm(max_iterations)?;

    let mut field = sample_field(region, sample_resolution, &algorithm);
    field.wrap(max_iterations);

    let image = compose_field(&field, palette)?;

    Ok(resize_pixel_buffer(image, output)?)
}

/// Renders one animation frame directly at `output`, without supersampling.
pub fn render_keyframe(
    keyframe: &AnimationKeyframe,
    palette: &Palette,
    output: Resolution,
) -> Result<PixelBuffer, RenderError> {
    let params = keyframe.params();
    let output = output.within_sample_limit()?;
    let region = params.viewport()?.image_region(output)?;
    let algorithm = params.fractal.algorithm(params.max_iterations)?;

    let mut field = sample_field(region, output, &algorithm);
    field.wrap(params.max_iterations);

    compose_field(&field, palette)
}

/// Samples the single field an iteration sweep recolours: twice the output
/// resolution at the session cap, wrapped by that cap.
pub fn sample_sweep_field(params: RenderParams, output: Resolution) -> Result<IterationField, RenderError> {
    let sample_resolution = output.scaled(2)?.within_sample_limit()?;
    let region = params.viewport()?.image_region(sample_resolution)?;
    let algorithm = params.fractal.algorithm(params.max_iterations)?;

    let mut field = sample_field(region, sample_resolution, &algorithm);
    field.wrap(params.max_iterations);

    Ok(field)
}

/// Recolours frame `index` of `sweep` and resamples it to `output`.
pub fn render_sweep_frame(
    sweep: &IterationSweep,
    index: usize,
    palette: &Palette,
    output: Resolution,
) -> Result<PixelBuffer, RenderError> {
    let image = sweep.recolour(index, palette)?;

    Ok(resize_pixel_buffer(image, output)?)
}

fn compose_field(field: &IterationField, palette: &Palette) -> Result<PixelBuffer, RenderError> {
    let bounds = palette_bounds(field);
    let table = palette.build(bounds.table_size, bounds.min_index, None);

    Ok(compose(field, &table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::fractals::fractal_kinds::FractalKind;
    use crate::core::palette::colour_mode::ColourMode;
    use crate::core::palette::noise_offsets::NoiseOffsets;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn params(max_iterations: u32) -> RenderParams {
        RenderParams {
            fractal: FractalKind::Mandelbrot,
            center: Complex::new(-0.5, 0.0),
            width: 4.5,
            max_iterations,
        }
    }

    fn grayscale() -> Palette {
        Palette::new(ColourMode::Grayscale, NoiseOffsets::new(0.1, 0.2, 0.3))
    }

    fn resolution(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height).unwrap()
    }

    #[test]
    fn test_preview_has_cell_resolution() {
        let image = render_preview(params(100), &grayscale(), resolution(80, 40)).unwrap();

        assert_eq!(image.resolution(), resolution(80, 40));
        assert_eq!(image.buffer_size(), 80 * 40 * 3);
    }

    #[test]
    fn test_preview_paints_the_set_interior_as_background() {
        let image = render_preview(params(100), &grayscale(), resolution(80, 40)).unwrap();

        // the centre of the main cardioid hits the cap and wraps to 0
        assert_eq!(image.pixel(40, 20), Some(Colour::BLACK));
    }

    #[test]
    fn test_preview_renders_julia_mode() {
        let params = RenderParams {
            fractal: FractalKind::Julia {
                constant: Complex::new(-0.8, 0.156),
            },
            center: Complex::ZERO,
            width: 4.0,
            max_iterations: 100,
        };

        let image = render_preview(params, &grayscale(), resolution(40, 20)).unwrap();
        assert_eq!(image.resolution(), resolution(40, 20));
    }

    #[test]
    fn test_preview_rejects_non_positive_width() {
        let mut params = params(100);
        params.width = -1.0;

        let result = render_preview(params, &grayscale(), resolution(10, 10));
        assert!(matches!(result, Err(RenderError::Viewport(_))));
    }

    #[test]
    fn test_preview_rejects_zero_cap() {
        let result = render_preview(params(0), &grayscale(), resolution(10, 10));
        assert!(matches!(result, Err(RenderError::IterationCap(_))));
    }

    #[test]
    fn test_preview_reports_cancellation() {
        let cancelled = AtomicBool::new(true);
        let token = || cancelled.load(Ordering::Relaxed);

        let result = render_preview_cancelable(params(100), &grayscale(), resolution(20, 10), &token);
        assert_eq!(result, Err(RenderError::Cancelled(Cancelled)));
    }

    #[test]
    fn test_still_is_resampled_to_output() {
        let image = render_still(params(50), &grayscale(), resolution(32, 18), 2).unwrap();

        assert_eq!(image.resolution(), resolution(32, 18));
    }

    #[test]
    fn test_still_rejects_zero_antialiasing() {
        let result = render_still(params(50), &grayscale(), resolution(32, 18), 0);
        assert!(matches!(result, Err(RenderError::Resolution(_))));
    }

    #[test]
    fn test_still_rejects_oversized_antialiasing() {
        let result = render_still(params(50), &grayscale(), resolution(1, 1), u32::MAX);
        assert!(matches!(
            result,
            Err(RenderError::Resolution(ResolutionError::TooLarge { .. }))
        ));

        let result = render_still(params(50), &grayscale(), resolution(7680, 4320), 20);
        assert!(matches!(
            result,
            Err(RenderError::Resolution(ResolutionError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_oversized_animation_frames_are_rejected() {
        let huge = resolution(100_000, 100_000);

        let keyframe = AnimationKeyframe::new(0, params(20));
        assert!(matches!(
            render_keyframe(&keyframe, &grayscale(), huge),
            Err(RenderError::Resolution(ResolutionError::TooLarge { .. }))
        ));
        assert!(matches!(
            sample_sweep_field(params(20), huge),
            Err(RenderError::Resolution(ResolutionError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_still_doubles_large_caps_without_failing() {
        let image = render_still(params(MAX_ITERATION_CAP), &grayscale(), resolution(4, 4), 1).unwrap();

        assert_eq!(image.resolution(), resolution(4, 4));
    }

    #[test]
    fn test_keyframe_renders_at_output_resolution() {
        let keyframe = AnimationKeyframe::new(3, params(200));
        let image = render_keyframe(&keyframe, &grayscale(), resolution(16, 9)).unwrap();

        assert_eq!(image.resolution(), resolution(16, 9));
    }

    #[test]
    fn test_sweep_field_is_twice_the_output() {
        let field = sample_sweep_field(params(80), resolution(16, 9)).unwrap();

        assert_eq!(field.resolution(), resolution(32, 18));
        assert!(field.cells().iter().all(|&c| c < 80));
    }
}
