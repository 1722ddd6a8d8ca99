use crate::core::actions::plan_animation::errors::PlanAnimationError;
use crate::core::actions::plan_animation::keyframe::AnimationKeyframe;
use crate::core::data::complex::Complex;
use crate::core::data::render_params::RenderParams;
use crate::core::fractals::errors::validate_iteration_cap;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::linspace::{geomspace, linspace};

/// Width of the first zoom frame.
pub const ZOOM_START_WIDTH: f64 = 4.0;

/// Iteration cap of the first zoom frame.
pub const ZOOM_START_ITERATIONS: u32 = 200;

/// Plans a Mandelbrot zoom onto `center`.
///
/// Widths shrink (or grow) geometrically from [`ZOOM_START_WIDTH`] to
/// `end_width`, caps move linearly from [`ZOOM_START_ITERATIONS`] to
/// `end_iterations` and are truncated, never dropping below 1. A single frame
/// shows the starting view.
pub fn plan_zoom(
    center: Complex,
    end_width: f64,
    end_iterations: u32,
    frames: usize,
) -> Result<Vec<AnimationKeyframe>, PlanAnimationError> {
    if frames == 0 {
        return Err(PlanAnimationError::EmptySequence);
    }
    if !(end_width > 0.0) {
        return Err(PlanAnimationError::NonPositiveWidth { width: end_width });
    }
    validate_iteration_cap(end_iterations)?;

    let widths = geomspace(ZOOM_START_WIDTH, end_width, frames);
    let caps = linspace(
        f64::from(ZOOM_START_ITERATIONS),
        f64::from(end_iterations),
        frames,
    );

    Ok(widths
        .into_iter()
        .zip(caps)
        .enumerate()
        .map(|(index, (width, cap))| {
            AnimationKeyframe::new(
                index,
                RenderParams {
                    fractal: FractalKind::Mandelbrot,
                    center,
                    width,
                    max_iterations: (cap as u32).max(1),
                },
            )
        })
        .collect())
}
