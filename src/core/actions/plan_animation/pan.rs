use crate::core::actions::plan_animation::errors::PlanAnimationError;
use crate::core::actions::plan_animation::keyframe::AnimationKeyframe;
use crate::core::data::complex::Complex;
use crate::core::data::render_params::RenderParams;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::linspace::linspace;

/// Width of the fixed display window every pan frame shows.
pub const PAN_WIDTH: f64 = 4.0;

/// Iteration cap of every pan frame.
pub const PAN_MAX_ITERATIONS: u32 = 5000;

/// Plans a walk through Julia constant space from `from` to `to`.
///
/// The display window stays centred on the origin; only the Julia constant
/// moves, linearly in each component.
pub fn plan_pan(from: Complex, to: Complex, frames: usize) -> Result<Vec<AnimationKeyframe>, PlanAnimationError> {
    if frames == 0 {
        return Err(PlanAnimationError::EmptySequence);
    }

    let reals = linspace(from.real, to.real, frames);
    let imags = linspace(from.imag, to.imag, frames);

    Ok(reals
        .into_iter()
        .zip(imags)
        .enumerate()
        .map(|(index, (real, imag))| {
            AnimationKeyframe::new(
                index,
                RenderParams {
                    fractal: FractalKind::Julia {
                        constant: Complex::new(real, imag),
                    },
                    center: Complex::ZERO,
                    width: PAN_WIDTH,
                    max_iterations: PAN_MAX_ITERATIONS,
                },
            )
        })
        .collect())
}
