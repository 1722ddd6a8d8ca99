use crate::core::data::bookmark::Bookmark;
use crate::core::data::complex::Complex;
use crate::core::data::render_params::RenderParams;
use crate::core::fractals::errors::MAX_ITERATION_CAP;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::navigation::command::{Command, Transition};
use crate::core::navigation::view_state::ViewState;
use crate::core::palette::palette::Palette;
use crate::core::util::round_significant::round_significant;

/// The Julia sub-mode: a constant picked from the Mandelbrot view and a view
/// of its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaView {
    pub constant: Complex,
    pub view: ViewState,
}

/// All navigation state of an interactive session.
///
/// Every render starts from [`snapshot`](Self::snapshot), so the state can
/// keep changing while a render is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    mandelbrot: ViewState,
    julia: Option<JuliaView>,
    palette: Palette,
    waypoints: Vec<Complex>,
}

impl ViewportState {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            mandelbrot: ViewState::MANDELBROT_START,
            julia: None,
            palette,
            waypoints: Vec::with_capacity(2),
        }
    }

    pub fn apply(&mut self, command: Command) -> Transition {
        let in_julia = self.julia.is_some();

        match command {
            Command::CycleColourMode => self.palette.cycle_mode(),
            Command::RandomizePalette => self.palette.new_offsets(),
            Command::ToggleJulia => self.toggle_julia(),
            Command::Reset => {
                *self.active_view_mut() = if in_julia {
                    ViewState::JULIA_START
                } else {
                    ViewState::MANDELBROT_RESET
                };
            }
            Command::MarkWaypoint | Command::JumpTo(_) | Command::JumpToBookmark(_) if in_julia => {
                return Transition::Ignored;
            }
            Command::MarkWaypoint => return self.mark_waypoint(),
            Command::JumpTo(center) => self.mandelbrot.center = center,
            Command::JumpToBookmark(bookmark) => return self.jump_to_bookmark(bookmark),
            navigation => navigate(self.active_view_mut(), navigation),
        }

        Transition::Redraw
    }

    /// Copies out what the next render needs.
    #[must_use]
    pub fn snapshot(&self) -> RenderParams {
        match self.julia {
            Some(julia) => RenderParams {
                fractal: FractalKind::Julia {
                    constant: julia.constant,
                },
                center: julia.view.center,
                width: julia.view.width,
                max_iterations: julia.view.max_iterations,
            },
            None => RenderParams {
                fractal: FractalKind::Mandelbrot,
                center: self.mandelbrot.center,
                width: self.mandelbrot.width,
                max_iterations: self.mandelbrot.max_iterations,
            },
        }
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[must_use]
    pub fn mandelbrot_view(&self) -> ViewState {
        self.mandelbrot
    }

    #[must_use]
    pub fn julia(&self) -> Option<JuliaView> {
        self.julia
    }

    #[must_use]
    pub fn pending_waypoints(&self) -> &[Complex] {
        &self.waypoints
    }

    /// The Mandelbrot view as a bookmark record.
    #[must_use]
    pub fn bookmark(&self) -> Bookmark {
        Bookmark {
            center: self.mandelbrot.center,
            width: self.mandelbrot.width,
            max_iterations: self.mandelbrot.max_iterations,
        }
    }

    /// The status line, with coordinates and width rounded to `digits`
    /// significant digits.
    #[must_use]
    pub fn status(&self, digits: u32) -> String {
        let view = self.julia.map_or(self.mandelbrot, |julia| julia.view);
        let mut status = format!(
            "X: {}     Y: {}     Width: {}     Iters: {}",
            round_significant(view.center.real, digits),
            round_significant(view.center.imag, digits),
            round_significant(view.width, digits),
            view.max_iterations
        );

        if self.julia.is_none() && self.waypoints.len() == 1 {
            status.push_str("     pick second point");
        }

        status
    }

    fn active_view_mut(&mut self) -> &mut ViewState {
        match &mut self.julia {
            Some(julia) => &mut julia.view,
            None => &mut self.mandelbrot,
        }
    }

    fn toggle_julia(&mut self) {
        self.julia = match self.julia {
            Some(_) => None,
            None => Some(JuliaView {
                constant: self.mandelbrot.center,
                view: ViewState::JULIA_START,
            }),
        };
    }

    fn mark_waypoint(&mut self) -> Transition {
        self.waypoints.push(self.mandelbrot.center);

        match self.waypoints.as_slice() {
            &[from, to] => {
                self.waypoints.clear();
                Transition::PanRequested { from, to }
            }
            _ => Transition::Redraw,
        }
    }

    fn jump_to_bookmark(&mut self, bookmark: Bookmark) -> Transition {
        if !(bookmark.width > 0.0) {
            return Transition::Ignored;
        }

        self.mandelbrot = ViewState {
            center: bookmark.center,
            width: bookmark.width,
            max_iterations: bookmark.max_iterations.clamp(1, MAX_ITERATION_CAP),
        };

        Transition::Redraw
    }
}

fn navigate(view: &mut ViewState, command: Command) {
    match command {
        Command::PanLeft(step) => view.pan(-1.0, 0.0, step),
        Command::PanRight(step) => view.pan(1.0, 0.0, step),
        // rows grow with the imaginary part, so up on screen is down in the plane
        Command::PanUp(step) => view.pan(0.0, -1.0, step),
        Command::PanDown(step) => view.pan(0.0, 1.0, step),
        Command::ZoomIn(step) => view.scale_width(step.shrink()),
        Command::ZoomOut(step) => view.scale_width(step.grow()),
        Command::FewerIterations(step) => view.scale_iterations(step.shrink()),
        Command::MoreIterations(step) => view.scale_iterations(step.grow()),
        _ => {}
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::command::Step;
    use crate::core::palette::colour_mode::ColourMode;
    use crate::core::palette::noise_offsets::NoiseOffsets;

    const EPSILON: f64 = 1e-12;

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "actual={} expected={}",
            actual,
            expected
        );
    }

    fn state() -> ViewportState {
        ViewportState::new(Palette::new(
            ColourMode::Grayscale,
            NoiseOffsets::new(0.25, 0.5, 0.75),
        ))
    }

    #[test]
    fn starts_on_the_default_mandelbrot_view() {
        let params = state().snapshot();

        assert_eq!(params.fractal, FractalKind::Mandelbrot);
        assert_eq!(params.center, Complex::new(-0.5, 0.0));
        assert_eq!(params.width, 4.5);
        assert_eq!(params.max_iterations, 100);
    }

    #[test]
    fn pans_by_a_tenth_or_a_twentieth_of_the_width() {
        let mut state = state();

        state.apply(Command::PanLeft(Step::Coarse));
        assert_approx_eq(state.snapshot().center.real, -0.95);

        state.apply(Command::PanRight(Step::Fine));
        assert_approx_eq(state.snapshot().center.real, -0.725);

        state.apply(Command::PanUp(Step::Coarse));
        assert_approx_eq(state.snapshot().center.imag, -0.45);

        state.apply(Command::PanDown(Step::Fine));
        assert_approx_eq(state.snapshot().center.imag, -0.225);
    }

    #[test]
    fn zooms_multiplicatively() {
        let mut state = state();

        state.apply(Command::ZoomIn(Step::Coarse));
        assert_approx_eq(state.snapshot().width, 4.05);

        state.apply(Command::ZoomOut(Step::Fine));
        assert_approx_eq(state.snapshot().width, 4.2525);

        state.apply(Command::ZoomOut(Step::Coarse));
        state.apply(Command::ZoomIn(Step::Fine));
        assert_approx_eq(state.snapshot().width, 4.2525 * 1.1 * 0.95);
    }

    #[test]
    fn iteration_cap_never_reaches_zero() {
        let mut state = state();

        for _ in 0..200 {
            state.apply(Command::FewerIterations(Step::Coarse));
        }

        assert_eq!(state.snapshot().max_iterations, 1);
    }

    #[test]
    fn more_iterations_truncates() {
        let mut state = state();

        state.apply(Command::MoreIterations(Step::Coarse));
        assert_eq!(state.snapshot().max_iterations, 110);

        state.apply(Command::FewerIterations(Step::Fine));
        assert_eq!(state.snapshot().max_iterations, 104);
    }

    #[test]
    fn reset_restores_mandelbrot_reset_view() {
        let mut state = state();
        state.apply(Command::ZoomIn(Step::Coarse));
        state.apply(Command::PanLeft(Step::Coarse));
        state.apply(Command::MoreIterations(Step::Coarse));

        state.apply(Command::Reset);

        let params = state.snapshot();
        assert_eq!(params.center, Complex::new(-0.5, 0.0));
        assert_eq!(params.width, 5.0);
        assert_eq!(params.max_iterations, 100);
    }

    #[test]
    fn colour_mode_cycles_and_palette_reseeds() {
        let mut state = state();

        state.apply(Command::CycleColourMode);
        assert_eq!(state.palette().mode(), ColourMode::CyclicGradient);
        state.apply(Command::CycleColourMode);
        state.apply(Command::CycleColourMode);
        assert_eq!(state.palette().mode(), ColourMode::Grayscale);

        let before = state.palette().offsets();
        state.apply(Command::RandomizePalette);
        assert_ne!(state.palette().offsets(), before);
    }

    #[test]
    fn second_waypoint_requests_a_pan() {
        let mut state = state();

        assert_eq!(state.apply(Command::MarkWaypoint), Transition::Redraw);
        assert_eq!(state.pending_waypoints(), &[Complex::new(-0.5, 0.0)]);
        assert!(state.status(5).ends_with("pick second point"));

        state.apply(Command::JumpTo(Complex::new(0.3, 0.5)));
        let transition = state.apply(Command::MarkWaypoint);

        assert_eq!(
            transition,
            Transition::PanRequested {
                from: Complex::new(-0.5, 0.0),
                to: Complex::new(0.3, 0.5),
            }
        );
        assert!(state.pending_waypoints().is_empty());
    }

    #[test]
    fn julia_mode_uses_the_centre_as_constant() {
        let mut state = state();
        state.apply(Command::JumpTo(Complex::new(-0.8, 0.156)));
        state.apply(Command::ToggleJulia);

        let params = state.snapshot();
        assert_eq!(
            params.fractal,
            FractalKind::Julia {
                constant: Complex::new(-0.8, 0.156)
            }
        );
        assert_eq!(params.center, Complex::ZERO);
        assert_eq!(params.width, 4.0);
    }

    #[test]
    fn julia_mode_navigates_its_own_view() {
        let mut state = state();
        state.apply(Command::ToggleJulia);
        state.apply(Command::ZoomIn(Step::Coarse));
        state.apply(Command::PanRight(Step::Coarse));

        assert_approx_eq(state.snapshot().width, 3.6);
        assert_approx_eq(state.snapshot().center.real, 0.36);

        state.apply(Command::Reset);
        assert_eq!(state.snapshot().width, 4.0);

        state.apply(Command::ToggleJulia);
        assert_eq!(state.snapshot().width, 4.5);
    }

    #[test]
    fn julia_view_resets_on_every_entry() {
        let mut state = state();
        state.apply(Command::ToggleJulia);
        state.apply(Command::ZoomIn(Step::Coarse));
        state.apply(Command::ToggleJulia);
        state.apply(Command::ToggleJulia);

        assert_eq!(state.snapshot().width, 4.0);
    }

    #[test]
    fn julia_mode_ignores_mandelbrot_only_commands() {
        let mut state = state();
        state.apply(Command::ToggleJulia);
        let before = state.clone();

        assert_eq!(state.apply(Command::MarkWaypoint), Transition::Ignored);
        assert_eq!(
            state.apply(Command::JumpTo(Complex::new(1.0, 1.0))),
            Transition::Ignored
        );
        assert_eq!(state, before);
    }

    #[test]
    fn bookmark_replaces_the_view() {
        let mut state = state();
        let bookmark = Bookmark {
            center: Complex::new(-0.75, 0.1),
            width: 0.5,
            max_iterations: 400,
        };

        assert_eq!(state.apply(Command::JumpToBookmark(bookmark)), Transition::Redraw);
        assert_eq!(state.bookmark(), bookmark);
    }

    #[test]
    fn bookmark_with_bad_width_is_ignored() {
        let mut state = state();
        let bookmark = Bookmark {
            center: Complex::new(1.0, 1.0),
            width: 0.0,
            max_iterations: 400,
        };

        assert_eq!(state.apply(Command::JumpToBookmark(bookmark)), Transition::Ignored);
        assert_eq!(state.snapshot().center, Complex::new(-0.5, 0.0));
    }

    #[test]
    fn status_line_rounds_to_significant_digits() {
        let mut state = state();
        state.apply(Command::JumpTo(Complex::new(-0.743643887037, 0.131825904205)));

        assert_eq!(
            state.status(5),
            "X: -0.74364     Y: 0.13183     Width: 4.5     Iters: 100"
        );
    }
}
