use crate::core::data::bookmark::Bookmark;
use crate::core::data::complex::Complex;

/// Coarse steps are the lower-case keys, fine steps the upper-case ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Coarse,
    Fine,
}

impl Step {
    /// Share of the view width moved by one pan.
    #[must_use]
    pub const fn pan_fraction(self) -> f64 {
        match self {
            Self::Coarse => 0.1,
            Self::Fine => 0.05,
        }
    }

    /// Width multiplier for zooming in.
    #[must_use]
    pub const fn shrink(self) -> f64 {
        match self {
            Self::Coarse => 0.9,
            Self::Fine => 0.95,
        }
    }

    /// Width multiplier for zooming out.
    #[must_use]
    pub const fn grow(self) -> f64 {
        match self {
            Self::Coarse => 1.1,
            Self::Fine => 1.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    PanLeft(Step),
    PanRight(Step),
    PanUp(Step),
    PanDown(Step),
    ZoomIn(Step),
    ZoomOut(Step),
    FewerIterations(Step),
    MoreIterations(Step),
    CycleColourMode,
    RandomizePalette,
    Reset,
    MarkWaypoint,
    ToggleJulia,
    JumpTo(Complex),
    JumpToBookmark(Bookmark),
}

/// What the session should do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Redraw,
    /// A second waypoint was marked. The pending list has been cleared.
    PanRequested { from: Complex, to: Complex },
    /// The command has no meaning in the current mode.
    Ignored,
}
