mod controllers;
mod core;
mod input;
mod presenters;
mod storage;

pub use crate::core::actions::antialias::antialias::{AntialiasError, antialias};
pub use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::compose::compose::{ComposeError, compose};
pub use crate::core::actions::plan_animation::errors::PlanAnimationError;
pub use crate::core::actions::plan_animation::keyframe::AnimationKeyframe;
pub use crate::core::actions::plan_animation::pan::plan_pan;
pub use crate::core::actions::plan_animation::sweep::{IterationSweep, SweepMode};
pub use crate::core::actions::plan_animation::zoom::plan_zoom;
pub use crate::core::actions::render::render::{
    RenderError, render_keyframe, render_preview, render_preview_cancelable, render_still, render_sweep_frame,
    sample_sweep_field,
};
pub use crate::core::actions::sample_field::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::sample_field::sample_field::{sample_field, sample_field_cancelable};
pub use crate::core::data::bookmark::Bookmark;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::complex_rect::ComplexRect;
pub use crate::core::data::iteration_field::IterationField;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::render_params::RenderParams;
pub use crate::core::data::resolution::{MAX_SAMPLE_PIXELS, Resolution, ResolutionError};
pub use crate::core::data::viewport::Viewport;
pub use crate::core::fractals::errors::{IterationCapError, MAX_ITERATION_CAP};
pub use crate::core::fractals::fractal_kinds::FractalKind;
pub use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
pub use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
pub use crate::core::navigation::command::{Command, Step, Transition};
pub use crate::core::navigation::viewport_state::ViewportState;
pub use crate::core::palette::colour_mode::ColourMode;
pub use crate::core::palette::noise_offsets::NoiseOffsets;
pub use crate::core::palette::palette::Palette;
pub use crate::core::util::round_significant::round_significant;

pub use controllers::explorer::ExplorerSession;
pub use controllers::explorer::action::{BookmarkChoice, ExplorerAction};
pub use controllers::explorer::ports::explorer_input::ExplorerInputPort;
pub use controllers::export::{
    ANIMATION_RESOLUTIONS, AnimationRequest, ExportController, ExportOptions, STILL_RESOLUTIONS, StillRequest,
};
pub use controllers::interactive::InteractiveController;
pub use controllers::ports::bookmark_store::{BookmarkStore, BookmarkStoreError};
pub use controllers::ports::file_presenter::FilePresenterPort;
pub use controllers::ports::frame_sink::{AnimationEncoderPort, FrameSink};
pub use input::terminal::TerminalInput;
pub use presenters::file::PngFilePresenter;
pub use presenters::terminal::TerminalPresenter;
pub use presenters::video::{FfmpegEncoder, FfmpegError, PngSequenceEncoder};
pub use storage::{DEFAULT_SETTINGS_PATH, JsonBookmarkStore, Settings, SettingsError};
