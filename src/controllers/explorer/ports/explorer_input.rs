use crate::controllers::explorer::action::{BookmarkChoice, ExplorerAction};
use crate::controllers::export::{AnimationRequest, StillRequest};
use crate::core::data::complex::Complex;
use crate::core::data::resolution::Resolution;

/// The user side of an interactive session.
///
/// Every `prompt_*` method returns `Ok(None)` when the user cancels; the
/// session then continues unchanged. `Err` is reserved for a broken terminal.
pub trait ExplorerInputPort {
    /// Blocks until the next key press.
    fn next_action(&mut self) -> anyhow::Result<ExplorerAction>;

    /// Character cells available for the image, excluding the status line.
    fn image_cells(&self) -> anyhow::Result<Resolution>;

    fn prompt_still(&mut self) -> anyhow::Result<Option<StillRequest>>;

    fn prompt_animation(&mut self) -> anyhow::Result<Option<AnimationRequest>>;

    /// Output resolution and frame count for a Julia pan.
    fn prompt_pan(&mut self) -> anyhow::Result<Option<(Resolution, usize)>>;

    fn prompt_bookmark(&mut self, names: &[String]) -> anyhow::Result<Option<BookmarkChoice>>;

    fn prompt_coordinates(&mut self) -> anyhow::Result<Option<Complex>>;

    /// Shows a short message, e.g. a failed export.
    fn notify(&mut self, message: &str) -> anyhow::Result<()>;
}
