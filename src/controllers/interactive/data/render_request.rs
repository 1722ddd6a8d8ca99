use crate::core::data::render_params::RenderParams;
use crate::core::data::resolution::Resolution;
use crate::core::palette::palette::Palette;

/// Everything one preview render needs, copied out of the session state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub params: RenderParams,
    pub palette: Palette,
    /// Character cells of the image area, excluding the status line.
    pub cells: Resolution,
    /// Text shown under the frame once it is presented.
    pub status: String,
}
