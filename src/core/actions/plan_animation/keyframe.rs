use crate::core::data::render_params::RenderParams;

/// One frame of a planned animation: its position in the sequence and the
/// view it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationKeyframe {
    index: usize,
    params: RenderParams,
}

impl AnimationKeyframe {
    #[must_use]
    pub fn new(index: usize, params: RenderParams) -> Self {
        Self { index, params }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn params(&self) -> RenderParams {
        self.params
    }
}
