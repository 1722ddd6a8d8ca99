use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::frame_error::FrameError;

#[derive(Debug)]
pub enum RenderEvent {
    Frame(FrameData),
    Error(FrameError),
}
