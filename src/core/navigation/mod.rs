pub mod command;
pub mod view_state;
pub mod viewport_state;
