pub mod file;
pub mod terminal;
pub mod video;
