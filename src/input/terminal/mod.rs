pub mod keys;
pub mod prompt;

pub use prompt::TerminalInput;
