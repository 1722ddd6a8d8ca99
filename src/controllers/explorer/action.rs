use crate::core::navigation::command::Command;

/// One decoded key press of the interactive explorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExplorerAction {
    /// A navigation or palette command applied to the session state.
    Navigate(Command),
    ExportStill,
    Animate,
    Bookmarks,
    JumpPrompt,
    /// The terminal changed size or needs repainting.
    Redraw,
    Quit,
    /// A key with no binding.
    Unbound,
}

/// What the user picked in the bookmark menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkChoice {
    Jump(String),
    SaveAs(String),
}
