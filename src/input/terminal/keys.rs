use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controllers::explorer::action::ExplorerAction;
use crate::core::navigation::command::{Command, Step};

/// Lower-case letters take coarse steps, upper-case letters fine ones.
pub fn action_for_key(key: KeyEvent) -> ExplorerAction {
    if key.kind == KeyEventKind::Release {
        return ExplorerAction::Unbound;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => ExplorerAction::Quit,
            _ => ExplorerAction::Unbound,
        };
    }

    let KeyCode::Char(ch) = key.code else {
        return ExplorerAction::Unbound;
    };

    let step = if ch.is_ascii_uppercase() {
        Step::Fine
    } else {
        Step::Coarse
    };

    let command = match ch.to_ascii_lowercase() {
        'a' => Command::PanLeft(step),
        'd' => Command::PanRight(step),
        'w' => Command::PanUp(step),
        's' => Command::PanDown(step),
        'q' => Command::ZoomIn(step),
        'e' => Command::ZoomOut(step),
        'z' => Command::FewerIterations(step),
        'c' => Command::MoreIterations(step),
        'm' => Command::CycleColourMode,
        'n' => Command::RandomizePalette,
        'r' => Command::Reset,
        'i' => Command::MarkWaypoint,
        ' ' => Command::ToggleJulia,
        'x' => return ExplorerAction::JumpPrompt,
        'b' => return ExplorerAction::Bookmarks,
        'f' => return ExplorerAction::ExportStill,
        'v' => return ExplorerAction::Animate,
        _ => return ExplorerAction::Unbound,
    };

    ExplorerAction::Navigate(command)
}
