use std::io::{self, Stdout, Write};
use std::str::FromStr;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::{debug, warn};

use crate::controllers::explorer::action::{BookmarkChoice, ExplorerAction};
use crate::controllers::explorer::ports::explorer_input::ExplorerInputPort;
use crate::controllers::export::{ANIMATION_RESOLUTIONS, AnimationRequest, STILL_RESOLUTIONS, StillRequest};
use crate::core::actions::plan_animation::sweep::SweepMode;
use crate::core::data::complex::Complex;
use crate::core::data::resolution::Resolution;
use crate::input::terminal::keys::action_for_key;

/// Reads keys and prompt answers from the terminal.
///
/// Owns raw mode and the alternate screen for as long as it lives. Prompts
/// are single lines on the status row: Enter accepts, Esc cancels.
pub struct TerminalInput {
    out: Stdout,
}

impl TerminalInput {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self { out })
    }

    fn status_row(&self) -> io::Result<u16> {
        let (_, rows) = terminal::size()?;
        Ok(rows.saturating_sub(1))
    }

    /// Reads one line typed after `label`. `None` when Esc or Ctrl-C is
    /// pressed.
    fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        let row = self.status_row()?;
        let mut line = String::new();

        loop {
            queue!(
                self.out,
                MoveTo(0, row),
                ResetColor,
                Clear(ClearType::UntilNewLine),
                Print(label),
                Print(": "),
                Print(&line),
                Show
            )?;
            self.out.flush()?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match key.code {
                KeyCode::Enter => break,
                KeyCode::Esc => {
                    execute!(self.out, Hide)?;
                    return Ok(None);
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    execute!(self.out, Hide)?;
                    return Ok(None);
                }
                KeyCode::Backspace => {
                    line.pop();
                }
                KeyCode::Char(ch) => line.push(ch),
                _ => {}
            }
        }

        execute!(self.out, Hide)?;
        Ok(Some(line))
    }

    /// Asks for a value until it parses or the user cancels. A bad answer is
    /// reported and asked again.
    fn read_value<T, F>(&mut self, label: &str, parse: F) -> anyhow::Result<Option<T>>
    where
        F: Fn(&str) -> Option<T>,
    {
        loop {
            let Some(line) = self.read_line(label)? else {
                return Ok(None);
            };

            match parse(&line) {
                Some(value) => return Ok(Some(value)),
                None => {
                    debug!(input = %line, label, "rejected prompt answer");
                    self.notify(&format!("invalid {}: '{}'", label.to_lowercase(), line))?;
                }
            }
        }
    }

    fn read_resolution(&mut self, presets: &[(u32, u32)]) -> anyhow::Result<Option<Resolution>> {
        let label = preset_menu(presets);
        self.read_value(&label, |answer| parse_resolution_choice(answer, presets))
    }

    fn read_frames(&mut self) -> anyhow::Result<Option<usize>> {
        self.read_value("Frames", parse_positive::<usize>)
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        let restored = execute!(self.out, ResetColor, Show, LeaveAlternateScreen)
            .and_then(|()| terminal::disable_raw_mode());

        if let Err(err) = restored {
            warn!(error = %err, "failed to restore the terminal");
        }
    }
}

impl ExplorerInputPort for TerminalInput {
    fn next_action(&mut self) -> anyhow::Result<ExplorerAction> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    let action = action_for_key(key);
                    if action != ExplorerAction::Unbound {
                        return Ok(action);
                    }
                }
                Event::Resize(..) => {
                    execute!(self.out, Clear(ClearType::All))?;
                    return Ok(ExplorerAction::Redraw);
                }
                _ => {}
            }
        }
    }

    fn image_cells(&self) -> anyhow::Result<Resolution> {
        let (cols, rows) = terminal::size()?;
        Ok(Resolution::new(u32::from(cols.max(1)), u32::from(rows.saturating_sub(1).max(1)))?)
    }

    fn prompt_still(&mut self) -> anyhow::Result<Option<StillRequest>> {
        let Some(output) = self.read_resolution(&STILL_RESOLUTIONS)? else {
            return Ok(None);
        };
        let Some(antialiasing) = self.read_value("Antialiasing", parse_positive::<u32>)? else {
            return Ok(None);
        };

        Ok(Some(StillRequest { output, antialiasing }))
    }

    fn prompt_animation(&mut self) -> anyhow::Result<Option<AnimationRequest>> {
        let Some(kind) = self.read_value("Animation (zoom/sweep)", parse_animation_kind)? else {
            return Ok(None);
        };
        let Some(output) = self.read_resolution(&ANIMATION_RESOLUTIONS)? else {
            return Ok(None);
        };

        let request = match kind {
            AnimationKind::Zoom => self
                .read_frames()?
                .map(|frames| AnimationRequest::Zoom { output, frames }),
            AnimationKind::Sweep => self
                .read_value("Mode (add/single)", |answer| answer.parse::<SweepMode>().ok())?
                .map(|mode| AnimationRequest::Sweep { output, mode }),
        };

        Ok(request)
    }

    fn prompt_pan(&mut self) -> anyhow::Result<Option<(Resolution, usize)>> {
        let Some(output) = self.read_resolution(&ANIMATION_RESOLUTIONS)? else {
            return Ok(None);
        };

        Ok(self.read_frames()?.map(|frames| (output, frames)))
    }

    fn prompt_bookmark(&mut self, names: &[String]) -> anyhow::Result<Option<BookmarkChoice>> {
        let label = bookmark_menu(names);
        let Some(answer) = self.read_value(&label, |answer| parse_bookmark_answer(answer, names))? else {
            return Ok(None);
        };

        match answer {
            BookmarkAnswer::Jump(name) => Ok(Some(BookmarkChoice::Jump(name))),
            BookmarkAnswer::Save => Ok(self
                .read_value("Name", parse_bookmark_name)?
                .map(BookmarkChoice::SaveAs)),
        }
    }

    fn prompt_coordinates(&mut self) -> anyhow::Result<Option<Complex>> {
        let Some(real) = self.read_value("CenterX", parse_finite)? else {
            return Ok(None);
        };
        let Some(imag) = self.read_value("CenterY", parse_finite)? else {
            return Ok(None);
        };

        Ok(Some(Complex::new(real, imag)))
    }

    fn notify(&mut self, message: &str) -> anyhow::Result<()> {
        let row = self.status_row()?;
        execute!(
            self.out,
            MoveTo(0, row),
            ResetColor,
            Clear(ClearType::UntilNewLine),
            Print(message),
            Print("  (press any key)")
        )?;

        // the next frame repaints the status row, so hold the message until
        // it has been seen
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimationKind {
    Zoom,
    Sweep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BookmarkAnswer {
    Jump(String),
    Save,
}

fn preset_menu(presets: &[(u32, u32)]) -> String {
    let mut menu = String::from("Resolution");
    for (i, (width, height)) in presets.iter().enumerate() {
        menu.push_str(&format!(" {}) {}x{}", i + 1, width, height));
    }
    menu.push_str(" or WxH");
    menu
}

fn bookmark_menu(names: &[String]) -> String {
    let mut menu = String::from("Bookmarks");
    for (i, name) in names.iter().enumerate() {
        menu.push_str(&format!(" {}) {}", i + 1, name));
    }
    menu.push_str(" s) save current");
    menu
}

/// A preset number (1-based) or a custom `WxH`.
fn parse_resolution_choice(answer: &str, presets: &[(u32, u32)]) -> Option<Resolution> {
    let answer = answer.trim();

    if let Ok(choice) = answer.parse::<usize>() {
        let (width, height) = *presets.get(choice.checked_sub(1)?)?;
        return Resolution::new(width, height).ok();
    }

    Resolution::from_str(answer).ok()
}

fn parse_positive<T>(answer: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    answer
        .trim()
        .parse::<T>()
        .ok()
        .filter(|value| *value > T::default())
}

fn parse_finite(answer: &str) -> Option<f64> {
    answer.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_animation_kind(answer: &str) -> Option<AnimationKind> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "z" | "zoom" => Some(AnimationKind::Zoom),
        "s" | "sweep" => Some(AnimationKind::Sweep),
        _ => None,
    }
}

fn parse_bookmark_answer(answer: &str, names: &[String]) -> Option<BookmarkAnswer> {
    let answer = answer.trim();

    if answer.eq_ignore_ascii_case("s") {
        return Some(BookmarkAnswer::Save);
    }

    if let Ok(choice) = answer.parse::<usize>() {
        return names.get(choice.checked_sub(1)?).cloned().map(BookmarkAnswer::Jump);
    }

    names
        .iter()
        .find(|name| name.as_str() == answer)
        .cloned()
        .map(BookmarkAnswer::Jump)
}

fn parse_bookmark_name(answer: &str) -> Option<String> {
    let name = answer.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["home".to_string(), "seahorse".to_string()]
    }

    #[test]
    fn resolution_from_preset_number() {
        assert_eq!(
            parse_resolution_choice("2", &STILL_RESOLUTIONS),
            Some(Resolution::new(2560, 1440).unwrap())
        );
        assert_eq!(parse_resolution_choice("0", &STILL_RESOLUTIONS), None);
        assert_eq!(parse_resolution_choice("5", &STILL_RESOLUTIONS), None);
    }

    #[test]
    fn resolution_from_custom_size() {
        assert_eq!(
            parse_resolution_choice(" 800x600 ", &ANIMATION_RESOLUTIONS),
            Some(Resolution::new(800, 600).unwrap())
        );
        assert_eq!(parse_resolution_choice("800x0", &ANIMATION_RESOLUTIONS), None);
        assert_eq!(parse_resolution_choice("big", &ANIMATION_RESOLUTIONS), None);
    }

    #[test]
    fn positive_numbers_only() {
        assert_eq!(parse_positive::<u32>("3"), Some(3));
        assert_eq!(parse_positive::<u32>("0"), None);
        assert_eq!(parse_positive::<usize>("-1"), None);
        assert_eq!(parse_positive::<usize>("ten"), None);
    }

    #[test]
    fn coordinates_must_be_finite() {
        assert_eq!(parse_finite("-0.745"), Some(-0.745));
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("NaN"), None);
    }

    #[test]
    fn animation_kind_accepts_short_names() {
        assert_eq!(parse_animation_kind("Z"), Some(AnimationKind::Zoom));
        assert_eq!(parse_animation_kind("sweep"), Some(AnimationKind::Sweep));
        assert_eq!(parse_animation_kind("pan"), None);
    }

    #[test]
    fn bookmark_answers() {
        assert_eq!(parse_bookmark_answer("2", &names()), Some(BookmarkAnswer::Jump("seahorse".to_string())));
        assert_eq!(parse_bookmark_answer("home", &names()), Some(BookmarkAnswer::Jump("home".to_string())));
        assert_eq!(parse_bookmark_answer("S", &names()), Some(BookmarkAnswer::Save));
        assert_eq!(parse_bookmark_answer("3", &names()), None);
        assert_eq!(parse_bookmark_answer("nowhere", &names()), None);
    }

    #[test]
    fn bookmark_names_are_trimmed_and_non_empty() {
        assert_eq!(parse_bookmark_name("  spiral "), Some("spiral".to_string()));
        assert_eq!(parse_bookmark_name("   "), None);
    }

    #[test]
    fn menus_list_their_options() {
        assert_eq!(
            preset_menu(&[(1280, 720), (1920, 1080)]),
            "Resolution 1) 1280x720 2) 1920x1080 or WxH"
        );
        assert_eq!(bookmark_menu(&names()), "Bookmarks 1) home 2) seahorse s) save current");
    }
}
