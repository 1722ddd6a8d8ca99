use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, warn};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::data::colour::Colour;

struct TerminalState<W> {
    writer: W,
    last_presented_generation: u64,
    status_row: u16,
}

/// Paints frames as background-coloured spaces, one pixel per character
/// cell, with the status line in the row below the image.
pub struct TerminalPresenter<W: Write + Send> {
    state: Mutex<TerminalState<W>>,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                writer,
                last_presented_generation: 0,
                status_row: 0,
            }),
        }
    }

    #[must_use]
    pub fn last_presented_generation(&self) -> u64 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_presented_generation
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner).writer
    }
}

impl<W: Write + Send> InteractiveControllerPresenterPort for TerminalPresenter<W> {
    fn present(&self, event: RenderEvent) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let result = match event {
            RenderEvent::Frame(frame) => {
                // a late frame from an older request would overwrite a newer one
                if frame.generation <= state.last_presented_generation {
                    debug!(generation = frame.generation, "dropping stale frame");
                    return;
                }

                let result = draw_frame(&mut state.writer, &frame);
                state.last_presented_generation = frame.generation;
                state.status_row = frame.pixel_buffer.resolution().height() as u16;
                result
            }
            RenderEvent::Error(error) => {
                if error.generation < state.last_presented_generation {
                    return;
                }

                let row = state.status_row;
                draw_status(&mut state.writer, row, &format!("error: {}", error.message))
            }
        };

        if let Err(err) = result {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

fn draw_frame<W: Write>(writer: &mut W, frame: &FrameData) -> io::Result<()> {
    let resolution = frame.pixel_buffer.resolution();
    let mut current: Option<Colour> = None;

    for y in 0..resolution.height() {
        queue!(writer, MoveTo(0, y as u16))?;

        for colour in frame.pixel_buffer.row(y) {
            if current != Some(colour) {
                queue!(
                    writer,
                    SetBackgroundColor(Color::Rgb {
                        r: colour.r,
                        g: colour.g,
                        b: colour.b,
                    })
                )?;
                current = Some(colour);
            }

            queue!(writer, Print(' '))?;
        }
    }

    queue!(writer, ResetColor)?;
    draw_status(writer, resolution.height() as u16, &frame.status)
}

fn draw_status<W: Write>(writer: &mut W, row: u16, text: &str) -> io::Result<()> {
    queue!(
        writer,
        MoveTo(0, row),
        ResetColor,
        Clear(ClearType::UntilNewLine),
        Print(text)
    )?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::errors::frame_error::FrameError;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use crate::core::data::resolution::Resolution;
    use std::time::Duration;

    fn frame(generation: u64, status: &str) -> RenderEvent {
        let mut buffer = PixelBuffer::new(Resolution::new(2, 2).unwrap());
        buffer.set_pixel(1, 0, Colour { r: 10, g: 20, b: 30 }).unwrap();

        RenderEvent::Frame(FrameData {
            generation,
            pixel_buffer: buffer,
            status: status.to_string(),
            render_duration: Duration::from_millis(1),
        })
    }

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn frame_is_painted_with_true_colour_cells() {
        let presenter = TerminalPresenter::new(Vec::new());
        presenter.present(frame(1, "X: -0.5"));

        let text = output(presenter);
        assert!(text.contains("\x1b[48;2;10;20;30m"));
        assert!(text.contains("\x1b[48;2;0;0;0m"));
        assert!(text.matches(' ').count() >= 4);
        assert!(text.ends_with("X: -0.5"));
    }

    #[test]
    fn status_line_sits_below_the_image() {
        let presenter = TerminalPresenter::new(Vec::new());
        presenter.present(frame(1, "status"));

        // MoveTo is one-based on the wire
        let text = output(presenter);
        assert!(text.contains("\x1b[3;1H"));
    }

    #[test]
    fn stale_frames_are_dropped() {
        let presenter = TerminalPresenter::new(Vec::new());
        presenter.present(frame(3, "newer"));
        presenter.present(frame(2, "older"));

        assert_eq!(presenter.last_presented_generation(), 3);
        let text = output(presenter);
        assert!(text.contains("newer"));
        assert!(!text.contains("older"));
    }

    #[test]
    fn errors_are_shown_on_the_status_line() {
        let presenter = TerminalPresenter::new(Vec::new());
        presenter.present(RenderEvent::Error(FrameError {
            generation: 1,
            message: "boom".to_string(),
        }));

        assert!(output(presenter).contains("error: boom"));
    }

    #[test]
    fn errors_older_than_the_shown_frame_are_ignored() {
        let presenter = TerminalPresenter::new(Vec::new());
        presenter.present(frame(5, "fine"));
        presenter.present(RenderEvent::Error(FrameError {
            generation: 4,
            message: "late".to_string(),
        }));

        assert!(!output(presenter).contains("late"));
    }
}
