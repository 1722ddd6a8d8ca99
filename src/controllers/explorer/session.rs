use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{info, warn};

use crate::controllers::explorer::action::{BookmarkChoice, ExplorerAction};
use crate::controllers::explorer::ports::explorer_input::ExplorerInputPort;
use crate::controllers::export::{AnimationRequest, ExportController};
use crate::controllers::interactive::InteractiveController;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::ports::bookmark_store::BookmarkStore;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::controllers::ports::frame_sink::AnimationEncoderPort;
use crate::core::data::complex::Complex;
use crate::core::navigation::command::{Command, Transition};
use crate::core::navigation::viewport_state::ViewportState;

pub struct ExplorerSession<I, B, P, E>
where
    I: ExplorerInputPort,
    B: BookmarkStore,
    P: FilePresenterPort,
    E: AnimationEncoderPort,
{
    // dropped first, so no frame is painted after the input restores the terminal
    renderer: InteractiveController,
    input: I,
    bookmarks: B,
    export: ExportController<P, E>,
    state: ViewportState,
    status_digits: u32,
    last_request: Option<RenderRequest>,
}

impl<I, B, P, E> ExplorerSession<I, B, P, E>
where
    I: ExplorerInputPort,
    B: BookmarkStore,
    P: FilePresenterPort,
    E: AnimationEncoderPort,
{
    pub fn new(
        input: I,
        bookmarks: B,
        export: ExportController<P, E>,
        renderer: InteractiveController,
        state: ViewportState,
        status_digits: u32,
    ) -> Self {
        Self {
            renderer,
            input,
            bookmarks,
            export,
            state,
            status_digits,
            last_request: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Renders, waits for a key, applies it, until the user quits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!("explorer session started");

        loop {
            self.request_render()?;

            let action = self.input.next_action()?;
            if self.handle(action)?.is_break() {
                break;
            }
        }

        info!("explorer session ended");
        Ok(())
    }

    /// Applies one action. Breaks when the session should end.
    pub fn handle(&mut self, action: ExplorerAction) -> anyhow::Result<ControlFlow<()>> {
        let in_julia = self.state.julia().is_some();

        match action {
            ExplorerAction::Quit => return Ok(ControlFlow::Break(())),
            ExplorerAction::Unbound => {}
            ExplorerAction::Redraw => self.last_request = None,
            ExplorerAction::Navigate(command) => self.navigate(command)?,
            ExplorerAction::ExportStill => self.export_still()?,
            ExplorerAction::Animate | ExplorerAction::Bookmarks | ExplorerAction::JumpPrompt if in_julia => {}
            ExplorerAction::Animate => self.animate()?,
            ExplorerAction::Bookmarks => self.bookmarks()?,
            ExplorerAction::JumpPrompt => self.jump_prompt()?,
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Submits a render unless the last submitted one already shows the
    /// current state.
    fn request_render(&mut self) -> anyhow::Result<()> {
        let request = RenderRequest {
            params: self.state.snapshot(),
            palette: self.state.palette(),
            cells: self.input.image_cells()?,
            status: self.state.status(self.status_digits),
        };

        if self.last_request.as_ref() == Some(&request) {
            return Ok(());
        }

        self.renderer.submit_request(Arc::new(request.clone()));
        self.last_request = Some(request);

        Ok(())
    }

    fn navigate(&mut self, command: Command) -> anyhow::Result<()> {
        match self.state.apply(command) {
            Transition::Redraw | Transition::Ignored => Ok(()),
            Transition::PanRequested { from, to } => self.pan(from, to),
        }
    }

    fn pan(&mut self, from: Complex, to: Complex) -> anyhow::Result<()> {
        self.suspend_preview();
        let choice = self.input.prompt_pan()?;

        let Some((output, frames)) = choice else {
            return Ok(());
        };

        let result = self
            .export
            .export_pan(from, to, &self.state.palette(), output, frames);
        self.report(result.map(|path| format!("saved {}", path.display())))
    }

    fn export_still(&mut self) -> anyhow::Result<()> {
        self.suspend_preview();
        let choice = self.input.prompt_still()?;

        let Some(request) = choice else {
            return Ok(());
        };

        let result = self
            .export
            .export_still(self.state.snapshot(), &self.state.palette(), request);
        self.report(result.map(|path| format!("saved {}", path.display())))
    }

    fn animate(&mut self) -> anyhow::Result<()> {
        self.suspend_preview();
        let choice = self.input.prompt_animation()?;

        let params = self.state.snapshot();
        let palette = self.state.palette();

        let result = match choice {
            None => return Ok(()),
            Some(AnimationRequest::Zoom { output, frames }) => self
                .export
                .export_zoom(params, &palette, output, frames)
                .map(|path| format!("saved {}", path.display())),
            Some(AnimationRequest::Sweep { output, mode }) => self
                .export
                .export_sweep(params, &palette, output, mode)
                .map(|(path, frames)| format!("saved {} ({} frames)", path.display(), frames)),
        };

        self.report(result)
    }

    fn bookmarks(&mut self) -> anyhow::Result<()> {
        self.suspend_preview();

        let names = match self.bookmarks.names() {
            Ok(names) => names,
            Err(err) => return self.report(Err(err.into())),
        };

        let choice = self.input.prompt_bookmark(&names)?;

        match choice {
            None => Ok(()),
            Some(BookmarkChoice::Jump(name)) => match self.bookmarks.load(&name) {
                Ok(bookmark) => {
                    if self.state.apply(Command::JumpToBookmark(bookmark)) == Transition::Ignored {
                        self.input
                            .notify(&format!("bookmark '{}' has an invalid width", name))?;
                    }
                    Ok(())
                }
                Err(err) => self.report(Err(err.into())),
            },
            Some(BookmarkChoice::SaveAs(name)) => {
                let result = self
                    .bookmarks
                    .save(&name, self.state.bookmark())
                    .map(|()| format!("saved bookmark '{}'", name));
                self.report(result.map_err(Into::into))
            }
        }
    }

    fn jump_prompt(&mut self) -> anyhow::Result<()> {
        self.suspend_preview();
        let choice = self.input.prompt_coordinates()?;

        if let Some(center) = choice {
            self.state.apply(Command::JumpTo(center));
        }

        Ok(())
    }

    /// Stops the preview before a prompt takes over the status row. The
    /// next loop iteration submits a fresh render.
    fn suspend_preview(&mut self) {
        self.renderer.cancel_pending();
        self.last_request = None;
    }

    /// Shows the outcome of an export or bookmark operation. Failures are
    /// logged and shown, and the session carries on.
    fn report(&mut self, result: anyhow::Result<String>) -> anyhow::Result<()> {
        match result {
            Ok(message) => {
                info!("{}", message);
                self.input.notify(&message)
            }
            Err(err) => {
                warn!(error = %format!("{:#}", err), "operation failed");
                self.input.notify(&format!("error: {:#}", err))
            }
        }
    }
}
