use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::frame_error::FrameError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::cancellation::SupersededBy;
use crate::core::actions::render::render::{RenderError, render_preview_cancelable};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, warn};

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, Arc<RenderRequest>)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

/// Renders the newest submitted request on a dedicated worker thread.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(presenter_port: Arc<dyn InteractiveControllerPresenterPort>) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Queues `request`, replacing any request the worker has not picked up
    /// yet and cancelling the one it is working on. Returns its generation.
    pub fn submit_request(&self, request: Arc<RenderRequest>) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some((generation, request));
        }

        self.shared.wake.notify_one();

        generation
    }

    /// Cancels the render in progress and drops any queued request, so
    /// nothing is presented until the next [`submit_request`].
    /// Returns the generation that superseded them.
    ///
    /// [`submit_request`]: Self::submit_request
    pub fn cancel_pending(&self) -> u64 {
        let generation = {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = None;
            self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        debug!(generation, "pending preview cancelled");

        generation
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let cancel_token = SupersededBy::new(job_generation, &shared.generation, &shared.shutdown);

            let start = Instant::now();
            let result = render_preview_cancelable(
                request.params,
                &request.palette,
                request.cells,
                &cancel_token,
            );
            let render_duration = start.elapsed();

            match result {
                Ok(pixel_buffer) => {
                    let current_gen = shared.generation.load(Ordering::Acquire);

                    if job_generation != current_gen {
                        continue;
                    }

                    debug!(
                        generation = job_generation,
                        cells = %request.cells,
                        ?render_duration,
                        "preview rendered"
                    );

                    shared.presenter_port.present(RenderEvent::Frame(FrameData {
                        generation: job_generation,
                        pixel_buffer,
                        status: request.status.clone(),
                        render_duration,
                    }));

                    shared
                        .last_completed_generation
                        .store(job_generation, Ordering::Release);
                }
                Err(RenderError::Cancelled(_)) => {
                    continue;
                }
                Err(err) => {
                    let current_gen = shared.generation.load(Ordering::Acquire);

                    if job_generation != current_gen {
                        continue;
                    }

                    warn!(generation = job_generation, error = %err, "preview render failed");

                    shared
                        .presenter_port
                        .present(RenderEvent::Error(FrameError {
                            generation: job_generation,
                            message: err.to_string(),
                        }));

                    shared
                        .last_completed_generation
                        .store(job_generation, Ordering::Release);
                }
            }
        }
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
