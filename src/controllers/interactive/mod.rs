//! Background rendering for the interactive explorer.
//!
//! The session submits a [`RenderRequest`] after every command. A single
//! worker renders the newest request and cancels any render that a newer
//! request has superseded, so holding a key never queues up stale frames.
//!
//! # Architecture
//!
//! - **Input**: `RenderRequest` snapshots of the navigation state
//! - **Output**: `InteractiveControllerPresenterPort` receiving frames and errors
//! - **Core**: the preview pipeline from `core::actions::render`

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;
