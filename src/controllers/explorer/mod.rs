//! The interactive explorer session: reads actions from an input port,
//! keeps the navigation state and hands renders and exports to the other
//! controllers.

pub mod action;
pub mod ports;
mod session;

pub use session::ExplorerSession;
