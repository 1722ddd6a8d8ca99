//! Input adapters for the fractal explorer.
//!
//! They read keys and prompt answers from the terminal and translate them
//! into explorer actions.

pub mod terminal;
