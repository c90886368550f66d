//! Inbound adapters that drive the customer views from a terminal.
//!
//! The command runner lives under [`cli`]; [`render`] turns view state into
//! text and [`terminal`] supplies the interactive ports (navigation and
//! confirmation) the views need.

pub mod cli;
pub mod render;
pub mod terminal;
