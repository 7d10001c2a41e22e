//! Backend bridge: commands from the UI loop and the worker that runs them.

pub mod commands;
pub mod runtime;
