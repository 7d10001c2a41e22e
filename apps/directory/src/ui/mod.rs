//! Terminal presentation surface: prompt parsing, screen rendering, and the UI loop.

pub mod app;
pub mod input;
pub mod render;

pub use app::DirectoryApp;
