//! Progress reporting for launch operations

mod console;
mod handler;

pub use console::ConsoleHandler;
pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler, RecordingHandler};
