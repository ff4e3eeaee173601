//! Execution of resolved targets

mod dispatcher;

pub use dispatcher::{with_port_override, Dispatcher};
