//! Port conflict handling
//!
//! [`extract_port`] reads the port a script intends to use; [`PortResolver`]
//! probes it and, when it is taken, lets the user pick an alternative, kill
//! the owning process, or carry on.

mod extract;
mod kill;
mod probe;
mod resolver;

pub use extract::extract_port;
pub use kill::{KillOutcome, Platform, PortKiller};
pub use probe::{PortProbe, ScriptedPortProbe, TcpPortProbe};
pub use resolver::PortResolver;
