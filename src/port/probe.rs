use anyhow::{anyhow, bail, Context, Result};
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, TcpListener};
use std::sync::Mutex;
use tracing::trace;

/// Asks the OS which port is free.
pub trait PortProbe {
    /// First port at or above `port` that can be bound.
    fn available_from(&self, port: u16) -> Result<u16>;
}

/// Addresses a dev server commonly listens on. A port counts as busy when
/// any of them is taken.
const PROBE_HOSTS: [IpAddr; 4] = [
    IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    IpAddr::V4(Ipv4Addr::LOCALHOST),
    IpAddr::V6(Ipv6Addr::LOCALHOST),
];

/// Probes by binding a listener on each wildcard and loopback address.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpPortProbe;

impl TcpPortProbe {
    pub fn new() -> Self {
        Self
    }

    fn is_free(port: u16) -> Result<bool> {
        for host in PROBE_HOSTS {
            match TcpListener::bind((host, port)) {
                Ok(_) => {}
                Err(e) if matches!(e.kind(), ErrorKind::AddrInUse | ErrorKind::PermissionDenied) => {
                    trace!("Port {} is busy on {}: {}", port, host, e);
                    return Ok(false);
                }
                // hosts without IPv6 cannot bind these at all
                Err(e) if host.is_ipv6() => {
                    trace!("Skipping {} for port {}: {}", host, port, e);
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to probe port {} on {}", port, host));
                }
            }
        }
        Ok(true)
    }
}

impl PortProbe for TcpPortProbe {
    fn available_from(&self, port: u16) -> Result<u16> {
        for candidate in port..=u16::MAX {
            if Self::is_free(candidate)? {
                return Ok(candidate);
            }
        }
        bail!("No free port at or above {}", port)
    }
}

/// Replays queued answers; once the queue is empty every port is free.
#[derive(Debug, Default)]
pub struct ScriptedPortProbe {
    answers: Mutex<VecDeque<Result<u16, String>>>,
    probed: Mutex<Vec<u16>>,
}

impl ScriptedPortProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: impl IntoIterator<Item = Result<u16, String>>) -> Self {
        let probe = Self::new();
        probe.answers.lock().unwrap().extend(answers);
        probe
    }

    /// Ports passed to `available_from`, in order
    pub fn probed(&self) -> Vec<u16> {
        self.probed.lock().unwrap().clone()
    }
}

impl PortProbe for ScriptedPortProbe {
    fn available_from(&self, port: u16) -> Result<u16> {
        self.probed.lock().unwrap().push(port);
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(free)) => Ok(free),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(port),
        }
    }
}
