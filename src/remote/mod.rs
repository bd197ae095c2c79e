//! Clients for the editor server: the slot store and the program executor.
//!
//! Both services are external. The traits here are the seams the workspace
//! controller and the CLI talk to; `http` holds the blocking HTTP clients and
//! `memory` an in-process slot store.

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

#[cfg(feature = "http")]
pub use http::{HttpExecutor, HttpSlotStore};
pub use memory::MemorySlotStore;

use crate::error::RemoteError;
use crate::workspace::Slot;
use serde::Serialize;

/// Path of the slot list resource.
pub const SLOTS_PATH: &str = "/api/slots";
/// Path of the program execution resource.
pub const PROGRAM_PATH: &str = "/api/program";

/// Persistence for the slot list. Reads and writes always cover every slot.
pub trait SlotStore {
    fn fetch_all(&self) -> Result<Vec<Slot>, RemoteError>;
    fn store_all(&mut self, slots: &[Slot]) -> Result<(), RemoteError>;
}

/// Start and stop control over the robot's program executor.
pub trait ExecutionControl {
    /// Submits a generated script for execution.
    fn start(&self, script: &str) -> Result<(), RemoteError>;
    fn stop(&self) -> Result<(), RemoteError>;
}

/// Body of a request to the program resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProgramRequest<'a> {
    Start { program: &'a str },
    Stop { stop: bool },
}

impl<'a> ProgramRequest<'a> {
    pub fn start(script: &'a str) -> Self {
        ProgramRequest::Start { program: script }
    }

    pub fn stop() -> Self {
        ProgramRequest::Stop { stop: true }
    }
}
