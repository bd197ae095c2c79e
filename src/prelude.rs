//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the botblocks crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use botblocks::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/program.json")?;
//! let program = Lowerer::new().lower_from(json.as_str())?;
//! println!("{}", Generator::new().generate(&program));
//! # Ok(())
//! # }
//! ```

// Lowering and generation
pub use crate::codegen::{BlockKind, Generator, Lowerer};

// Typed block model
pub use crate::block::{
    Choice, DisplayProgram, EventHandler, FixedAngle, LightPart, LightState, Program,
    RollDirection, Root, Side, Statement, TurnDirection, ValueExpr,
};

// Editor-side block tree
pub use crate::program::{BlockDefinition, IntoDefinition, ProgramArtifact, ProgramDefinition};

// Slots and remote services
pub use crate::remote::{ExecutionControl, MemorySlotStore, SlotStore};
pub use crate::workspace::{ChangeEvent, SLOT_COUNT, Slot, WorkspaceController};

pub use crate::config::Settings;

// Error types
pub use crate::error::{ConversionError, LowerError, RemoteError, WorkspaceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
