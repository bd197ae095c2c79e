//! # botblocks - Block Program Generation for a Visual Robot Editor
//!
//! **botblocks** is the core of a block-based robot editor. Users snap command
//! blocks together on a canvas (movement, lights, speech, waits, event triggers);
//! this crate turns the resulting block tree into a script for the robot
//! runtime and manages the five named program slots the editor saves to.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Block Tree**: The editor hands over a `ProgramDefinition`, the
//!     serialized tree of loosely typed blocks (kinds and fields keyed by name).
//! 2.  **Lower**: A `Lowerer` resolves every block against the catalog, applies
//!     field defaults and ranges, and produces a typed `Program`.
//! 3.  **Generate**: A `Generator` walks the `Program` and emits the script text.
//! 4.  **Run or Save**: Submit the script through an `ExecutionControl`, or keep
//!     editing through a `WorkspaceController`, which autosaves into slots.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botblocks::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // When the program starts: say "hello", then raise both arms.
//!     let definition = ProgramDefinition::new(vec![
//!         BlockDefinition::new("event_started").with_statements(
//!             "commands",
//!             vec![BlockDefinition::new("say")
//!                 .with_field("dialogue", "hello")
//!                 .with_next(
//!                     BlockDefinition::new("move_arm")
//!                         .with_field("arm", "both")
//!                         .with_input(
//!                             "angle",
//!                             BlockDefinition::new("fixed_angle_input").with_field("angle", "90"),
//!                         ),
//!                 )],
//!         ),
//!     ]);
//!
//!     let program = Lowerer::new().lower(&definition)?;
//!     let script = Generator::new().generate(&program);
//!
//!     assert_eq!(
//!         script,
//!         "@robot.when_started\ndef started():\n    robot.say(\"hello\")\n    robot.move_arm('both', 90)\n"
//!     );
//!     Ok(())
//! }
//! ```

pub mod block;
pub mod codegen;
pub mod config;
pub mod error;
pub mod prelude;
pub mod program;
pub mod remote;
pub mod workspace;
