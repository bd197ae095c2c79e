pub mod choice;
pub mod display;
pub mod node;

pub use choice::*;
pub use display::*;
pub use node::*;
