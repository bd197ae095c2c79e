pub mod controller;
pub mod slot;

pub use controller::WorkspaceController;
pub use slot::*;

/// Change notifications emitted by the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    BlockCreate,
    BlockDelete,
    BlockChange,
    BlockMove,
    /// View-only interaction: selection, scrolling, zooming, toolbox clicks.
    Ui,
    /// The editor finished populating the canvas from stored data.
    FinishedLoading,
}

impl ChangeEvent {
    /// Whether the event can alter the serialized tree and should trigger autosave.
    pub fn is_structural(&self) -> bool {
        !matches!(self, ChangeEvent::Ui | ChangeEvent::FinishedLoading)
    }
}
