use super::{FixedAngle, LightPart, LightState, RollDirection, Side, TurnDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Upper bound of the `seconds` field on `roll` and `turn`.
pub const MAX_MOVE_SECONDS: u8 = 20;
/// Upper bound of the `seconds` field on `wait`.
pub const MAX_WAIT_SECONDS: u8 = 60;
/// Controller buttons available to `event_button`.
pub const BUTTON_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

/// A statement block. Each variant generates one line, or a header with an
/// indented nested sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statement {
    Say {
        dialogue: String,
    },
    Sync {
        commands: Vec<Statement>,
    },
    LightSet {
        side: Side,
        part: LightPart,
        state: LightState,
    },
    Roll {
        direction: RollDirection,
        seconds: u8,
    },
    Turn {
        direction: TurnDirection,
        seconds: u8,
    },
    MoveArm {
        arm: Side,
        angle: Option<ValueExpr>,
    },
    Wait {
        seconds: u8,
    },
}

/// A value block, pluggable into a value input. Both variants are Degree-typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueExpr {
    Angle(i32),
    FixedAngle(FixedAngle),
}

impl ValueExpr {
    /// The numeric value the expression evaluates to.
    pub fn degrees(&self) -> i32 {
        match self {
            ValueExpr::Angle(d) => *d,
            ValueExpr::FixedAngle(f) => f.degrees(),
        }
    }
}

/// A handler registration root. Its body runs when the event fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventHandler {
    Started { commands: Vec<Statement> },
    Button { button: u8, commands: Vec<Statement> },
}

impl EventHandler {
    pub fn commands(&self) -> &[Statement] {
        match self {
            EventHandler::Started { commands } | EventHandler::Button { commands, .. } => commands,
        }
    }
}

/// A top-level entry of a program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Root {
    /// A plain statement chain, run top to bottom.
    Sequence(Vec<Statement>),
    Event(EventHandler),
    /// A value block left unattached on the canvas.
    Value(ValueExpr),
}

/// A typed program: the ordered roots of one editor canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Program {
    pub roots: Vec<Root>,
}

impl Program {
    pub fn new(roots: Vec<Root>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Collects the button numbers that have a handler registered.
    pub fn bound_buttons(&self) -> BTreeSet<u8> {
        self.roots
            .iter()
            .filter_map(|root| match root {
                Root::Event(EventHandler::Button { button, .. }) => Some(*button),
                _ => None,
            })
            .collect()
    }

    /// Counts statements across all roots, including nested ones.
    pub fn statement_count(&self) -> usize {
        self.roots
            .iter()
            .map(|root| match root {
                Root::Sequence(statements) => count_statements(statements),
                Root::Event(handler) => count_statements(handler.commands()),
                Root::Value(_) => 0,
            })
            .sum()
    }
}

fn count_statements(statements: &[Statement]) -> usize {
    statements
        .iter()
        .map(|s| match s {
            Statement::Sync { commands } => 1 + count_statements(commands),
            _ => 1,
        })
        .sum()
}
