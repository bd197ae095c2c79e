use ahash::AHashMap;

/// How a block connects to its neighbours on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// Chainable through `next`, placed inside sequences.
    Statement,
    /// Plugged into a value input. Produces an expression.
    Value,
    /// Hat block: only valid as a root.
    Event,
}

impl BlockShape {
    pub(super) fn describe(&self) -> &'static str {
        match self {
            BlockShape::Statement => "a statement",
            BlockShape::Value => "a value input",
            BlockShape::Event => "an event root",
        }
    }
}

/// Master macro to define the block catalog, its lookup, and its registration.
macro_rules! define_block_kinds {
    ( $( ($variant:ident, $name:literal, $shape:ident) ),* $(,)? ) => {
        /// Every block kind the editor offers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BlockKind {
            $( $variant, )*
        }

        impl BlockKind {
            pub const ALL: &'static [BlockKind] = &[ $( BlockKind::$variant, )* ];

            /// The kind's name as stored in the editor tree.
            pub fn name(&self) -> &'static str {
                match self {
                    $( BlockKind::$variant => $name, )*
                }
            }

            pub fn shape(&self) -> BlockShape {
                match self {
                    $( BlockKind::$variant => BlockShape::$shape, )*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(BlockKind::$variant), )*
                    _ => None,
                }
            }
        }

        pub(super) fn register_catalog_kinds(registry: &mut AHashMap<String, BlockKind>) {
            $( registry.insert($name.to_string(), BlockKind::$variant); )*
        }
    };
}

define_block_kinds! {
    // Statements
    (Say, "say", Statement),
    (Sync, "sync", Statement),
    (LightSet, "light_set", Statement),
    (Roll, "roll", Statement),
    (Turn, "turn", Statement),
    (MoveArm, "move_arm", Statement),
    (Wait, "wait", Statement),

    // Values
    (AngleInput, "angle_input", Value),
    (FixedAngleInput, "fixed_angle_input", Value),

    // Events
    (EventStarted, "event_started", Event),
    (EventButton, "event_button", Event),
}
