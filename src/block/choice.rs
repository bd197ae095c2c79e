use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of dropdown options for a block field.
///
/// The first entry of `OPTIONS` is the field's default, matching the option the
/// editor preselects when a block is dropped onto the canvas.
pub trait Choice: Sized + Copy + 'static {
    const OPTIONS: &'static [Self];

    /// The value emitted into the generated script and stored in the editor tree.
    fn as_str(&self) -> &'static str;

    fn from_choice(value: &str) -> Option<Self> {
        Self::OPTIONS.iter().copied().find(|o| o.as_str() == value)
    }

    fn default_choice() -> Self {
        Self::OPTIONS[0]
    }

    /// A comma separated listing of the accepted values, used in error messages.
    fn expected() -> String {
        Self::OPTIONS
            .iter()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Defines a dropdown enum together with its `Choice` and `Display` implementations.
macro_rules! define_choices {
    ( $( $(#[$meta:meta])* $name:ident { $( $variant:ident => $value:expr ),+ $(,)? } )* ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
            pub enum $name {
                $( $variant, )+
            }

            impl Choice for $name {
                const OPTIONS: &'static [Self] = &[ $( $name::$variant, )+ ];

                fn as_str(&self) -> &'static str {
                    match self {
                        $( $name::$variant => $value, )+
                    }
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

define_choices! {
    /// Which side of the robot a light or arm command addresses.
    Side { Left => "left", Right => "right", Both => "both" }

    /// The light fixture addressed by `light_set`.
    LightPart { Antenna => "antenna", Eye => "eye" }

    LightState { On => "on", Off => "off" }

    RollDirection { Forward => "forward", Backward => "backward" }

    TurnDirection { Clockwise => "clockwise", Counterclockwise => "counterclockwise" }

    /// Preset arm positions. The stored value is the angle in degrees.
    FixedAngle { Up => "90", Out => "0", Down => "-90" }
}

impl FixedAngle {
    pub fn degrees(&self) -> i32 {
        match self {
            FixedAngle::Up => 90,
            FixedAngle::Out => 0,
            FixedAngle::Down => -90,
        }
    }

    /// The label shown on the block in the editor.
    pub fn label(&self) -> &'static str {
        match self {
            FixedAngle::Up => "up",
            FixedAngle::Out => "out",
            FixedAngle::Down => "down",
        }
    }
}

/// Normalizes an angle into the half-open range `(-180, 180]`, the same way the
/// editor's angle picker wraps values entered past half a turn.
pub fn wrap_degrees(degrees: i64) -> i32 {
    let turned = degrees.rem_euclid(360);
    if turned > 180 {
        (turned - 360) as i32
    } else {
        turned as i32
    }
}
