use super::parsing::{BlockKind, BlockShape, register_catalog_kinds};
use crate::block::{
    BUTTON_RANGE, Choice, EventHandler, MAX_MOVE_SECONDS, MAX_WAIT_SECONDS, Program, Root,
    Statement, ValueExpr, wrap_degrees,
};
use crate::error::LowerError;
use crate::program::{BlockDefinition, IntoDefinition, ProgramDefinition};
use ahash::AHashMap;
use serde_json::Value;

const DEFAULT_DIALOGUE: &str = "something";
const DEFAULT_SECONDS: i64 = 2;

/// Converts the editor's loose block tree into a typed `Program`.
///
/// Kinds are resolved through a registry so that front ends using different
/// block names can be mapped onto the catalog with `with_kind_alias`.
pub struct Lowerer {
    registry: AHashMap<String, BlockKind>,
}

pub struct LowererBuilder {
    registry: AHashMap<String, BlockKind>,
}

impl LowererBuilder {
    pub fn new() -> Self {
        let mut registry = AHashMap::new();
        register_catalog_kinds(&mut registry);
        Self { registry }
    }

    /// Lowers blocks named `user_kind` as the catalog kind `catalog_kind`.
    /// Unknown catalog names are ignored.
    pub fn with_kind_alias(mut self, user_kind: &str, catalog_kind: &str) -> Self {
        if let Some(kind) = BlockKind::from_name(catalog_kind) {
            self.registry.insert(user_kind.to_string(), kind);
        }
        self
    }

    pub fn build(self) -> Lowerer {
        Lowerer {
            registry: self.registry,
        }
    }
}

impl Default for LowererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Lowerer {
    fn default() -> Self {
        LowererBuilder::new().build()
    }
}

impl Lowerer {
    pub fn builder() -> LowererBuilder {
        LowererBuilder::new()
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Lowers every root of the definition, in order.
    pub fn lower(&self, definition: &ProgramDefinition) -> Result<Program, LowerError> {
        let roots = definition
            .roots
            .iter()
            .map(|block| self.lower_root(block))
            .collect::<Result<Vec<_>, _>>()?;
        let program = Program::new(roots);
        tracing::debug!(
            roots = program.roots.len(),
            statements = program.statement_count(),
            "lowered block tree"
        );
        Ok(program)
    }

    /// Converts editor data with `IntoDefinition` and lowers the result.
    pub fn lower_from<T: IntoDefinition>(
        &self,
        source: T,
    ) -> Result<Program, Box<dyn std::error::Error>> {
        let definition = source.into_definition()?;
        Ok(self.lower(&definition)?)
    }

    fn resolve_kind(&self, block: &BlockDefinition) -> Result<BlockKind, LowerError> {
        self.registry
            .get(&block.kind)
            .copied()
            .ok_or_else(|| LowerError::UnknownBlockKind {
                block_id: block.display_id(),
                kind: block.kind.clone(),
            })
    }

    fn lower_root(&self, block: &BlockDefinition) -> Result<Root, LowerError> {
        let kind = self.resolve_kind(block)?;
        match kind.shape() {
            BlockShape::Event => self.lower_event(block, kind).map(Root::Event),
            BlockShape::Value => self.lower_value(block).map(Root::Value),
            BlockShape::Statement => {
                let mut statements = Vec::new();
                self.lower_chain(block, &mut statements)?;
                Ok(Root::Sequence(statements))
            }
        }
    }

    fn lower_event(
        &self,
        block: &BlockDefinition,
        kind: BlockKind,
    ) -> Result<EventHandler, LowerError> {
        if block.next.is_some() {
            tracing::warn!(
                block_id = %block.display_id(),
                "event block has a next block attached, ignoring it"
            );
        }
        let fields = FieldReader::new(block);
        let commands = self.lower_body(block, "commands")?;
        match kind {
            BlockKind::EventStarted => Ok(EventHandler::Started { commands }),
            BlockKind::EventButton => {
                let button = fields.bounded(
                    "button_number",
                    *BUTTON_RANGE.start() as i64,
                    *BUTTON_RANGE.end() as i64,
                    *BUTTON_RANGE.start() as i64,
                )? as u8;
                Ok(EventHandler::Button { button, commands })
            }
            _ => Err(shape_mismatch(block, BlockShape::Event)),
        }
    }

    /// Follows `next` links from `head`, appending each block to `out`.
    fn lower_chain(
        &self,
        head: &BlockDefinition,
        out: &mut Vec<Statement>,
    ) -> Result<(), LowerError> {
        let mut cursor = Some(head);
        while let Some(block) = cursor {
            out.push(self.lower_statement(block)?);
            cursor = block.next.as_deref();
        }
        Ok(())
    }

    /// Lowers a statement input. A missing input is an empty body.
    fn lower_body(
        &self,
        block: &BlockDefinition,
        input: &str,
    ) -> Result<Vec<Statement>, LowerError> {
        let mut statements = Vec::new();
        if let Some(heads) = block.statements.get(input) {
            for head in heads {
                self.lower_chain(head, &mut statements)?;
            }
        }
        Ok(statements)
    }

    fn lower_statement(&self, block: &BlockDefinition) -> Result<Statement, LowerError> {
        let kind = self.resolve_kind(block)?;
        let fields = FieldReader::new(block);
        let statement = match kind {
            BlockKind::Say => Statement::Say {
                dialogue: fields.text("dialogue", DEFAULT_DIALOGUE),
            },
            BlockKind::Sync => Statement::Sync {
                commands: self.lower_body(block, "commands")?,
            },
            BlockKind::LightSet => Statement::LightSet {
                side: fields.choice("which_side")?,
                part: fields.choice("which_part")?,
                state: fields.choice("state")?,
            },
            BlockKind::Roll => Statement::Roll {
                direction: fields.choice("which_direction")?,
                seconds: fields.bounded("seconds", 0, MAX_MOVE_SECONDS as i64, DEFAULT_SECONDS)?
                    as u8,
            },
            BlockKind::Turn => Statement::Turn {
                direction: fields.choice("which_direction")?,
                seconds: fields.bounded("seconds", 0, MAX_MOVE_SECONDS as i64, DEFAULT_SECONDS)?
                    as u8,
            },
            BlockKind::MoveArm => Statement::MoveArm {
                arm: fields.choice("arm")?,
                angle: block
                    .inputs
                    .get("angle")
                    .map(|input| self.lower_value(input))
                    .transpose()?,
            },
            BlockKind::Wait => Statement::Wait {
                seconds: fields.bounded("seconds", 0, MAX_WAIT_SECONDS as i64, DEFAULT_SECONDS)?
                    as u8,
            },
            BlockKind::AngleInput
            | BlockKind::FixedAngleInput
            | BlockKind::EventStarted
            | BlockKind::EventButton => {
                return Err(shape_mismatch(block, BlockShape::Statement));
            }
        };
        Ok(statement)
    }

    fn lower_value(&self, block: &BlockDefinition) -> Result<ValueExpr, LowerError> {
        let kind = self.resolve_kind(block)?;
        let fields = FieldReader::new(block);
        match kind {
            BlockKind::AngleInput => Ok(ValueExpr::Angle(wrap_degrees(fields.number("angle", 0)?))),
            BlockKind::FixedAngleInput => Ok(ValueExpr::FixedAngle(fields.choice("angle")?)),
            _ => Err(shape_mismatch(block, BlockShape::Value)),
        }
    }
}

fn shape_mismatch(block: &BlockDefinition, expected: BlockShape) -> LowerError {
    LowerError::ShapeMismatch {
        block_id: block.display_id(),
        kind: block.kind.clone(),
        expected: expected.describe(),
    }
}

/// Reads typed field values off a block, falling back to the block's defaults.
struct FieldReader<'a> {
    block: &'a BlockDefinition,
}

impl<'a> FieldReader<'a> {
    fn new(block: &'a BlockDefinition) -> Self {
        Self { block }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.block.fields.get(field).filter(|v| !v.is_null())
    }

    fn text(&self, field: &str, default: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    fn choice<T: Choice>(&self, field: &str) -> Result<T, LowerError> {
        let raw = match self.get(field) {
            None => return Ok(T::default_choice()),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
                _ => n.to_string(),
            },
            Some(other) => other.to_string(),
        };
        T::from_choice(&raw).ok_or_else(|| LowerError::InvalidChoice {
            block_id: self.block.display_id(),
            field: field.to_string(),
            value: raw,
            expected: T::expected(),
        })
    }

    /// Reads an integer field, rounding fractional input.
    fn number(&self, field: &str, default: i64) -> Result<i64, LowerError> {
        let Some(value) = self.get(field) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if n.is_finite() => Ok(n.round() as i64),
            _ => Err(LowerError::InvalidNumber {
                block_id: self.block.display_id(),
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Reads an integer field and clamps it into `min..=max`.
    fn bounded(&self, field: &str, min: i64, max: i64, default: i64) -> Result<i64, LowerError> {
        Ok(self.number(field, default)?.clamp(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{FixedAngle, RollDirection, Side};
    use serde_json::json;

    fn lower_one(block: BlockDefinition) -> Result<Program, LowerError> {
        Lowerer::new().lower(&ProgramDefinition::new(vec![block]))
    }

    #[test]
    fn missing_fields_take_block_defaults() {
        let program = lower_one(BlockDefinition::new("roll")).unwrap();
        assert_eq!(
            program.roots,
            vec![Root::Sequence(vec![Statement::Roll {
                direction: RollDirection::Forward,
                seconds: 2,
            }])]
        );
    }

    #[test]
    fn numbers_are_clamped_and_rounded() {
        let head = BlockDefinition::chain(vec![
            BlockDefinition::new("wait").with_field("seconds", 75),
            BlockDefinition::new("wait").with_field("seconds", "2.4"),
            BlockDefinition::new("wait").with_field("seconds", -3),
        ])
        .unwrap();
        let program = lower_one(head).unwrap();
        assert_eq!(
            program.roots,
            vec![Root::Sequence(vec![
                Statement::Wait { seconds: 60 },
                Statement::Wait { seconds: 2 },
                Statement::Wait { seconds: 0 },
            ])]
        );

        let program = lower_one(BlockDefinition::new("turn").with_field("seconds", 2.6)).unwrap();
        assert!(matches!(
            program.roots[0],
            Root::Sequence(ref s) if s[0] == Statement::Turn {
                direction: crate::block::TurnDirection::Clockwise,
                seconds: 3,
            }
        ));
    }

    #[test]
    fn non_numeric_seconds_are_rejected() {
        let err = lower_one(
            BlockDefinition::new("wait")
                .with_id("w1")
                .with_field("seconds", "soon"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LowerError::InvalidNumber {
                block_id: "w1".to_string(),
                field: "seconds".to_string(),
                value: "\"soon\"".to_string(),
            }
        );
    }

    #[test]
    fn fixed_angle_accepts_numeric_field() {
        let program = lower_one(
            BlockDefinition::new("move_arm")
                .with_field("arm", "both")
                .with_input(
                    "angle",
                    BlockDefinition::new("fixed_angle_input").with_field("angle", json!(-90)),
                ),
        )
        .unwrap();
        assert_eq!(
            program.roots,
            vec![Root::Sequence(vec![Statement::MoveArm {
                arm: Side::Both,
                angle: Some(ValueExpr::FixedAngle(FixedAngle::Down)),
            }])]
        );
    }

    #[test]
    fn angle_input_wraps() {
        let program = lower_one(BlockDefinition::new("angle_input").with_field("angle", 270)).unwrap();
        assert_eq!(program.roots, vec![Root::Value(ValueExpr::Angle(-90))]);
    }

    #[test]
    fn button_number_is_clamped() {
        let program =
            lower_one(BlockDefinition::new("event_button").with_field("button_number", 9)).unwrap();
        assert_eq!(
            program.roots,
            vec![Root::Event(EventHandler::Button {
                button: 4,
                commands: vec![],
            })]
        );
    }

    #[test]
    fn statement_lists_and_next_chains_are_flattened() {
        let program = lower_one(BlockDefinition::new("sync").with_statements(
            "commands",
            vec![
                BlockDefinition::new("wait")
                    .with_field("seconds", 1)
                    .with_next(BlockDefinition::new("wait").with_field("seconds", 2)),
                BlockDefinition::new("wait").with_field("seconds", 3),
            ],
        ))
        .unwrap();
        let Root::Sequence(statements) = &program.roots[0] else {
            panic!("expected a sequence root");
        };
        assert_eq!(
            statements[0],
            Statement::Sync {
                commands: vec![
                    Statement::Wait { seconds: 1 },
                    Statement::Wait { seconds: 2 },
                    Statement::Wait { seconds: 3 },
                ],
            }
        );
    }
}
