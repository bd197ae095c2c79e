use crate::block::{EventHandler, Program, Root, Statement};
use itertools::Itertools;

mod lowering;
pub mod parsing;
pub mod precedence;

pub use lowering::{Lowerer, LowererBuilder};
pub use parsing::{BlockKind, BlockShape};

use precedence::{ATOMIC, value_to_expr};

/// The statement emitted for an empty body.
pub const NO_OP: &str = "pass";
/// Substituted for a `move_arm` whose angle input is empty.
const EMPTY_ANGLE: &str = "0";

/// What a single statement contributes to the script.
enum Emit<'a> {
    Line(String),
    /// A header line followed by an indented body.
    Block(String, &'a [Statement]),
}

/// Generates robot script text from a typed `Program`.
///
/// Generation is a pure function of the program: it never fails and produces
/// byte-identical output for identical input.
#[derive(Debug, Clone)]
pub struct Generator {
    indent: String,
}

pub struct GeneratorBuilder {
    indent: String,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }

    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    pub fn with_indent_width(self, width: usize) -> Self {
        let indent = " ".repeat(width);
        self.with_indent(&indent)
    }

    pub fn build(self) -> Generator {
        Generator {
            indent: self.indent,
        }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Generator {
    fn default() -> Self {
        GeneratorBuilder::new().build()
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Generates the whole program. Roots are separated by a blank line.
    pub fn generate(&self, program: &Program) -> String {
        let script = program
            .roots
            .iter()
            .map(|root| self.root_to_code(root))
            .join("\n");
        tracing::trace!(
            roots = program.roots.len(),
            bytes = script.len(),
            "generated script"
        );
        script
    }

    /// Generates a single statement at the top level, including any nested body.
    pub fn statement_to_code(&self, statement: &Statement) -> String {
        let mut out = String::new();
        self.write_statement(&mut out, statement, 0);
        out
    }

    fn root_to_code(&self, root: &Root) -> String {
        let mut out = String::new();
        match root {
            Root::Sequence(statements) => self.write_sequence(&mut out, statements, 0),
            Root::Event(handler) => {
                let (decorator, signature) = match handler {
                    EventHandler::Started { .. } => {
                        ("@robot.when_started".to_string(), "def started():")
                    }
                    EventHandler::Button { button, .. } => (
                        format!("@robot.when_button_pressed({})", button),
                        "def button():",
                    ),
                };
                self.write_line(&mut out, 0, &decorator);
                self.write_line(&mut out, 0, signature);
                self.write_body(&mut out, handler.commands(), 1);
            }
            // A detached value is emitted as a bare expression line.
            Root::Value(value) => self.write_line(&mut out, 0, &value_to_expr(value).code),
        }
        out
    }

    fn write_sequence(&self, out: &mut String, statements: &[Statement], depth: usize) {
        for statement in statements {
            self.write_statement(out, statement, depth);
        }
    }

    fn write_body(&self, out: &mut String, statements: &[Statement], depth: usize) {
        if statements.is_empty() {
            self.write_line(out, depth, NO_OP);
        } else {
            self.write_sequence(out, statements, depth);
        }
    }

    fn write_statement(&self, out: &mut String, statement: &Statement, depth: usize) {
        match Self::emit(statement) {
            Emit::Line(line) => self.write_line(out, depth, &line),
            Emit::Block(header, body) => {
                self.write_line(out, depth, &header);
                self.write_body(out, body, depth + 1);
            }
        }
    }

    /// The generation table: one arm per statement kind.
    fn emit(statement: &Statement) -> Emit<'_> {
        match statement {
            Statement::Say { dialogue } => {
                Emit::Line(format!("robot.say(\"{}\")", escape_dialogue(dialogue)))
            }
            Statement::Sync { commands } => {
                Emit::Block("with robot.in_sync():".to_string(), commands)
            }
            Statement::LightSet { side, part, state } => Emit::Line(format!(
                "robot.set_{}_state('{}', '{}')",
                part, side, state
            )),
            Statement::Roll { direction, seconds } => {
                Emit::Line(format!("robot.roll('{}', {})", direction, seconds))
            }
            Statement::Turn { direction, seconds } => {
                Emit::Line(format!("robot.turn('{}', {})", direction, seconds))
            }
            Statement::MoveArm { arm, angle } => {
                let angle = angle
                    .as_ref()
                    .map(|value| value_to_expr(value).in_position(ATOMIC))
                    .unwrap_or_else(|| EMPTY_ANGLE.to_string());
                Emit::Line(format!("robot.move_arm('{}', {})", arm, angle))
            }
            Statement::Wait { seconds } => Emit::Line(format!("robot.wait({})", seconds)),
        }
    }

    fn write_line(&self, out: &mut String, depth: usize, line: &str) {
        for _ in 0..depth {
            out.push_str(&self.indent);
        }
        out.push_str(line);
        out.push('\n');
    }
}

/// Escapes text for a double-quoted string literal. Plain text passes through unchanged.
fn escape_dialogue(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
