use super::{EventHandler, Program, Root, Statement, ValueExpr};
use std::fmt;

/// A wrapper to display a program as a block tree.
/// Used by the CLI to inspect what the lowering pass produced.
pub struct DisplayProgram<'a> {
    pub program: &'a Program,
}

impl<'a> fmt::Display for DisplayProgram<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "program")?;
        let count = self.program.roots.len();
        for (i, root) in self.program.roots.iter().enumerate() {
            self.fmt_root(root, f, "", i + 1 == count)?;
        }
        Ok(())
    }
}

impl<'a> DisplayProgram<'a> {
    fn fmt_root(
        &self,
        root: &Root,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        Self::write_marker(f, prefix, is_last)?;
        let child_prefix = Self::child_prefix(prefix, is_last);
        match root {
            Root::Sequence(statements) => {
                writeln!(f, "sequence")?;
                self.fmt_sequence(statements, f, &child_prefix)
            }
            Root::Event(EventHandler::Started { commands }) => {
                writeln!(f, "event_started")?;
                self.fmt_sequence(commands, f, &child_prefix)
            }
            Root::Event(EventHandler::Button { button, commands }) => {
                writeln!(f, "event_button [{}]", button)?;
                self.fmt_sequence(commands, f, &child_prefix)
            }
            Root::Value(value) => writeln!(f, "{}", Self::describe_value(value)),
        }
    }

    fn fmt_sequence(
        &self,
        statements: &[Statement],
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
    ) -> fmt::Result {
        let count = statements.len();
        for (i, statement) in statements.iter().enumerate() {
            self.fmt_statement(statement, f, prefix, i + 1 == count)?;
        }
        Ok(())
    }

    fn fmt_statement(
        &self,
        statement: &Statement,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        Self::write_marker(f, prefix, is_last)?;
        let child_prefix = Self::child_prefix(prefix, is_last);
        match statement {
            Statement::Say { dialogue } => writeln!(f, "say {:?}", dialogue),
            Statement::Sync { commands } => {
                writeln!(f, "sync")?;
                self.fmt_sequence(commands, f, &child_prefix)
            }
            Statement::LightSet { side, part, state } => {
                writeln!(f, "light_set [{} {} {}]", side, part, state)
            }
            Statement::Roll { direction, seconds } => {
                writeln!(f, "roll [{} {}s]", direction, seconds)
            }
            Statement::Turn { direction, seconds } => {
                writeln!(f, "turn [{} {}s]", direction, seconds)
            }
            Statement::MoveArm { arm, angle } => {
                writeln!(f, "move_arm [{}]", arm)?;
                Self::write_marker(f, &child_prefix, true)?;
                match angle {
                    Some(value) => writeln!(f, "{}", Self::describe_value(value)),
                    None => writeln!(f, "<empty>"),
                }
            }
            Statement::Wait { seconds } => writeln!(f, "wait [{}s]", seconds),
        }
    }

    fn describe_value(value: &ValueExpr) -> String {
        match value {
            ValueExpr::Angle(d) => format!("angle_input: {}", d),
            ValueExpr::FixedAngle(fixed) => {
                format!("fixed_angle_input: {} ({})", fixed.degrees(), fixed.label())
            }
        }
    }

    /// Writes the indentation and branch marker in front of a node.
    fn write_marker(f: &mut fmt::Formatter<'_>, prefix: &str, is_last: bool) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)
    }

    /// The prefix for the children of a node drawn with `write_marker`.
    fn child_prefix(prefix: &str, is_last: bool) -> String {
        format!("{}{}", prefix, if is_last { "    " } else { "│   " })
    }
}
