use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The editor's view of one canvas: the serialized block tree, ready for lowering.
///
/// Maps are ordered so that serializing the same tree twice yields identical
/// text, which the workspace relies on to detect real changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramDefinition {
    #[serde(default)]
    pub roots: Vec<BlockDefinition>,
}

impl ProgramDefinition {
    pub fn new(roots: Vec<BlockDefinition>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// A single block instance as the editor framework stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Value inputs, each holding one plugged-in value block.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, BlockDefinition>,
    /// Statement inputs, each holding a nested sequence.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub statements: BTreeMap<String, Vec<BlockDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<BlockDefinition>>,
}

impl BlockDefinition {
    pub fn new(kind: &str) -> Self {
        Self {
            id: None,
            kind: kind.to_string(),
            fields: BTreeMap::new(),
            inputs: BTreeMap::new(),
            statements: BTreeMap::new(),
            next: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_input(mut self, name: &str, block: BlockDefinition) -> Self {
        self.inputs.insert(name.to_string(), block);
        self
    }

    pub fn with_statements(mut self, name: &str, blocks: Vec<BlockDefinition>) -> Self {
        self.statements.insert(name.to_string(), blocks);
        self
    }

    pub fn with_next(mut self, block: BlockDefinition) -> Self {
        self.next = Some(Box::new(block));
        self
    }

    /// The identifier used in error messages.
    pub fn display_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| "N/A".to_string())
    }

    /// Links a list of blocks through their `next` slots, returning the head.
    pub fn chain(blocks: Vec<BlockDefinition>) -> Option<BlockDefinition> {
        blocks.into_iter().rev().fold(None, |tail, mut block| {
            if let Some(tail) = tail {
                block.next = Some(Box::new(tail));
            }
            Some(block)
        })
    }
}
