use super::definition::{BlockDefinition, ProgramDefinition};
use crate::error::ConversionError;
use serde::Deserialize;

/// A trait for editor-side data that can be converted into a `ProgramDefinition`.
///
/// This is the extension point for feeding block trees from other editor
/// front ends into the lowering pass. The serialized slot text and plain block
/// lists implement it out of the box.
///
/// # Example
///
/// ```rust,no_run
/// use botblocks::prelude::*;
/// use botblocks::error::ConversionError;
///
/// // A front end that only knows about a flat list of waits.
/// struct WaitList { seconds: Vec<u8> }
///
/// impl IntoDefinition for WaitList {
///     fn into_definition(self) -> std::result::Result<ProgramDefinition, ConversionError> {
///         let blocks = self
///             .seconds
///             .into_iter()
///             .map(|s| BlockDefinition::new("wait").with_field("seconds", s))
///             .collect();
///         Ok(ProgramDefinition::new(BlockDefinition::chain(blocks).into_iter().collect()))
///     }
/// }
/// ```
pub trait IntoDefinition {
    /// Consumes the object and converts it into an editor block tree.
    fn into_definition(self) -> Result<ProgramDefinition, ConversionError>;
}

impl IntoDefinition for ProgramDefinition {
    fn into_definition(self) -> Result<ProgramDefinition, ConversionError> {
        Ok(self)
    }
}

impl IntoDefinition for Vec<BlockDefinition> {
    fn into_definition(self) -> Result<ProgramDefinition, ConversionError> {
        Ok(ProgramDefinition::new(self))
    }
}

/// Serialized slot text. Blank text is an empty canvas.
impl IntoDefinition for &str {
    fn into_definition(self) -> Result<ProgramDefinition, ConversionError> {
        decode_definition(self)
    }
}

/// Parses slot text into a block tree. Blank text is an empty canvas.
///
/// Every `next` link and nested body adds a level of JSON nesting, so long
/// chains exceed serde_json's default depth limit. The limit is lifted and the
/// stack grows on demand instead.
pub fn decode_definition(text: &str) -> Result<ProgramDefinition, ConversionError> {
    if text.trim().is_empty() {
        return Ok(ProgramDefinition::default());
    }
    let invalid = |e: serde_json::Error| ConversionError::InvalidJson(e.to_string());
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let definition =
        ProgramDefinition::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .map_err(invalid)?;
    deserializer.end().map_err(invalid)?;
    Ok(definition)
}

/// Serializes a block tree into slot text. An empty canvas becomes blank text,
/// so untouched slots keep their initial empty data.
pub fn encode_definition(definition: &ProgramDefinition) -> Result<String, ConversionError> {
    if definition.is_empty() {
        return Ok(String::new());
    }
    serde_json::to_string(definition).map_err(|e| ConversionError::Encode(e.to_string()))
}
