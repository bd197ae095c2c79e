use thiserror::Error;

/// Errors that can occur while lowering an editor block tree into a typed program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("Block '{block_id}' has an unregistered or invalid block kind: '{kind}'")]
    UnknownBlockKind { block_id: String, kind: String },

    #[error(
        "Field '{field}' of block '{block_id}' has invalid choice '{value}', expected one of: {expected}"
    )]
    InvalidChoice {
        block_id: String,
        field: String,
        value: String,
        expected: String,
    },

    #[error("Field '{field}' of block '{block_id}' is not a number: '{value}'")]
    InvalidNumber {
        block_id: String,
        field: String,
        value: String,
    },

    #[error("Block '{block_id}' of kind '{kind}' cannot be used as {expected}")]
    ShapeMismatch {
        block_id: String,
        kind: String,
        expected: &'static str,
    },
}

/// Errors that can occur when converting editor data into a `ProgramDefinition`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Failed to parse block tree JSON: {0}")]
    InvalidJson(String),

    #[error("Failed to encode block tree: {0}")]
    Encode(String),
}

/// Errors raised by the HTTP clients for the slot store and the executor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("Request to '{endpoint}' failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Request to '{endpoint}' returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Response from '{endpoint}' could not be decoded: {message}")]
    Decode { endpoint: String, message: String },
}

/// Errors raised by the workspace controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkspaceError {
    #[error("Slot {index} ('{name}') holds unreadable program data: {source}")]
    CorruptSlot {
        index: usize,
        name: String,
        #[source]
        source: ConversionError,
    },

    #[error("Failed to serialize the active program: {0}")]
    Serialize(ConversionError),

    #[error(transparent)]
    Lower(#[from] LowerError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors that can occur while saving or loading a program artifact.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactError {
    #[error("Could not access artifact file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to encode artifact: {0}")]
    Encode(String),

    #[error("Failed to decode artifact: {0}")]
    Decode(String),

    #[error("Artifact format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Errors that can occur while loading settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Could not read settings file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid settings: {0}")]
    Parse(String),
}
