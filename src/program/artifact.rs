use crate::block::Program;
use crate::codegen::Generator;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Version written in front of every artifact. Bump when the layout of
/// `Program` changes so old files are rejected instead of misread.
pub const ARTIFACT_VERSION: u32 = 1;

/// A lowered program together with the script generated from it.
///
/// Artifacts let a generated script be shipped to the executor later without
/// keeping the editor tree around.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgramArtifact {
    pub name: String,
    pub program: Program,
    pub script: String,
}

impl ProgramArtifact {
    pub fn new(name: &str, program: Program, script: String) -> Self {
        Self {
            name: name.to_string(),
            program,
            script,
        }
    }

    /// Generates the script for `program` and bundles both.
    pub fn from_program(name: &str, program: Program, generator: &Generator) -> Self {
        let script = generator.generate(&program);
        Self::new(name, program, script)
    }

    /// Encodes the version header followed by the artifact body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        let encode = |e: bincode::error::EncodeError| ArtifactError::Encode(e.to_string());
        let mut bytes = encode_to_vec(ARTIFACT_VERSION, standard()).map_err(encode)?;
        bytes.extend(encode_to_vec(self, standard()).map_err(encode)?);
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let decode = |e: bincode::error::DecodeError| ArtifactError::Decode(e.to_string());
        let (version, header_len): (u32, usize) =
            decode_from_slice(bytes, standard()).map_err(decode)?;
        if version != ARTIFACT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: version,
                expected: ARTIFACT_VERSION,
            });
        }
        let (artifact, _) = decode_from_slice(&bytes[header_len..], standard()).map_err(decode)?;
        Ok(artifact)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved program artifact");
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ArtifactError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }
}
