use crate::batch::state::BatchState;
use crate::error::AgentError;
use std::fmt;
use std::path::Path;

/// A named payload sent to the agent's upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// A file picked by the user and shipped as-is after the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Artifact {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, AgentError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Artifact::new(file_name, bytes))
    }
}

/// Input of one batch. Setting `archive` enables the companion archive
/// upload.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub sheet: Artifact,
    pub archive: Option<Artifact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Archive,
    Spreadsheet,
}

impl ArtifactKind {
    /// Object name used when the original file name sanitizes to nothing.
    pub fn fallback_name(self) -> &'static str {
        match self {
            ArtifactKind::Archive => "archive.zip",
            ArtifactKind::Spreadsheet => "spreadsheet.xlsx",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Archive => write!(f, "archive"),
            ArtifactKind::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub object_name: String,
    pub error: Option<String>,
}

/// Final outcome of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub state: BatchState,
    pub artifacts: Vec<ArtifactOutcome>,
}

impl BatchReport {
    pub fn failed_artifacts(&self) -> usize {
        self.artifacts.iter().filter(|a| a.error.is_some()).count()
    }
}
