use crate::error::AgentError;
use std::path::{Path, PathBuf};

/// A local file read on behalf of a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    pub file_name: String,
    /// Lowercase extension, empty when the file name has none.
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Removes whitespace and any `"` or `'` wrapping a spreadsheet path cell.
pub fn strip_wrapping_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Final path component, splitting on both separator styles.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

pub fn file_extension(path: &str) -> String {
    let name = base_name(path);
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Reads the file named by `raw`.
///
/// When `root` is set the canonical target has to live under the canonical
/// root; relative paths are taken relative to it. Without a root any readable
/// path is served.
pub async fn resolve_local_file(raw: &str, root: Option<&Path>) -> Result<LocalFile, AgentError> {
    let cleaned = strip_wrapping_quotes(raw);
    if cleaned.is_empty() {
        return Err(AgentError::Validation("File path is required".to_string()));
    }

    let target = match root {
        Some(root) => confine(Path::new(cleaned), root).await?,
        None => PathBuf::from(cleaned),
    };

    let metadata = tokio::fs::metadata(&target)
        .await
        .map_err(|e| AgentError::NotFound(format!("{cleaned}: {e}")))?;
    if !metadata.is_file() {
        return Err(AgentError::NotFound(format!("{cleaned}: not a regular file")));
    }

    let bytes = tokio::fs::read(&target)
        .await
        .map_err(|e| AgentError::NotFound(format!("{cleaned}: {e}")))?;

    Ok(LocalFile {
        file_name: base_name(cleaned).to_string(),
        extension: file_extension(cleaned),
        bytes,
    })
}

async fn confine(path: &Path, root: &Path) -> Result<PathBuf, AgentError> {
    let root = tokio::fs::canonicalize(root)
        .await
        .map_err(|e| AgentError::NotFound(format!("{}: {e}", root.display())))?;
    let target = tokio::fs::canonicalize(root.join(path))
        .await
        .map_err(|e| AgentError::NotFound(format!("{}: {e}", path.display())))?;

    if !target.starts_with(&root) {
        log::warn!("refused {path:?}: outside {root:?}");
        return Err(AgentError::NotFound(format!(
            "{}: outside the allowed root",
            path.display()
        )));
    }
    Ok(target)
}
