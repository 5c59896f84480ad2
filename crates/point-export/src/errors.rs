use std::path::PathBuf;

/// Errors while writing or reading run outputs.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mesh '{name}' has no triangles")]
    EmptyMesh { name: String },

    #[error("mesh '{name}' is invalid: {reason}")]
    InvalidMesh { name: String, reason: String },

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("summary serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
