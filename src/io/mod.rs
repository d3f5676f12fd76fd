mod json;

pub use json::{
    GroupDocument, MeshDocument, ObjectDocument, SceneDocument, read_scene, write_scene,
};

/// Scene document I/O errors.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),
    /// Error bubbled up from `serde_json` while reading or writing a document.
    Json(serde_json::Error),

    MalformedInput(String),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            Json(error) => write!(f, "Could not process scene document: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::Json(error) => Some(error),
            IoError::MalformedInput(_) => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<crate::errors::HostError> for IoError {
    fn from(value: crate::errors::HostError) -> Self {
        Self::MalformedInput(value.to_string())
    }
}
