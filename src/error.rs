use thiserror::Error;

use crate::face::DieColor;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown deck instance `{0}` (expected Oathsworn or Encounter)")]
    UnknownInstance(String),
    #[error("unknown die color `{0}` (expected White, Yellow, Red or Black)")]
    UnknownColor(String),
    #[error("invalid face `{0}`")]
    InvalidFace(String),
    #[error("invalid catalog entry for {color}: {reason}")]
    InvalidCatalog { color: DieColor, reason: &'static str },
    #[error("invalid session command on line {line}: {reason}")]
    InvalidCommand { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
