use crate::models::{FileId, NameError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateName(String),
    InvalidName(NameError),
    NotFound(FileId),
    IndexOutOfBounds { index: usize, len: usize },
    NoCurrentFile,
    FolderNotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateName(name) => write!(f, "a file named {:?} already exists", name),
            StoreError::InvalidName(e) => write!(f, "invalid name: {}", e),
            StoreError::NotFound(id) => write!(f, "no file with id {}", id),
            StoreError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for {} files", index, len)
            }
            StoreError::NoCurrentFile => write!(f, "no file is open"),
            StoreError::FolderNotFound(name) => write!(f, "folder {:?} does not exist", name),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::InvalidName(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NameError> for StoreError {
    fn from(e: NameError) -> Self {
        StoreError::InvalidName(e)
    }
}
