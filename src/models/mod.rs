//! 数据模型层

pub mod file_record;
pub mod virtual_path;

pub use file_record::{FileId, FileKind, FileRecord, IdGenerator, ParseFileIdError};
pub use virtual_path::{NameError, NameErrorReason, PLACEHOLDER_NAME};
