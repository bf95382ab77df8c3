//! 持久化存储契约：字符串键值对，语义接近浏览器的 localStorage。

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StorageError {
    QuotaExceeded { key: String, limit: usize },
    Io { key: String, source: io::Error },
    Serialize(serde_json::Error),
    Corrupt { key: String, source: serde_json::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QuotaExceeded { key, limit } => {
                write!(f, "storage quota of {} bytes exceeded writing {}", limit, key)
            }
            StorageError::Io { key, source } => write!(f, "storage io error on {}: {}", key, source),
            StorageError::Serialize(e) => write!(f, "serialize failed: {}", e),
            StorageError::Corrupt { key, source } => {
                write!(f, "stored data under {} is corrupt: {}", key, source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::QuotaExceeded { .. } => None,
            StorageError::Io { source, .. } => Some(source),
            StorageError::Serialize(e) => Some(e),
            StorageError::Corrupt { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e)
    }
}

/// 同步键值存储。
///
/// 调用方是单线程事件循环，实现自行处理内部可变性。
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// 命名空间下的两个存储键。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub files: String,
    pub recent: String,
}

impl StorageKeys {
    pub fn for_namespace(namespace: &str) -> Self {
        Self {
            files: format!("{namespace}.files"),
            recent: format!("{namespace}.recent_files"),
        }
    }
}
