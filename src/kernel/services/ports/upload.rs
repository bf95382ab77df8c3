//! 批量上传契约
//!
//! 每个文件的读取是独立的异步任务；读取来源（浏览器 File API、本地磁盘……）
//! 由适配器提供。

use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type ReadFuture = Pin<Box<dyn Future<Output = Result<String, ReadError>> + Send + 'static>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub message: String,
}

impl ReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read failed: {}", self.message)
    }
}

impl std::error::Error for ReadError {}

/// 待读取的上传文件：目标虚拟路径 + 尚未开始的读取。
pub struct PendingUpload {
    pub path: String,
    pub read: ReadFuture,
}

impl PendingUpload {
    pub fn new<F>(path: impl Into<String>, read: F) -> Self
    where
        F: Future<Output = Result<String, ReadError>> + Send + 'static,
    {
        Self {
            path: path.into(),
            read: Box::pin(read),
        }
    }

    pub fn ready(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self::new(path, async move { Ok(content) })
    }
}

impl fmt::Debug for PendingUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingUpload")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
