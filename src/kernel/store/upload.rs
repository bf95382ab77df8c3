//! 文件夹批量上传
//!
//! 每个文件的读取作为独立任务放进 `JoinSet`，全部结束后汇总。
//! 读取按路径字典序发起，但完成顺序不定，记录落入存储的顺序也不定。
//! 至少导入一个文件即视为成功。

use super::FileStore;
use crate::kernel::services::ports::{PendingUpload, ReadError};
use crate::models::virtual_path::{extension, validate_file_name};
use crate::models::{FileId, FileKind, NameError};
use rustc_hash::FxHashSet;
use std::fmt;
use tokio::task::JoinSet;

/// 扩展名在类型表中的文件才会被上传
pub fn is_supported_upload(path: &str) -> bool {
    extension(path).and_then(FileKind::from_extension).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    Read(ReadError),
    InvalidName(NameError),
    /// 与已有文件重名；不覆盖也不自动改名
    DuplicateName,
    /// 读取任务在完成前被取消或 panic
    Aborted,
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFailure::Read(e) => write!(f, "{}", e),
            UploadFailure::InvalidName(e) => write!(f, "invalid name: {}", e),
            UploadFailure::DuplicateName => write!(f, "a file with this name already exists"),
            UploadFailure::Aborted => write!(f, "read was aborted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpload {
    pub path: String,
    pub reason: UploadFailure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// 按完成顺序
    pub imported: Vec<FileId>,
    pub failed_files: Vec<FailedUpload>,
    /// 扩展名不受支持、未参与读取的路径
    pub skipped: Vec<String>,
}

impl UploadReport {
    pub fn succeeded(&self) -> usize {
        self.imported.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed_files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    NoSupportedFiles { skipped: Vec<String> },
    NothingImported(UploadReport),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NoSupportedFiles { skipped } => {
                write!(f, "no supported files to upload ({} skipped)", skipped.len())
            }
            UploadError::NothingImported(report) => {
                write!(f, "all {} files failed to upload", report.failed_count())
            }
        }
    }
}

impl std::error::Error for UploadError {}

impl FileStore {
    /// 需要在 tokio 运行时中调用。批次结束后只保存一次。
    pub async fn upload_folder(
        &mut self,
        uploads: Vec<PendingUpload>,
    ) -> Result<UploadReport, UploadError> {
        let (mut supported, unsupported): (Vec<_>, Vec<_>) = uploads
            .into_iter()
            .partition(|upload| is_supported_upload(&upload.path));

        let mut report = UploadReport {
            skipped: unsupported.into_iter().map(|upload| upload.path).collect(),
            ..UploadReport::default()
        };
        if supported.is_empty() {
            return Err(UploadError::NoSupportedFiles {
                skipped: report.skipped,
            });
        }

        supported.sort_by(|a, b| a.path.cmp(&b.path));
        // 同一路径可能出现多次，按槽位跟踪未完成的读取
        let mut paths = Vec::with_capacity(supported.len());
        let mut tasks = JoinSet::new();
        for (slot, PendingUpload { path, read }) in supported.into_iter().enumerate() {
            paths.push(path);
            tasks.spawn(async move { (slot, read.await) });
        }
        let mut unsettled: FxHashSet<usize> = (0..paths.len()).collect();

        while let Some(joined) = tasks.join_next().await {
            let (slot, result) = match joined {
                Ok(settled) => settled,
                Err(e) => {
                    tracing::warn!(error = %e, "upload read task did not complete");
                    continue;
                }
            };
            unsettled.remove(&slot);
            let path = paths[slot].clone();

            let outcome = match result {
                Ok(content) => self.import_uploaded(&path, content),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "upload read failed");
                    Err(UploadFailure::Read(e))
                }
            };
            match outcome {
                Ok(id) => report.imported.push(id),
                Err(reason) => report.failed_files.push(FailedUpload { path, reason }),
            }
        }

        let mut aborted: Vec<usize> = unsettled.into_iter().collect();
        aborted.sort_unstable();
        report
            .failed_files
            .extend(aborted.into_iter().map(|slot| FailedUpload {
                path: paths[slot].clone(),
                reason: UploadFailure::Aborted,
            }));

        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed_count(),
            skipped = report.skipped.len(),
            "folder upload finished"
        );

        if report.imported.is_empty() {
            return Err(UploadError::NothingImported(report));
        }

        if self.current.is_none() {
            self.current = self.index_of(report.imported[0]);
        }
        self.persist();
        Ok(report)
    }

    fn import_uploaded(&mut self, path: &str, content: String) -> Result<FileId, UploadFailure> {
        validate_file_name(path).map_err(UploadFailure::InvalidName)?;
        if self.find_by_name(path).is_some() {
            return Err(UploadFailure::DuplicateName);
        }
        Ok(self.push_record(path, content))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/store/upload.rs"]
mod tests;
