//! 文件与最近列表的持久化
//!
//! 两个 JSON 键：文件数组 `{id, name, content, type}` 与最近列表
//! `{id, timestamp, name}`。
//!
//! 保存失败只记录日志并提示用户，不回滚内存状态；在下一次成功保存之前，
//! 内存与存储是不一致的。

use crate::kernel::recent::RecentFileEntry;
use crate::kernel::services::ports::{
    KeyValueStorage, Notice, Notifier, StorageError, StorageKeys,
};
use crate::models::virtual_path::validate_file_name;
use crate::models::{FileId, FileRecord, IdGenerator};
use rustc_hash::FxHashSet;

pub const STARTER_FILE_NAME: &str = "index.html";

pub const STARTER_FILE_CONTENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Playground</title>
</head>
<body>
  <h1>Hello, world!</h1>
</body>
</html>
"#;

#[derive(Debug)]
pub enum LoadOutcome {
    /// 从存储中恢复
    Restored,
    /// 存储为空，使用初始文档
    Seeded,
    /// 数据损坏，已重置为初始文档
    Recovered(StorageError),
}

#[derive(Debug)]
pub struct LoadedState {
    pub files: Vec<FileRecord>,
    pub recent: Vec<RecentFileEntry>,
    pub outcome: LoadOutcome,
}

pub struct Persistence {
    storage: Box<dyn KeyValueStorage>,
    notifier: Box<dyn Notifier>,
    keys: StorageKeys,
}

impl Persistence {
    pub fn new(
        storage: Box<dyn KeyValueStorage>,
        notifier: Box<dyn Notifier>,
        namespace: &str,
    ) -> Self {
        Self {
            storage,
            notifier,
            keys: StorageKeys::for_namespace(namespace),
        }
    }

    /// 先序列化两份数据，再依次写入。失败时记录并提示一次，不重试。
    pub fn save(
        &self,
        files: &[FileRecord],
        recent: &[RecentFileEntry],
    ) -> Result<(), StorageError> {
        let result = self.try_save(files, recent);
        if let Err(e) = &result {
            tracing::error!(error = %e, files = files.len(), "save failed");
            self.notifier
                .notify(Notice::error("Could not save your files", e.to_string()));
        }
        result
    }

    fn try_save(
        &self,
        files: &[FileRecord],
        recent: &[RecentFileEntry],
    ) -> Result<(), StorageError> {
        let files_json = serde_json::to_string(files)?;
        let recent_json = serde_json::to_string(recent)?;
        self.storage.set_item(&self.keys.files, &files_json)?;
        self.storage.set_item(&self.keys.recent, &recent_json)?;
        tracing::debug!(files = files.len(), recent = recent.len(), "saved");
        Ok(())
    }

    /// 读取失败或数据损坏时回到初始文档，而不是向上传播错误。
    pub fn load(&self, ids: &mut IdGenerator, now_millis: u64) -> LoadedState {
        let files = match self.read_json::<Vec<FileRecord>>(&self.keys.files) {
            Ok(Some(files)) => files,
            Ok(None) => {
                tracing::info!("no stored files, seeding starter document");
                return Self::seeded(ids, now_millis, LoadOutcome::Seeded);
            }
            Err(e) => {
                tracing::warn!(key = %self.keys.files, error = %e, "stored files unreadable, resetting");
                self.notifier.notify(Notice::warning(
                    "Saved files could not be read",
                    "Your workspace was reset to a starter document.",
                ));
                return Self::seeded(ids, now_millis, LoadOutcome::Recovered(e));
            }
        };

        let files = dedup_names(drop_invalid_names(files));
        for record in &files {
            ids.observe(record.id);
        }

        let mut recent = match self.read_json::<Vec<RecentFileEntry>>(&self.keys.recent) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = %self.keys.recent, error = %e, "recent files unreadable, dropping");
                Vec::new()
            }
        };

        let live: FxHashSet<FileId> = files.iter().map(|record| record.id).collect();
        let before = recent.len();
        recent.retain(|entry| live.contains(&entry.id));
        if recent.len() != before {
            tracing::debug!(dropped = before - recent.len(), "dropped stale recent entries");
        }

        LoadedState {
            files,
            recent,
            outcome: LoadOutcome::Restored,
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn seeded(ids: &mut IdGenerator, now_millis: u64, outcome: LoadOutcome) -> LoadedState {
        LoadedState {
            files: vec![starter_file(ids, now_millis)],
            recent: Vec::new(),
            outcome,
        }
    }
}

pub fn starter_file(ids: &mut IdGenerator, now_millis: u64) -> FileRecord {
    FileRecord::new(
        ids.next_id(now_millis),
        STARTER_FILE_NAME,
        STARTER_FILE_CONTENT,
    )
}

/// 不符合路径语法的记录无法再被改名或移动，加载时直接丢弃。
fn drop_invalid_names(files: Vec<FileRecord>) -> Vec<FileRecord> {
    files
        .into_iter()
        .filter(|record| match validate_file_name(&record.name) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = %record.id, error = %e, "dropped stored file with invalid name");
                false
            }
        })
        .collect()
}

/// 手工改过的存储可能出现重名；保留先出现的那条。
fn dedup_names(files: Vec<FileRecord>) -> Vec<FileRecord> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let total = files.len();
    let files: Vec<FileRecord> = files
        .into_iter()
        .filter(|record| seen.insert(record.name.clone()))
        .collect();
    if files.len() != total {
        tracing::warn!(dropped = total - files.len(), "dropped duplicate stored names");
    }
    files
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/persistence.rs"]
mod tests;
