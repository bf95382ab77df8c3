//! 文件存储：扁平文件列表 + 当前文件指针
//!
//! 所有修改都经由 `FileStore` 的方法，修改后立即持久化。
//! 不变量：
//! - 文件名互不相同（大小写敏感）
//! - `current` 为 `None` 或指向有效下标

mod folders;
mod upload;

pub use upload::{is_supported_upload, FailedUpload, UploadError, UploadFailure, UploadReport};

use crate::kernel::clock::unix_time_ms_now;
use crate::kernel::error::StoreError;
use crate::kernel::hierarchy::{group_by_folder, FolderView};
use crate::kernel::persistence::{LoadOutcome, Persistence};
use crate::kernel::recent::{RecentFileEntry, RecentFiles};
use crate::kernel::search::{search, SearchHit};
use crate::models::virtual_path::{
    basename, copy_name, join, validate_file_name, validate_folder_name,
};
use crate::models::{FileId, FileRecord, IdGenerator};

/// 给标签栏/预览的只读快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSnapshot<'a> {
    pub files: &'a [FileRecord],
    pub current_index: Option<usize>,
}

pub struct FileStore {
    files: Vec<FileRecord>,
    current: Option<usize>,
    recent: RecentFiles,
    ids: IdGenerator,
    persistence: Persistence,
    storage_in_sync: bool,
    last_load: LoadOutcome,
}

impl FileStore {
    /// 从存储加载；没有数据或数据损坏时得到只含初始文档的存储。
    pub fn open(persistence: Persistence, recent_limit: usize) -> Self {
        let mut store = Self {
            files: Vec::new(),
            current: None,
            recent: RecentFiles::new(recent_limit),
            ids: IdGenerator::new(),
            persistence,
            storage_in_sync: true,
            last_load: LoadOutcome::Seeded,
        };
        store.reload();
        store
    }

    /// 重新从存储加载，丢弃内存状态。最近列表中的失效条目只在这里被清理。
    pub fn reload(&mut self) {
        let loaded = self.persistence.load(&mut self.ids, unix_time_ms_now());
        self.files = loaded.files;
        self.current = if self.files.is_empty() { None } else { Some(0) };
        self.recent = RecentFiles::with_entries(self.recent.limit(), loaded.recent);
        self.storage_in_sync = true;
        self.last_load = loaded.outcome;
        tracing::info!(files = self.files.len(), outcome = ?self.last_load, "store loaded");
    }

    pub fn last_load(&self) -> &LoadOutcome {
        &self.last_load
    }

    /// 最近一次保存是否成功；失败后内存与存储不一致，直到下次保存成功。
    pub fn is_storage_in_sync(&self) -> bool {
        self.storage_in_sync
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            files: &self.files,
            current_index: self.current,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&FileRecord> {
        self.current.and_then(|idx| self.files.get(idx))
    }

    pub fn get(&self, id: FileId) -> Option<&FileRecord> {
        self.files.iter().find(|record| record.id == id)
    }

    pub fn index_of(&self, id: FileId) -> Option<usize> {
        self.files.iter().position(|record| record.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FileRecord> {
        self.files.iter().find(|record| record.name == name)
    }

    pub fn group_by_folder(&self) -> FolderView<'_> {
        group_by_folder(&self.files)
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        search(query, &self.files)
    }

    pub fn create_file(
        &mut self,
        name: &str,
        content: impl Into<String>,
    ) -> Result<FileId, StoreError> {
        validate_file_name(name)?;
        self.ensure_unique(name, None)?;

        let id = self.push_record(name, content.into());
        self.current = Some(self.files.len() - 1);
        tracing::debug!(%id, name, "file created");
        self.persist();
        Ok(id)
    }

    pub fn set_current_by_index(&mut self, index: usize) -> Result<(), StoreError> {
        let Some(record) = self.files.get(index) else {
            return Err(StoreError::IndexOutOfBounds {
                index,
                len: self.files.len(),
            });
        };
        self.recent
            .add(record.id, &record.name, unix_time_ms_now());
        self.current = Some(index);
        self.persist();
        Ok(())
    }

    pub fn set_current_by_id(&mut self, id: FileId) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.set_current_by_index(index)
    }

    pub fn update_content(
        &mut self,
        id: FileId,
        content: impl Into<String>,
    ) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.files[index].content = content.into();
        self.persist();
        Ok(())
    }

    /// 编辑器入口：写入当前文件
    pub fn update_current_content(&mut self, content: impl Into<String>) -> Result<(), StoreError> {
        let id = self.current().ok_or(StoreError::NoCurrentFile)?.id;
        self.update_content(id, content)
    }

    /// `new_name` 是完整虚拟路径，可以带文件夹前缀。
    /// 最近列表中缓存的名字不会随之更新。
    pub fn rename(&mut self, id: FileId, new_name: &str) -> Result<(), StoreError> {
        let index = self.position(id)?;
        validate_file_name(new_name)?;
        self.apply_name(index, new_name)
    }

    /// 移到 `target` 文件夹，`None` 表示根目录；保留 basename。
    pub fn move_file(&mut self, id: FileId, target: Option<&str>) -> Result<(), StoreError> {
        let index = self.position(id)?;
        if let Some(folder) = target {
            validate_folder_name(folder)?;
        }
        let new_name = join(target, basename(&self.files[index].name));
        validate_file_name(&new_name)?;
        self.apply_name(index, &new_name)
    }

    /// 副本名在扩展名前插入 `_copy`；重名时直接失败，由调用方决定如何重试。
    pub fn duplicate_file(&mut self, id: FileId) -> Result<FileId, StoreError> {
        let index = self.position(id)?;
        let new_name = copy_name(&self.files[index].name);
        validate_file_name(&new_name)?;
        self.ensure_unique(&new_name, None)?;

        let content = self.files[index].content.clone();
        let copy = self.push_record(&new_name, content);
        self.current = Some(self.files.len() - 1);
        tracing::debug!(source = %id, %copy, name = %new_name, "file duplicated");
        self.persist();
        Ok(copy)
    }

    pub fn delete_file(&mut self, id: FileId) -> Result<FileRecord, StoreError> {
        let index = self.position(id)?;
        let removed = self.remove_at(index);
        tracing::debug!(%id, name = %removed.name, current = ?self.current, "file deleted");
        self.persist();
        Ok(removed)
    }

    /// 原样返回，可能包含已删除文件的条目（下次加载时才清理）。
    pub fn recent_files(&self) -> &[RecentFileEntry] {
        self.recent.entries()
    }

    /// 用实时记录解析最近条目，文件已删除时返回 `None`。
    pub fn resolve_recent(&self, entry: &RecentFileEntry) -> Option<&FileRecord> {
        self.get(entry.id)
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
        self.persist();
    }

    fn position(&self, id: FileId) -> Result<usize, StoreError> {
        self.index_of(id).ok_or(StoreError::NotFound(id))
    }

    fn ensure_unique(&self, name: &str, except: Option<FileId>) -> Result<(), StoreError> {
        let taken = self
            .files
            .iter()
            .any(|record| record.name == name && Some(record.id) != except);
        if taken {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn apply_name(&mut self, index: usize, new_name: &str) -> Result<(), StoreError> {
        let id = self.files[index].id;
        if self.files[index].name == new_name {
            return Ok(());
        }
        self.ensure_unique(new_name, Some(id))?;

        let old_name = std::mem::take(&mut self.files[index].name);
        self.files[index].set_name(new_name.to_string());
        tracing::debug!(%id, from = %old_name, to = new_name, "file renamed");
        self.persist();
        Ok(())
    }

    fn push_record(&mut self, name: &str, content: String) -> FileId {
        let id = self.ids.next_id(unix_time_ms_now());
        self.files.push(FileRecord::new(id, name, content));
        id
    }

    /// 删除后修正当前指针：
    /// 空 -> None；越界 -> 末尾；删的是当前且下标 > 0 -> 前移一位；否则不变。
    fn remove_at(&mut self, index: usize) -> FileRecord {
        let removed = self.files.remove(index);
        let len = self.files.len();
        self.current = match self.current {
            _ if len == 0 => None,
            Some(cur) if cur >= len => Some(len - 1),
            Some(cur) if cur == index && index > 0 => Some(cur - 1),
            other => other,
        };
        removed
    }

    fn persist(&mut self) {
        self.storage_in_sync = self
            .persistence
            .save(&self.files, self.recent.entries())
            .is_ok();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
