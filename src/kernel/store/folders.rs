//! 文件夹操作
//!
//! 文件夹不是独立对象：名字等于 `folder` 或以 `folder/` 开头的记录存在时，
//! 文件夹即存在。空文件夹靠 `folder/.keep` 占位文件维持可见。

use super::FileStore;
use crate::kernel::error::StoreError;
use crate::kernel::hierarchy::folder_paths;
use crate::models::virtual_path::{
    is_within, placeholder_path, reparent, validate_file_name, validate_folder_name,
};
use crate::models::FileId;
use rustc_hash::FxHashSet;

impl FileStore {
    pub fn folder_exists(&self, name: &str) -> bool {
        self.files.iter().any(|record| is_within(&record.name, name))
    }

    /// 可作为移动目标的文件夹路径
    pub fn folder_names(&self) -> Vec<&str> {
        folder_paths(&self.files)
    }

    /// 创建占位文件；不改变当前文件。
    pub fn create_folder(&mut self, name: &str) -> Result<FileId, StoreError> {
        validate_folder_name(name)?;
        if self.folder_exists(name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let path = placeholder_path(name);
        validate_file_name(&path)?;
        let id = self.push_record(&path, String::new());
        tracing::debug!(%id, folder = name, "folder created");
        self.persist();
        Ok(id)
    }

    /// 删除文件夹下的全部记录，逐条按删除规则修正当前指针。返回删除数量。
    pub fn delete_folder(&mut self, name: &str) -> Result<usize, StoreError> {
        let indices = self.indices_under(name);
        if indices.is_empty() {
            return Err(StoreError::FolderNotFound(name.to_string()));
        }

        for &index in indices.iter().rev() {
            self.remove_at(index);
        }
        tracing::debug!(folder = name, removed = indices.len(), current = ?self.current, "folder deleted");
        self.persist();
        Ok(indices.len())
    }

    /// 整体改名：先校验全部新名字与冲突，任何一条失败都不做修改。
    pub fn rename_folder(&mut self, old: &str, new: &str) -> Result<usize, StoreError> {
        validate_folder_name(new)?;
        let indices = self.indices_under(old);
        if indices.is_empty() {
            return Err(StoreError::FolderNotFound(old.to_string()));
        }
        if old == new {
            return Ok(0);
        }

        let moving: FxHashSet<usize> = indices.iter().copied().collect();
        let mut renames = Vec::with_capacity(indices.len());
        for &index in &indices {
            let name = &self.files[index].name;
            let Some(new_name) = reparent(name, old, new) else {
                continue;
            };
            validate_file_name(&new_name)?;
            let clash = self
                .files
                .iter()
                .enumerate()
                .any(|(i, record)| !moving.contains(&i) && record.name == new_name);
            if clash {
                return Err(StoreError::DuplicateName(new_name));
            }
            renames.push((index, new_name));
        }

        let count = renames.len();
        for (index, new_name) in renames {
            self.files[index].set_name(new_name);
        }
        tracing::debug!(from = old, to = new, renamed = count, "folder renamed");
        self.persist();
        Ok(count)
    }

    fn indices_under(&self, folder: &str) -> Vec<usize> {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                record
                    .name
                    .strip_prefix(folder)
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/store/folders.rs"]
mod tests;
