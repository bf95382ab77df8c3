//! 由扁平文件列表推导文件夹视图
//!
//! 只按第一个 `/` 分组一层；组内保留完整的相对路径用于展示。
//! 每次调用都重新计算，结果借用输入，不要跨修改保存。

use crate::models::virtual_path::{is_placeholder, split_top};
use crate::models::FileRecord;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry<'a> {
    pub record: &'a FileRecord,
    pub relative_path: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroup<'a> {
    pub name: &'a str,
    pub entries: Vec<FolderEntry<'a>>,
}

impl<'a> FolderGroup<'a> {
    /// 只含占位文件的文件夹
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderView<'a> {
    pub root_files: Vec<&'a FileRecord>,
    /// 按首次出现的顺序
    pub folders: Vec<FolderGroup<'a>>,
}

impl<'a> FolderView<'a> {
    pub fn folder(&self, name: &str) -> Option<&FolderGroup<'a>> {
        self.folders.iter().find(|group| group.name == name)
    }

    pub fn folder_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.folders.iter().map(|group| group.name)
    }

    pub fn file_count(&self) -> usize {
        self.root_files.len()
            + self
                .folders
                .iter()
                .map(|group| group.entries.len())
                .sum::<usize>()
    }
}

pub fn group_by_folder(records: &[FileRecord]) -> FolderView<'_> {
    let mut view = FolderView::default();
    let mut slot_by_name: FxHashMap<&str, usize> = FxHashMap::default();

    for record in records {
        let Some((folder, relative_path)) = split_top(&record.name) else {
            if !record.is_placeholder() {
                view.root_files.push(record);
            }
            continue;
        };

        let slot = *slot_by_name.entry(folder).or_insert_with(|| {
            view.folders.push(FolderGroup {
                name: folder,
                entries: Vec::new(),
            });
            view.folders.len() - 1
        });

        // 占位文件只让文件夹可见，本身不展示
        if is_placeholder(relative_path) {
            continue;
        }
        view.folders[slot].entries.push(FolderEntry {
            record,
            relative_path,
        });
    }

    view
}

/// 所有可作为移动目标的文件夹路径（含嵌套层级），按字典序去重。
pub fn folder_paths(records: &[FileRecord]) -> Vec<&str> {
    let mut paths: Vec<&str> = Vec::new();
    for record in records {
        let name = record.name.as_str();
        for (idx, ch) in name.char_indices() {
            if ch == '/' {
                paths.push(&name[..idx]);
            }
        }
    }
    paths.sort_unstable();
    paths.dedup();
    paths
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/hierarchy.rs"]
mod tests;
