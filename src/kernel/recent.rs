//! 最近使用文件（MRU）
//!
//! 条目只弱引用文件 id：文件删除后条目仍会留在列表里，
//! 直到下次 `Persistence::load` 时按现存 id 过滤。

use crate::models::FileId;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFileEntry {
    pub id: FileId,
    pub timestamp: u64,
    /// 加入列表时的文件名快照；改名不会同步更新。
    #[serde(rename = "name")]
    pub cached_name: String,
}

#[derive(Debug, Clone)]
pub struct RecentFiles {
    entries: Vec<RecentFileEntry>,
    limit: usize,
}

impl RecentFiles {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn with_entries(limit: usize, mut entries: Vec<RecentFileEntry>) -> Self {
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 移除旧条目后插到最前，并截断到上限。
    pub fn add(&mut self, id: FileId, name: &str, timestamp: u64) {
        self.entries.retain(|entry| entry.id != id);
        self.entries.insert(
            0,
            RecentFileEntry {
                id,
                timestamp,
                cached_name: name.to_string(),
            },
        );
        self.entries.truncate(self.limit);
    }

    /// 原样返回，不做存活过滤。
    pub fn entries(&self) -> &[RecentFileEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 只保留 id 仍存在的条目，返回被丢弃的数量。
    pub fn retain_existing(&mut self, live: &FxHashSet<FileId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| live.contains(&entry.id));
        before - self.entries.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/recent.rs"]
mod tests;
