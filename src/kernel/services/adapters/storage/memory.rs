//! 内存存储
//!
//! 克隆共享同一份数据，便于在重新加载前后观察同一个“磁盘”。
//! 可选的字节配额用于模拟浏览器存储写满。

use crate::kernel::services::ports::{KeyValueStorage, StorageError};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<FxHashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有键和值的字节总数不超过 `limit`。
    pub fn with_quota(limit: usize) -> Self {
        Self {
            items: Rc::default(),
            quota: Some(limit),
        }
    }

    /// 共享数据，替换配额
    pub fn with_shared_quota(&self, limit: Option<usize>) -> Self {
        Self {
            items: Rc::clone(&self.items),
            quota: limit,
        }
    }

    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let existing = self
                .items
                .borrow()
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - existing + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/storage/memory.rs"]
mod tests;
