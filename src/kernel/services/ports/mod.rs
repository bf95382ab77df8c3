//! Service ports: traits + data contracts.

pub mod notify;
pub mod settings;
pub mod storage;
pub mod upload;

pub use notify::{Notice, NoticeLevel, Notifier};
pub use settings::{LogSettings, RecentSettings, Settings, StorageSettings};
pub use storage::{KeyValueStorage, StorageError, StorageKeys};
pub use upload::{PendingUpload, ReadError, ReadFuture};
