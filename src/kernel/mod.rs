//! Headless core: file store and the views derived from it.

pub mod clock;
pub mod error;
pub mod hierarchy;
pub mod persistence;
pub mod recent;
pub mod search;
pub mod services;
pub mod store;

pub use error::StoreError;
pub use hierarchy::{group_by_folder, FolderEntry, FolderGroup, FolderView};
pub use persistence::{LoadOutcome, LoadedState, Persistence};
pub use recent::{RecentFileEntry, RecentFiles};
pub use search::{search, SearchHit};
pub use store::{
    FailedUpload, FileStore, StoreSnapshot, UploadError, UploadFailure, UploadReport,
};
