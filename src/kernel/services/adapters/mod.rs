//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod notify;
pub mod paths;
pub mod settings;
pub mod storage;
pub mod upload;

pub use notify::{ChannelNotifier, TracingNotifier};
pub use paths::{ensure_log_dir, ensure_storage_dir, get_log_dir, get_settings_path, get_storage_dir};
pub use settings::{ensure_settings_file, load_settings, load_settings_from, write_default_settings};
pub use storage::{DirStorage, MemoryStorage};
pub use upload::{collect_folder_uploads, should_skip};
