//! 应用数据目录
//!
//! 跨平台路径：
//! - macOS: ~/Library/Application Support/zplay
//! - Linux: $XDG_DATA_HOME/zplay 或 ~/.local/share/zplay
//! - Windows: %APPDATA%\zplay

use std::path::PathBuf;

const APP_NAME: &str = "zplay";
const STORAGE_DIR: &str = "storage";
const LOG_DIR: &str = "logs";
const SETTINGS_FILE: &str = "settings.json";

fn get_app_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_NAME)
        })
    }

    #[cfg(target_os = "linux")]
    {
        // 优先使用 XDG_DATA_HOME
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            Some(PathBuf::from(xdg).join(APP_NAME))
        } else {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
        }
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

pub fn get_storage_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(STORAGE_DIR))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(SETTINGS_FILE))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {what} directory"),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn ensure_storage_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_storage_dir(), "storage")
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
