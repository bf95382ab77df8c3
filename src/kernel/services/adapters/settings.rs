use super::paths::get_settings_path;
use crate::kernel::services::ports::settings::Settings;
use std::path::{Path, PathBuf};

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    write_default_settings(&path)?;
    Ok(path)
}

/// 文件不存在时写入默认配置。
pub fn write_default_settings(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
    }
    Ok(())
}

pub fn load_settings() -> Option<Settings> {
    load_settings_from(&get_settings_path()?)
}

/// 缺失或无法解析时返回 `None`，调用方回退到默认值。
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Settings>(&data) {
        Ok(mut settings) => {
            if settings.recent.limit == 0 {
                tracing::warn!(path = %path.display(), "recent.limit must be at least 1, using 1");
                settings.recent.limit = 1;
            }
            Some(settings)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings file unreadable");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
