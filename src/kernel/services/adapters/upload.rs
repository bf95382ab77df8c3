//! 本地磁盘作为上传来源
//!
//! 目录遍历用 ignore crate（关闭 gitignore 等标准过滤，上传要看到全部文件），
//! 读取交给 tokio::fs，在上传批次中并发执行。

use crate::kernel::services::ports::{PendingUpload, ReadError};
use ignore::WalkBuilder;
use std::io;
use std::path::{Component, Path};

/// 系统生成的杂项文件与依赖目录，不参与上传
pub fn should_skip(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store"
            | ".Spotlight-V100"
            | ".Trashes"
            | ".fseventsd"
            | ".TemporaryItems"
            | "Thumbs.db"
            | "desktop.ini"
            | ".git"
            | "node_modules"
    )
}

/// 把目录下所有文件变成待上传项；虚拟路径以目录自身的名字开头。
pub fn collect_folder_uploads(dir: &Path) -> io::Result<Vec<PendingUpload>> {
    let dir = dir.canonicalize()?;
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", dir.display()),
        ));
    }
    let folder = dir
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "cannot upload a root directory"))?;

    let walker = WalkBuilder::new(&dir)
        .standard_filters(false)
        .filter_entry(|entry| !should_skip(&entry.file_name().to_string_lossy()))
        .build();

    let mut uploads = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skip unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let abs = entry.into_path();
        let Ok(relative) = abs.strip_prefix(&dir) else {
            continue;
        };
        let virtual_path = to_virtual_path(&folder, relative);
        uploads.push(PendingUpload::new(virtual_path, async move {
            tokio::fs::read_to_string(&abs)
                .await
                .map_err(|e| ReadError::new(format!("{}: {}", abs.display(), e)))
        }));
    }

    Ok(uploads)
}

fn to_virtual_path(folder: &str, relative: &Path) -> String {
    let mut out = folder.to_string();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            out.push('/');
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/upload.rs"]
mod tests;
