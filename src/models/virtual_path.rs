//! 虚拟路径语法
//!
//! 文件名形如 `src/app/main.js`：`/` 分隔，不以 `/` 开头或结尾，每段非空。
//! 没有真实目录对象，文件夹只是名字前缀。

use std::fmt;

/// 空文件夹的占位文件名
pub const PLACEHOLDER_NAME: &str = ".keep";

const COPY_SUFFIX: &str = "_copy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameErrorReason {
    Empty,
    LeadingSlash,
    TrailingSlash,
    EmptySegment,
    RelativeSegment,
    IllegalChar(char),
    MissingExtension,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameError {
    pub name: String,
    pub reason: NameErrorReason,
}

impl NameError {
    fn new(name: &str, reason: NameErrorReason) -> Self {
        Self {
            name: name.to_string(),
            reason,
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            NameErrorReason::Empty => write!(f, "name is empty"),
            NameErrorReason::LeadingSlash => write!(f, "{:?} must not start with '/'", self.name),
            NameErrorReason::TrailingSlash => write!(f, "{:?} must not end with '/'", self.name),
            NameErrorReason::EmptySegment => {
                write!(f, "{:?} contains an empty path segment", self.name)
            }
            NameErrorReason::RelativeSegment => {
                write!(f, "{:?} contains a '.' or '..' segment", self.name)
            }
            NameErrorReason::IllegalChar(ch) => {
                write!(f, "{:?} contains illegal character {:?}", self.name, ch)
            }
            NameErrorReason::MissingExtension => {
                write!(f, "{:?} needs a file extension", self.name)
            }
        }
    }
}

impl std::error::Error for NameError {}

fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/')
}

fn check_path(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::new(name, NameErrorReason::Empty));
    }
    if let Some(ch) = name.chars().find(|&ch| !is_allowed_char(ch)) {
        return Err(NameError::new(name, NameErrorReason::IllegalChar(ch)));
    }
    if name.starts_with('/') {
        return Err(NameError::new(name, NameErrorReason::LeadingSlash));
    }
    if name.ends_with('/') {
        return Err(NameError::new(name, NameErrorReason::TrailingSlash));
    }
    for segment in name.split('/') {
        match segment {
            "" => return Err(NameError::new(name, NameErrorReason::EmptySegment)),
            "." | ".." => return Err(NameError::new(name, NameErrorReason::RelativeSegment)),
            _ => {}
        }
    }
    Ok(())
}

/// 校验完整文件名（含扩展名要求）。
pub fn validate_file_name(name: &str) -> Result<(), NameError> {
    check_path(name)?;
    let base = basename(name);
    if !base.contains('.') || base.ends_with('.') {
        return Err(NameError::new(name, NameErrorReason::MissingExtension));
    }
    Ok(())
}

/// 校验文件夹路径；文件夹不需要扩展名。
pub fn validate_folder_name(name: &str) -> Result<(), NameError> {
    check_path(name)
}

pub fn basename(name: &str) -> &str {
    match name.rfind('/') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

/// 直接父文件夹（最后一个 `/` 之前）。
pub fn parent(name: &str) -> Option<&str> {
    name.rfind('/').map(|idx| &name[..idx])
}

/// 按第一个 `/` 切分为 (顶层文件夹, 相对路径)。
pub fn split_top(name: &str) -> Option<(&str, &str)> {
    name.split_once('/')
}

/// basename 的扩展名；`.keep` 这类点开头的名字没有扩展名。
pub fn extension(name: &str) -> Option<&str> {
    let base = basename(name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

pub fn join(folder: Option<&str>, base: &str) -> String {
    match folder {
        Some(folder) if !folder.is_empty() => format!("{folder}/{base}"),
        _ => base.to_string(),
    }
}

/// `a/b.txt` -> `a/b_copy.txt`
pub fn copy_name(name: &str) -> String {
    let folder = parent(name);
    let base = basename(name);
    let copied = match base.rfind('.') {
        Some(idx) if idx > 0 => format!("{}{}{}", &base[..idx], COPY_SUFFIX, &base[idx..]),
        _ => format!("{base}{COPY_SUFFIX}"),
    };
    join(folder, &copied)
}

pub fn placeholder_path(folder: &str) -> String {
    join(Some(folder), PLACEHOLDER_NAME)
}

pub fn is_placeholder(name: &str) -> bool {
    basename(name) == PLACEHOLDER_NAME
}

/// `name` 是否等于 `folder` 或位于其下。
pub fn is_within(name: &str, folder: &str) -> bool {
    name.strip_prefix(folder)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// 把 `old_folder` 前缀替换为 `new_folder`；不在其下时返回 `None`。
pub fn reparent(name: &str, old_folder: &str, new_folder: &str) -> Option<String> {
    let rest = name.strip_prefix(old_folder)?;
    if rest.is_empty() {
        return Some(new_folder.to_string());
    }
    rest.strip_prefix('/')
        .map(|rest| format!("{new_folder}/{rest}"))
}

#[cfg(test)]
#[path = "../../tests/unit/models/virtual_path.rs"]
mod tests;
