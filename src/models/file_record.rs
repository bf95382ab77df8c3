//! 文件记录数据模型
//!
//! 存储中的每个文件都是一条扁平记录，`name` 是虚拟路径（可含 `/`）。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 文件 id：`(墙钟毫秒, 单调计数)`，即使时钟重合也保证唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId {
    millis: u64,
    seq: u32,
}

impl FileId {
    pub fn new(millis: u64, seq: u32) -> Self {
        Self { millis, seq }
    }

    pub fn millis(self) -> u64 {
        self.millis
    }

    pub fn seq(self) -> u32 {
        self.seq
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFileIdError(String);

impl fmt::Display for ParseFileIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid file id: {:?}", self.0)
    }
}

impl std::error::Error for ParseFileIdError {}

impl FromStr for FileId {
    type Err = ParseFileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFileIdError(s.to_string());
        let (millis, seq) = s.split_once('-').ok_or_else(err)?;
        let millis = millis.parse::<u64>().map_err(|_| err())?;
        let seq = seq.parse::<u32>().map_err(|_| err())?;
        Ok(Self { millis, seq })
    }
}

impl Serialize for FileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 单调 id 分配器
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next_seq: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now_millis: u64) -> FileId {
        let id = FileId::new(now_millis, self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        id
    }

    /// 加载已有记录后调用，保证新 id 的计数越过已持久化的最大值。
    pub fn observe(&mut self, id: FileId) {
        if id.seq >= self.next_seq {
            self.next_seq = id.seq.saturating_add(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Html,
    Css,
    Scss,
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Json,
    Markdown,
    Svg,
    Xml,
    Yaml,
    Python,
    PlainText,
}

impl FileKind {
    /// 扩展名查表；不在表中的扩展名返回 `None`。
    pub fn from_extension(ext: &str) -> Option<Self> {
        let kind = match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "scss" | "sass" => Self::Scss,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "mts" | "cts" => Self::TypeScript,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            "svg" => Self::Svg,
            "xml" => Self::Xml,
            "yaml" | "yml" => Self::Yaml,
            "py" => Self::Python,
            "txt" => Self::PlainText,
            _ => return None,
        };
        Some(kind)
    }

    /// 按虚拟路径的尾部扩展名推断类型，缺省为 `PlainText`。
    pub fn from_name(name: &str) -> Self {
        crate::models::virtual_path::extension(name)
            .and_then(Self::from_extension)
            .unwrap_or(Self::PlainText)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Scss => "scss",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Svg => "svg",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
            Self::Python => "python",
            Self::PlainText => "plaintext",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "html" => Self::Html,
            "css" => Self::Css,
            "scss" => Self::Scss,
            "javascript" => Self::JavaScript,
            "typescript" => Self::TypeScript,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "json" => Self::Json,
            "markdown" => Self::Markdown,
            "svg" => Self::Svg,
            "xml" => Self::Xml,
            "yaml" => Self::Yaml,
            "python" => Self::Python,
            _ => Self::PlainText,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FileKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl FileRecord {
    pub fn new(id: FileId, name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let kind = FileKind::from_name(&name);
        Self {
            id,
            name,
            content: content.into(),
            kind,
        }
    }

    pub fn basename(&self) -> &str {
        crate::models::virtual_path::basename(&self.name)
    }

    pub fn folder(&self) -> Option<&str> {
        crate::models::virtual_path::parent(&self.name)
    }

    pub fn is_placeholder(&self) -> bool {
        crate::models::virtual_path::is_placeholder(&self.name)
    }

    /// 改名后类型随扩展名重新推断。
    pub(crate) fn set_name(&mut self, name: String) {
        self.kind = FileKind::from_name(&name);
        self.name = name;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_record.rs"]
mod tests;
