//! zplay - 代码游乐场的虚拟文件系统
//!
//! 模块结构：
//! - models: 数据模型（FileRecord, FileKind, 虚拟路径语法）
//! - kernel: 核心（FileStore, 文件夹视图, 搜索, 最近文件, 持久化）
//! - kernel::services: ports（存储/提示/上传契约）与 adapters（内存、目录、磁盘实现）

pub mod kernel;
pub mod models;
