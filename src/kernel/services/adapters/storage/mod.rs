//! 键值存储实现

pub mod dir;
pub mod memory;

pub use dir::DirStorage;
pub use memory::MemoryStorage;
