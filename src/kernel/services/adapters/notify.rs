use crate::kernel::services::ports::{Notice, NoticeLevel, Notifier};
use std::sync::mpsc::Sender;

/// 只写日志，不打扰用户
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warning => tracing::warn!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Error => tracing::error!(title = %notice.title, "{}", notice.message),
        }
    }
}

/// 把提示转发给 UI 线程（或测试）
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notice>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<Notice>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            tracing::warn!("notice receiver dropped");
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/notify.rs"]
mod tests;
