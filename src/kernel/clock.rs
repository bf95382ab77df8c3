use std::time::{SystemTime, UNIX_EPOCH};

/// 当前 unix 毫秒时间戳；时钟早于 epoch 时返回 0。
pub fn unix_time_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
