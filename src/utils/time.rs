use std::time::{SystemTime, UNIX_EPOCH};

// 毫秒时间戳, 用于日志里的耗时统计
pub fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
