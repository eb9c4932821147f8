//! 时间工具函数
//!
//! Repository 层的时间戳统一使用 `i64` Unix millis；
//! 预订时间使用墙钟 `NaiveDateTime` (营业时间按本地挂钟判断)。

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
