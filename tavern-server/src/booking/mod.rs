//! 预订核心 - 营业时间校验与占位冲突检测
//!
//! # 规则
//!
//! - 预订必须至少提前一天 (日期严格晚于今天)
//! - 开门 10:00，打烊 22:00；一次预订占用 2 小时服务窗口，
//!   前后各留 30 分钟缓冲，整个窗口必须在打烊前结束
//! - 同一桌台在 ±2.5 小时窗口内只接受一个预订；
//!   同一用户或同一访客邮箱在同一时刻只能持有一个预订
//!
//! # 模块结构
//!
//! - [`validator`] - 单个预订的时间规则校验
//! - [`conflict`] - 针对现有预订的冲突查询
//! - [`service`] - create/update/cancel 编排

pub mod conflict;
pub mod service;
pub mod validator;

pub use conflict::ConflictChecker;
pub use service::ReservationService;
pub use validator::validate_reservation_time;

use chrono::{Duration, NaiveTime};

/// Opening time (first bookable slot)
pub fn opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).expect("valid opening time")
}

/// Closing time (service window must end by here)
pub fn closing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 0, 0).expect("valid closing time")
}

/// Length of one reservation's service window
pub fn reservation_duration() -> Duration {
    Duration::hours(2)
}

/// Padding before/after the service window used for conflict checks
pub fn buffer_duration() -> Duration {
    Duration::minutes(30)
}

/// Service window + buffer, the span one reservation blocks out
pub fn blocking_window() -> Duration {
    reservation_duration() + buffer_duration()
}
