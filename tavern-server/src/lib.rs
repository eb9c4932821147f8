//! Tavern Server - 餐厅管理后端
//!
//! # 架构概述
//!
//! 本模块是 Tavern Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 + OAuth2 认证体系
//! - **预订核心** (`booking`): 营业时间校验与占位冲突检测
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! tavern-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、OAuth2、权限
//! ├── booking/       # 预订校验 / 冲突检测 / 编排
//! ├── db/            # 数据库层 (models + repository)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验等工具
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, OAuthService};
pub use booking::ReservationService;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______
 /_  __/___ __   _____  _________
  / / / __ `/ | / / _ \/ ___/ __ \
 / / / /_/ /| |/ /  __/ /  / / / /
/_/  \__,_/ |___/\___/_/  /_/ /_/
    "#
    );
}
