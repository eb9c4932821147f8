use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, OAuthService};
use crate::booking::ReservationService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，每个请求克隆的成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | oauth_service | OAuthService | OAuth2 登录服务 |
/// | reservation_service | ReservationService | 预订编排服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// OAuth2 登录服务
    pub oauth_service: OAuthService,
    /// 预订编排服务 (校验 + 冲突检测 + 持久化)
    pub reservation_service: ReservationService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/tavern.db)
    /// 3. 各服务 (JWT, OAuth, Reservation)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure().map_err(|e| {
            crate::AppError::internal(format!("Failed to create work directory structure: {e}"))
        })?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("tavern.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        // 2. Initialize services
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let oauth_service = OAuthService::new(&config.oauth)?;
        let reservation_service = ReservationService::new(db.clone());

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            oauth_service,
            reservation_service,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
