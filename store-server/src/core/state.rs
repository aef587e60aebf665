use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{self, JwtService};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::user;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是店面后端的核心数据结构。
/// 使用 Arc/池句柄实现浅拷贝，所有权成本极低。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 嵌入式数据库连接池 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库连接池 (SQLite)
    pub pool: SqlitePool,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/store.db，应用迁移)
    /// 3. 管理员引导 (ADMIN_EMAIL / ADMIN_PASSWORD)
    /// 4. JWT 服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db_path = config.database_dir().join("store.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let pool = db_service.pool;

        // 2. Admin bootstrap (idempotent)
        match &config.admin_password {
            Some(password) => {
                let hash =
                    auth::hash_password(password).expect("Failed to hash admin password");
                user::ensure_admin(&pool, &config.admin_email, &hash)
                    .await
                    .expect("Failed to bootstrap admin account");
            }
            None => {
                tracing::warn!("ADMIN_PASSWORD not set; skipping admin bootstrap");
            }
        }

        // 3. JWT service
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config: config.clone(),
            pool,
            jwt_service,
        }
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
