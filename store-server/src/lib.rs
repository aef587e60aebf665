//! Yala Carves Store Server - 手工艺品店面后端
//!
//! # 架构概述
//!
//! 本模块是店面后端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储 + 版本化迁移
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **订单生命周期** (`orders`): 状态机、取消窗口、结算金额
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码哈希、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层（连接池、迁移、仓储）
//! ├── orders/        # 订单生命周期规则
//! └── utils/         # 错误类型、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

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

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 __   __    _          ___
 \ \ / /_ _| |__ _    / __|__ _ _ ___ _____ ___
  \ V / _` | / _` |  | (__/ _` | '_\ V / -_|_-<
   |_|\__,_|_\__,_|   \___\__,_|_|  \_/\___/__/
    "#
    );
}
