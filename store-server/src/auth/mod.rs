//! 认证模块
//!
//! JWT + Argon2 认证体系：
//!
//! - [`jwt`] - 令牌签发与验证、[`CurrentUser`] 上下文
//! - [`password`] - Argon2 密码哈希
//! - [`middleware`] - `require_auth` / `require_admin` 中间件

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};
