//! Shared types for the Yala Carves storefront
//!
//! 前后端共享的数据模型和 DTO：
//!
//! - **models**: 数据库实体 (User, Category, Product, Order) 及其
//!   Create/Update 载荷
//! - **client**: 认证接口的请求/响应类型
//! - **util**: 时间戳和 ID 生成工具
//!
//! `sqlx::FromRow` 派生通过 `db` feature 开关，纯客户端使用方无需
//! 引入数据库依赖。

pub mod client;
pub mod models;
pub mod util;
