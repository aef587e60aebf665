//! Domain models
//!
//! Database entities and their Create/Update payloads. Entity structs
//! derive `sqlx::FromRow` behind the `db` feature.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use order::{
    CartItemInput, Order, OrderCreate, OrderItem, OrderItemDetail, OrderStatus, PaymentMethod,
    PaymentStatus, ShippingAddress,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use user::User;
