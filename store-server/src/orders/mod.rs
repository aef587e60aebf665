//! 订单生命周期
//!
//! Pure order business rules, split from persistence:
//!
//! - [`lifecycle`] - status transitions, cancellation window, display mapping
//! - [`checkout`] - totals, shipping fee, payload validation
//!
//! The matching conditional-UPDATE persistence lives in
//! `db::repository::order`.

pub mod checkout;
pub mod lifecycle;

#[cfg(test)]
mod tests;

pub use checkout::{FREE_SHIPPING_THRESHOLD, SHIPPING_FEE, compute_shipping, compute_total};
pub use lifecycle::{CANCEL_WINDOW_MS, StatusDisplay, can_transition, is_cancellable, status_display};
