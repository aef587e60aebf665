//! Order status rules
//!
//! Status flows forward only: pending → confirmed → shipped → delivered.
//! `cancelled` is reachable from every non-delivered state and, like
//! `delivered`, is terminal. The owning user may cancel unilaterally
//! within [`CANCEL_WINDOW_MS`] of order creation.

use serde::Serialize;
use shared::models::OrderStatus;

/// 取消窗口：下单后 5 小时内
pub const CANCEL_WINDOW_MS: i64 = 5 * 60 * 60 * 1000;

/// Whether `to` is a legal single-step transition from `from`
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    match (from, to) {
        (Pending, Confirmed) => true,
        (Confirmed, Shipped) => true,
        (Shipped, Delivered) => true,
        (Pending | Confirmed | Shipped, Cancelled) => true,
        _ => false,
    }
}

/// Whether the owning user may still cancel.
///
/// Terminal statuses are never cancellable regardless of timestamps;
/// otherwise the elapsed wall-clock time since creation must not exceed
/// the window. `now` comes from the caller — no timezone handling beyond
/// plain timestamp arithmetic.
pub fn is_cancellable(status: OrderStatus, created_at: i64, now: i64) -> bool {
    if status.is_terminal() {
        return false;
    }
    now - created_at <= CANCEL_WINDOW_MS
}

/// Badge rendering hints for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub icon: &'static str,
    pub color_class: &'static str,
}

/// Map a raw status string to its display badge.
///
/// Total over arbitrary input: unrecognized values get the neutral
/// badge instead of failing.
pub fn status_display(raw: &str) -> StatusDisplay {
    match OrderStatus::parse(raw) {
        Some(OrderStatus::Pending) => StatusDisplay {
            icon: "clock",
            color_class: "badge-warning",
        },
        Some(OrderStatus::Confirmed) => StatusDisplay {
            icon: "check-circle",
            color_class: "badge-info",
        },
        Some(OrderStatus::Shipped) => StatusDisplay {
            icon: "truck",
            color_class: "badge-progress",
        },
        Some(OrderStatus::Delivered) => StatusDisplay {
            icon: "package-check",
            color_class: "badge-success",
        },
        Some(OrderStatus::Cancelled) => StatusDisplay {
            icon: "x-circle",
            color_class: "badge-danger",
        },
        None => StatusDisplay {
            icon: "help-circle",
            color_class: "badge-neutral",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus::*;

    #[test]
    fn terminal_statuses_are_never_cancellable() {
        // Regardless of how fresh the order is
        assert!(!is_cancellable(Delivered, 0, 0));
        assert!(!is_cancellable(Cancelled, 0, 0));
        assert!(!is_cancellable(Delivered, 1_000, 500));
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let created = 1_000_000;
        assert!(is_cancellable(Pending, created, created));
        assert!(is_cancellable(Pending, created, created + CANCEL_WINDOW_MS));
        // False immediately after the boundary
        assert!(!is_cancellable(
            Pending,
            created,
            created + CANCEL_WINDOW_MS + 1
        ));
    }

    #[test]
    fn all_open_statuses_share_the_window() {
        let created = 0;
        for status in [Pending, Confirmed, Shipped] {
            assert!(is_cancellable(status, created, CANCEL_WINDOW_MS));
            assert!(!is_cancellable(status, created, CANCEL_WINDOW_MS + 1));
        }
    }

    #[test]
    fn transitions_are_forward_only_single_steps() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Confirmed, Shipped));
        assert!(can_transition(Shipped, Delivered));

        // No skipping, no going back
        assert!(!can_transition(Pending, Shipped));
        assert!(!can_transition(Pending, Delivered));
        assert!(!can_transition(Confirmed, Pending));
        assert!(!can_transition(Delivered, Shipped));
        assert!(!can_transition(Pending, Pending));
    }

    #[test]
    fn cancel_escape_excludes_delivered() {
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Confirmed, Cancelled));
        assert!(can_transition(Shipped, Cancelled));
        assert!(!can_transition(Delivered, Cancelled));
        assert!(!can_transition(Cancelled, Cancelled));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for to in [Pending, Confirmed, Shipped, Delivered, Cancelled] {
            assert!(!can_transition(Delivered, to));
            assert!(!can_transition(Cancelled, to));
        }
    }

    #[test]
    fn display_covers_every_status() {
        assert_eq!(status_display("pending").color_class, "badge-warning");
        assert_eq!(status_display("confirmed").color_class, "badge-info");
        assert_eq!(status_display("shipped").color_class, "badge-progress");
        assert_eq!(status_display("delivered").color_class, "badge-success");
        assert_eq!(status_display("cancelled").color_class, "badge-danger");
    }

    #[test]
    fn status_and_display_serialize_for_the_ui() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_value(status_display("shipped")).unwrap(),
            serde_json::json!({"icon": "truck", "color_class": "badge-progress"})
        );
    }

    #[test]
    fn display_of_unknown_status_is_neutral() {
        assert_eq!(status_display("refunded").color_class, "badge-neutral");
        assert_eq!(status_display("").icon, "help-circle");
        assert_eq!(status_display("PENDING").color_class, "badge-neutral");
    }
}
