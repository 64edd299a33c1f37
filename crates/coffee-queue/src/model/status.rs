//! Order status values and the legal moves between them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle state of an order.
///
/// `InQueue` is the initial state; `Cancelled` and `PickedUp` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    InQueue,
    InProgress,
    Completed,
    NotEnoughIngredients,
    Cancelled,
    PickedUp,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::InQueue,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::NotEnoughIngredients,
        OrderStatus::Cancelled,
        OrderStatus::PickedUp,
    ];

    /// Wire token, e.g. `NOT_ENOUGH_INGREDIENTS`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InQueue => "IN_QUEUE",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::NotEnoughIngredients => "NOT_ENOUGH_INGREDIENTS",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::PickedUp => "PICKED_UP",
        }
    }

    /// No transition ever succeeds out of a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::PickedUp)
    }

    /// States reachable from `self` in one step.
    pub fn allowed_targets(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            InQueue => &[InProgress, NotEnoughIngredients, Cancelled],
            InProgress => &[InQueue, NotEnoughIngredients, Cancelled, Completed],
            Completed => &[PickedUp],
            NotEnoughIngredients => &[Cancelled, InQueue, InProgress],
            Cancelled | PickedUp => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Orders in these states count towards revenue.
    pub fn is_paid(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::PickedUp)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status token from outside the system that names no known state.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    /// Tokens are matched exactly; `in_queue` or ` IN_QUEUE` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states_have_no_targets() {
        for status in OrderStatus::ALL {
            assert_eq!(status.is_terminal(), status.allowed_targets().is_empty());
        }
    }

    #[test]
    fn test_completed_only_moves_to_picked_up() {
        for target in OrderStatus::ALL {
            assert_eq!(
                OrderStatus::Completed.can_transition_to(target),
                target == OrderStatus::PickedUp
            );
        }
    }

    #[test]
    fn test_no_state_targets_itself() {
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_parse_tokens() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert_eq!(
            "in_queue".parse::<OrderStatus>(),
            Err(ParseStatusError("in_queue".into()))
        );
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_tokens() {
        let json = serde_json::to_string(&OrderStatus::NotEnoughIngredients).unwrap();
        assert_eq!(json, "\"NOT_ENOUGH_INGREDIENTS\"");
    }
}
