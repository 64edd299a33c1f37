//! Custom actions for the User actor.
//!
//! These are the claim protocol (staff side) and the placement protocol (customer side).
//! Each one runs inside the user actor and calls the order actor for the actual status
//! change, then updates the user's own bookkeeping from the answer.

use crate::model::{OrderId, OrderStatus, RecipeRef};

/// Custom actions for User entities.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Take an unclaimed order. Fails if this user already works an order or the order is
    /// already staffed.
    ClaimOrder(OrderId),
    /// Release the working order back to the queue. The claim is dropped even if the order
    /// refuses to move.
    ReturnCurrentOrderToQueue,
    /// Complete the working order. The claim is kept if the order refuses to complete.
    FulfillCurrentOrder,
    /// Cancel the working order. The claim is always dropped.
    CancelCurrentOrder,
    /// Create a new order for this customer.
    PlaceOrder(RecipeRef),
    /// Pick up one of this customer's placed orders.
    PickupOrder(OrderId),
    /// Cancel one of this customer's placed orders. It leaves the placed set even if the
    /// order refuses to cancel.
    CancelPlacedOrder(OrderId),
    /// Bring the user's references in line with an order changed from outside the protocol.
    /// `status` is `None` when the order was deleted. History is kept.
    SyncOrder {
        order_id: OrderId,
        status: Option<OrderStatus>,
    },
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    ClaimOrder(bool),
    ReturnCurrentOrderToQueue(bool),
    FulfillCurrentOrder(bool),
    CancelCurrentOrder(bool),
    PlaceOrder(OrderId),
    PickupOrder(bool),
    CancelPlacedOrder(bool),
    SyncOrder(bool),
}
