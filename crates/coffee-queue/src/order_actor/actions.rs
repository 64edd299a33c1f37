//! Custom actions for the Order actor.
//!
//! Status and staff changes run inside the order actor, one request at a time, so the
//! staff check and the staff write of a claim can never interleave with another claim.

use crate::model::OrderStatus;

/// Custom actions for Order entities. Both answer `true` when the order changed.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Request a move to the given status.
    Transition(OrderStatus),
    /// Claim the order for a staff member (`Some`) or release it back to the queue (`None`).
    AssignStaff(Option<String>),
}
