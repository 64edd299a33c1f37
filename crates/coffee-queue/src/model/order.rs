/// A customer's order for one recipe, tracked through its lifecycle.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
use super::{OrderLog, OrderStatus, RecipeRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Fields are private: status, staff and log change only through [`Order::transition`] and
/// [`Order::assign_staff`]. Serialize-only, so an order cannot be built around the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OrderId,
    created_at: DateTime<Utc>,
    status: OrderStatus,
    log: OrderLog,
    enough_ingredients: bool,
    customer: String,
    staff: Option<String>,
    recipe: RecipeRef,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: String,
    pub recipe: RecipeRef,
}

impl Order {
    /// A new order in `IN_QUEUE` whose log holds the creation entry.
    pub fn new(id: OrderId, customer: impl Into<String>, recipe: RecipeRef) -> Self {
        let customer = customer.into();
        let created_at = Utc::now();
        let status = OrderStatus::InQueue;
        Self {
            id,
            created_at,
            status,
            log: OrderLog::created(&customer, status, created_at),
            enough_ingredients: true,
            customer,
            staff: None,
            recipe,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn log(&self) -> &OrderLog {
        &self.log
    }

    pub fn enough_ingredients(&self) -> bool {
        self.enough_ingredients
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn staff(&self) -> Option<&str> {
        self.staff.as_deref()
    }

    pub fn recipe(&self) -> &RecipeRef {
        &self.recipe
    }

    /// Moves the order to `requested` if the state machine allows it.
    ///
    /// Returns `false` without touching any field when the move is rejected. On success the
    /// staff reference and ingredients flag are adjusted and one log entry is appended.
    pub fn transition(&mut self, requested: OrderStatus) -> bool {
        use OrderStatus::*;

        let current = self.status;
        if requested == current || !current.can_transition_to(requested) {
            debug!(order_id = %self.id, from = %current, to = %requested, "Transition rejected");
            return false;
        }

        match current {
            InProgress => self.staff = None,
            NotEnoughIngredients => {
                if matches!(requested, Cancelled | InQueue) {
                    self.staff = None;
                }
                self.enough_ingredients = true;
            }
            _ => {}
        }
        if requested == NotEnoughIngredients {
            self.enough_ingredients = false;
        }

        self.status = requested;
        self.log.record_transition(current, requested);
        true
    }

    /// Claims (`Some`) or releases (`None`) the order for a staff member.
    ///
    /// - `None` clears the staff reference and requests `IN_QUEUE`.
    /// - `Some(name)` fails if someone already holds the order, otherwise records the name and
    ///   requests `IN_PROGRESS`. If that transition is rejected the name is not kept.
    pub fn assign_staff(&mut self, staff: Option<String>) -> bool {
        match staff {
            None => {
                self.staff = None;
                self.transition(OrderStatus::InQueue)
            }
            Some(_) if self.staff.is_some() => false,
            Some(name) => {
                self.staff = Some(name);
                let moved = self.transition(OrderStatus::InProgress);
                if !moved {
                    self.staff = None;
                }
                moved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogEntry, RecipeId};
    use OrderStatus::*;

    fn latte() -> RecipeRef {
        RecipeRef {
            id: RecipeId(1),
            name: "latte".into(),
            price: 350,
        }
    }

    fn order() -> Order {
        Order::new(OrderId(1), "alice", latte())
    }

    /// Drives a fresh order into `status` along a legal path.
    fn order_in(status: OrderStatus) -> Order {
        let mut order = order();
        let path: &[OrderStatus] = match status {
            InQueue => &[],
            InProgress => &[InProgress],
            Completed => &[InProgress, Completed],
            NotEnoughIngredients => &[NotEnoughIngredients],
            Cancelled => &[Cancelled],
            PickedUp => &[InProgress, Completed, PickedUp],
        };
        for step in path {
            assert!(order.transition(*step));
        }
        order
    }

    #[test]
    fn test_new_order_is_queued_with_creation_entry() {
        let order = order();
        assert_eq!(order.status(), InQueue);
        assert!(order.enough_ingredients());
        assert_eq!(order.staff(), None);
        assert_eq!(order.log().len(), 1);
        assert!(matches!(
            order.log().entries()[0],
            LogEntry::Created { ref customer, state: InQueue, .. } if customer == "alice"
        ));
    }

    #[test]
    fn test_transition_table() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let mut order = order_in(from);
                let before = order.log().len();
                let moved = order.transition(to);

                assert_eq!(moved, from.can_transition_to(to), "{from} -> {to}");
                if moved {
                    assert_eq!(order.status(), to);
                    assert_eq!(order.log().len(), before + 1);
                } else {
                    assert_eq!(order.status(), from);
                    assert_eq!(order.log().len(), before);
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_are_absorbing() {
        for terminal in [Cancelled, PickedUp] {
            let snapshot = order_in(terminal);
            for to in OrderStatus::ALL {
                let mut order = snapshot.clone();
                assert!(!order.transition(to));
                assert!(!order.assign_staff(Some("bob".into())));
                assert_eq!(order.status(), snapshot.status());
                assert_eq!(order.log(), snapshot.log());
            }
        }
    }

    #[test]
    fn test_leaving_in_progress_clears_staff() {
        for to in [InQueue, NotEnoughIngredients, Cancelled, Completed] {
            let mut order = order();
            assert!(order.assign_staff(Some("bob".into())));
            assert_eq!(order.staff(), Some("bob"));

            assert!(order.transition(to));
            assert_eq!(order.staff(), None, "after moving to {to}");
        }
    }

    #[test]
    fn test_ingredients_shortage_and_recovery() {
        let mut order = order();

        assert!(order.transition(NotEnoughIngredients));
        assert!(!order.enough_ingredients());

        assert!(order.assign_staff(Some("bob".into())));
        assert_eq!(order.status(), InProgress);
        assert!(order.enough_ingredients());
        assert_eq!(order.staff(), Some("bob"));
        assert_eq!(order.log().len(), 3);
    }

    #[test]
    fn test_second_claim_keeps_first_staff() {
        let mut order = order();
        assert!(order.assign_staff(Some("bob".into())));
        assert!(!order.assign_staff(Some("carol".into())));

        assert_eq!(order.staff(), Some("bob"));
        assert_eq!(order.log().len(), 2);
    }

    #[test]
    fn test_rejected_claim_does_not_keep_staff() {
        let mut order = order_in(Completed);
        assert!(!order.assign_staff(Some("bob".into())));
        assert_eq!(order.staff(), None);
    }

    #[test]
    fn test_serialized_order_opens_with_creation_entry() {
        let mut order = order();
        assert!(order.assign_staff(Some("bob".into())));

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["staff"], "bob");
        let log = json["log"].as_array().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0]["kind"], "created");
        assert_eq!(log[0]["customer"], "alice");
        assert_eq!(log[1]["kind"], "transition");
        assert_eq!(log[1]["to"], "IN_PROGRESS");
    }

    #[test]
    fn test_release_returns_order_to_queue() {
        let mut order = order();
        assert!(order.assign_staff(Some("bob".into())));
        assert!(order.assign_staff(None));

        assert_eq!(order.status(), InQueue);
        assert_eq!(order.staff(), None);
        assert_eq!(
            order.log().lines()[2].split(" at ").next(),
            Some("IN_PROGRESS => IN_QUEUE")
        );
    }
}
