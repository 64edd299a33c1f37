use super::OrderId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// A registered account, customer or staff.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for User`](#impl-ActorEntity-for-User) for details on:
/// - Creation parameters ([`UserCreate`])
/// - Update parameters ([`UserUpdate`])
/// - Custom actions ([`UserAction`](crate::user_actor::UserAction))
///
/// Orders are referenced by id only. The bookkeeping sets are changed exclusively by the
/// user's own actions.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub locked: bool,
    /// Staff side: the order currently claimed.
    pub working_order: Option<OrderId>,
    /// Customer side: orders not yet picked up or cancelled.
    pub placed_orders: BTreeSet<OrderId>,
    /// Every order ever placed or claimed.
    pub order_history: BTreeSet<OrderId>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"***")
            .field("role", &self.role)
            .field("locked", &self.locked)
            .field("working_order", &self.working_order)
            .field("placed_orders", &self.placed_orders)
            .field("order_history", &self.order_history)
            .finish()
    }
}

impl User {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            role: role.into(),
            locked: false,
            working_order: None,
            placed_orders: BTreeSet::new(),
            order_history: BTreeSet::new(),
        }
    }

    /// Case-insensitive substring match on the role name.
    pub fn role_contains(&self, fragment: &str) -> bool {
        self.role
            .to_lowercase()
            .contains(&fragment.to_lowercase())
    }
}

/// Payload for creating a new user. The password is hashed on creation.
#[derive(Clone)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

/// Payload for updating an existing user.
#[derive(Clone, Default)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub locked: Option<bool>,
    pub role: Option<String>,
}

impl std::fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserUpdate")
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("locked", &self.locked)
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_json_hide_password_hash() {
        let user = User::new(UserId(1), "alice", "5e884898da28047151d0e56f8dc62927", "customer");

        let debug = format!("{user:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("5e884898"));

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("5e884898"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_debug_masks_create_and_update_passwords() {
        let create = UserCreate {
            username: "alice".into(),
            password: "hunter2".into(),
            role: "customer".into(),
        };
        let update = UserUpdate {
            password: Some("hunter3".into()),
            ..UserUpdate::default()
        };
        assert!(!format!("{create:?}").contains("hunter2"));
        assert!(!format!("{update:?}").contains("hunter3"));
    }
}
