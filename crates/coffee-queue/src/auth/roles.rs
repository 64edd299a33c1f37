//! Role table: which operations each role may perform.
//!
//! Roles come from configuration. A role may inherit other roles and is granted everything
//! they are granted, transitively.

use super::AuthError;
use crate::config::RoleConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Everything a caller can ask the shop to do that needs a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    PlaceOrder,
    ViewOwnOrders,
    PickupOrder,
    CancelOwnOrder,
    ViewAllOrders,
    ViewUnclaimedOrders,
    ClaimOrder,
    /// Return, fulfill or cancel the caller's working order.
    WorkOrder,
    UpdateOrderStatus,
    DeleteOrder,
    ViewRevenue,
    ManageRecipes,
    CreateStaff,
    ViewUsers,
    DeleteUser,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PlaceOrder => "place_order",
            Operation::ViewOwnOrders => "view_own_orders",
            Operation::PickupOrder => "pickup_order",
            Operation::CancelOwnOrder => "cancel_own_order",
            Operation::ViewAllOrders => "view_all_orders",
            Operation::ViewUnclaimedOrders => "view_unclaimed_orders",
            Operation::ClaimOrder => "claim_order",
            Operation::WorkOrder => "work_order",
            Operation::UpdateOrderStatus => "update_order_status",
            Operation::DeleteOrder => "delete_order",
            Operation::ViewRevenue => "view_revenue",
            Operation::ManageRecipes => "manage_recipes",
            Operation::CreateStaff => "create_staff",
            Operation::ViewUsers => "view_users",
            Operation::DeleteUser => "delete_user",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved grants for every configured role.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    grants: BTreeMap<String, BTreeSet<Operation>>,
    default_passwords: BTreeMap<String, String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    InProgress,
    Done,
}

impl RoleTable {
    /// Resolves inheritance. Fails on duplicate names, unknown parents and cycles.
    pub fn build(roles: &[RoleConfig]) -> Result<Self, AuthError> {
        let mut declared: BTreeMap<&str, &RoleConfig> = BTreeMap::new();
        for role in roles {
            if declared.insert(role.name.as_str(), role).is_some() {
                return Err(AuthError::DuplicateRole(role.name.clone()));
            }
        }
        for role in roles {
            if let Some(parent) = role.inherits.iter().find(|p| !declared.contains_key(p.as_str())) {
                return Err(AuthError::UnknownRole {
                    role: role.name.clone(),
                    inherits: parent.clone(),
                });
            }
        }

        let mut table = RoleTable::default();
        let mut visits = BTreeMap::new();
        for role in roles {
            table.resolve(&role.name, &declared, &mut visits)?;
            if let Some(password) = &role.default_password {
                table
                    .default_passwords
                    .insert(role.name.clone(), password.clone());
            }
        }
        Ok(table)
    }

    fn resolve(
        &mut self,
        name: &str,
        declared: &BTreeMap<&str, &RoleConfig>,
        visits: &mut BTreeMap<String, Visit>,
    ) -> Result<(), AuthError> {
        match visits.get(name) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::InProgress) => return Err(AuthError::RoleCycle(name.to_string())),
            None => {}
        }
        visits.insert(name.to_string(), Visit::InProgress);

        // Existence was checked by `build`.
        let Some(role) = declared.get(name) else {
            return Ok(());
        };
        let mut granted: BTreeSet<Operation> = role.allowed.iter().copied().collect();
        for parent in &role.inherits {
            self.resolve(parent, declared, visits)?;
            if let Some(inherited) = self.grants.get(parent) {
                granted.extend(inherited.iter().copied());
            }
        }

        self.grants.insert(name.to_string(), granted);
        visits.insert(name.to_string(), Visit::Done);
        Ok(())
    }

    pub fn contains(&self, role: &str) -> bool {
        self.grants.contains_key(role)
    }

    pub fn allows(&self, role: &str, operation: Operation) -> bool {
        self.grants
            .get(role)
            .is_some_and(|granted| granted.contains(&operation))
    }

    /// `Ok` when `role` may perform `operation`, otherwise [`AuthError::Forbidden`].
    pub fn check(&self, role: &str, operation: Operation) -> Result<(), AuthError> {
        if self.allows(role, operation) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                role: role.to_string(),
                operation,
            })
        }
    }

    pub fn operations(&self, role: &str) -> Option<&BTreeSet<Operation>> {
        self.grants.get(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.grants.keys().map(String::as_str)
    }

    /// `(role, password)` for every role that declares a default account.
    pub fn default_accounts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.default_passwords
            .iter()
            .map(|(role, password)| (role.as_str(), password.as_str()))
    }
}
