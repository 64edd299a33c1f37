//! Authentication and role-based authorization.
//!
//! - [`password`] - salted SHA-256 digests and constant-time verification
//! - [`roles`] - [`RoleTable`] built from configured roles and their inheritance
//!
//! A successful login yields a [`Principal`]; every shop operation takes one and checks it
//! against the role table before touching an actor.

mod password;
mod roles;

pub use password::{hash_password, verify_password};
pub use roles::{Operation, RoleTable};

use crate::model::{User, UserId};
use serde::Serialize;
use thiserror::Error;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub role: String,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Unknown user, wrong password or locked account. The cause is not revealed.
    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Role '{role}' may not perform {operation}")]
    Forbidden { role: String, operation: Operation },

    #[error("Role inheritance cycle through '{0}'")]
    RoleCycle(String),

    #[error("Role '{role}' inherits undeclared role '{inherits}'")]
    UnknownRole { role: String, inherits: String },

    #[error("Role '{0}' declared more than once")]
    DuplicateRole(String),
}

/// Verifies a login against a stored user.
pub fn authenticate_user(user: Option<&User>, password: &str) -> Result<Principal, AuthError> {
    let user = user.ok_or(AuthError::Unauthorized)?;
    if user.locked || !verify_password(&user.username, password, &user.password_hash) {
        return Err(AuthError::Unauthorized);
    }
    Ok(Principal::from(user))
}
