use crate::auth::Operation;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub actors: ActorConfig,
    #[serde(default = "default_roles")]
    pub roles: Vec<RoleConfig>,
    /// Menu seeded at startup.
    #[serde(default)]
    pub recipes: Vec<RecipeConfig>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            actors: ActorConfig::default(),
            roles: default_roles(),
            recipes: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Actor runtime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActorConfig {
    /// Request channel capacity of every actor.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_buffer_size() -> usize {
    32
}

/// One role and what it may do.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoleConfig {
    pub name: String,
    /// When set, a user named after the role is created with this password at startup.
    #[serde(default)]
    pub default_password: Option<String>,
    #[serde(default)]
    pub inherits: Vec<String>,
    #[serde(default)]
    pub allowed: Vec<Operation>,
}

/// A menu entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecipeConfig {
    pub name: String,
    pub price: u32,
}

/// Roles used when the configuration declares none.
pub fn default_roles() -> Vec<RoleConfig> {
    use Operation::*;

    vec![
        RoleConfig {
            name: "customer".to_string(),
            default_password: None,
            inherits: Vec::new(),
            allowed: vec![PlaceOrder, ViewOwnOrders, PickupOrder, CancelOwnOrder],
        },
        RoleConfig {
            name: "staff".to_string(),
            default_password: None,
            inherits: Vec::new(),
            allowed: vec![
                ViewAllOrders,
                ViewUnclaimedOrders,
                ClaimOrder,
                WorkOrder,
                UpdateOrderStatus,
            ],
        },
        RoleConfig {
            name: "manager".to_string(),
            default_password: Some("manager".to_string()),
            inherits: vec!["staff".to_string()],
            allowed: vec![
                DeleteOrder,
                ViewRevenue,
                ManageRecipes,
                CreateStaff,
                ViewUsers,
                DeleteUser,
            ],
        },
    ]
}
