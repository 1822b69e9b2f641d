//! Who is acting on a character.

use std::fmt;
use std::str::FromStr;

use fichas_domain::{Character, UserId};
use serde::{Deserialize, Serialize};

/// Account role, as asserted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    Master,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Master => "master",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Ok(Role::Player),
            "master" => Ok(Role::Master),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The authenticated caller of a use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn player(user_id: UserId) -> Self {
        Self::new(user_id, Role::Player)
    }

    pub fn master(user_id: UserId) -> Self {
        Self::new(user_id, Role::Master)
    }

    pub fn is_master(&self) -> bool {
        self.role == Role::Master
    }

    /// Owners and masters may read and write a character.
    pub fn can_access(&self, character: &Character) -> bool {
        self.is_master() || character.is_owned_by(&self.user_id)
    }
}
