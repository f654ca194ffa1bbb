use crate::shared::entity::{Entity, ID};
use serde::{de::Visitor, Deserialize, Serialize};
use std::fmt::Display;

const SELLER_ROLE: &str = "seller";

/// Role attribute stored on a `Profile` record. Only `Seller` is ever
/// written by this system, other roles are kept verbatim when read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Seller,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Seller => SELLER_ROLE,
            Self::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        if role == SELLER_ROLE {
            Self::Seller
        } else {
            Self::Other(role.to_string())
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RoleVisitor;

        impl<'de> Visitor<'de> for RoleVisitor {
            type Value = Role;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A role name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Role, E>
            where
                E: serde::de::Error,
            {
                Ok(Role::from(value))
            }
        }

        deserializer.deserialize_str(RoleVisitor)
    }
}

/// Row-store record keyed by the `Account` id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ID,
    pub role: Role,
}

impl Profile {
    pub fn seller(id: ID) -> Self {
        Self {
            id,
            role: Role::Seller,
        }
    }

    pub fn is_seller(&self) -> bool {
        self.role == Role::Seller
    }
}

impl Entity for Profile {
    fn id(&self) -> &ID {
        &self.id
    }
}
