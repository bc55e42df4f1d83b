use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build the identifier for the `n`th record of a sequence.
            pub fn from_seq(n: u64) -> Self {
                Self(n.to_string())
            }

            /// Numeric value of the identifier, if it is sequence-shaped.
            pub fn seq(&self) -> Option<u64> {
                self.0.parse().ok()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Directory identifier of a user.
    UserId
);
string_id!(
    /// Inventory identifier of a product.
    ProductId
);
string_id!(
    /// Ledger identifier of an assignment.
    AssignmentId
);

/// The three roles a user can hold. Fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Shopkeeper,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Shopkeeper, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Shopkeeper => "shopkeeper",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "shopkeeper" => Ok(Role::Shopkeeper),
            "customer" => Ok(Role::Customer),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}
