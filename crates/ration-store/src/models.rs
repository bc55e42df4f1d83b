//! Domain records held by the in-memory stores.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the command layer and the JSON shell.  Field names use
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use ration_shared::{AssignmentId, ProductId, Role, UserId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Role-specific attributes of a user.  The variant is the user's role and
/// never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Admin,
    Shopkeeper {
        #[serde(rename = "aadharNumber", default)]
        aadhar_number: Option<String>,
    },
    Customer {
        #[serde(rename = "smartCardNumber", default)]
        smart_card_number: Option<String>,
    },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Admin => Role::Admin,
            RoleProfile::Shopkeeper { .. } => Role::Shopkeeper,
            RoleProfile::Customer { .. } => Role::Customer,
        }
    }
}

/// A directory entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login key, together with password and role.
    pub email: String,
    /// Stored and compared as plaintext.  Never serialized outward.
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
    pub city: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn smart_card_number(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Customer { smart_card_number } => smart_card_number.as_deref(),
            _ => None,
        }
    }

    pub fn aadhar_number(&self) -> Option<&str> {
        match &self.profile {
            RoleProfile::Shopkeeper { aadhar_number } => aadhar_number.as_deref(),
            _ => None,
        }
    }
}

/// Input for [`DirectoryStore::create`](crate::DirectoryStore::create).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

/// Profile edit.  Role, password and id are not editable.
///
/// `None` leaves a field untouched.  For the optional fields an empty string
/// clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub contact_number: Option<String>,
}

impl UserUpdate {
    pub(crate) fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(city) = self.city {
            user.city = non_empty(city);
        }
        if let Some(contact) = self.contact_number {
            user.contact_number = non_empty(contact);
        }
    }
}

/// Login triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Self-service registration.  Always produces a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub smart_card_number: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl RegisterData {
    pub(crate) fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
            password: self.password,
            profile: RoleProfile::Customer {
                smart_card_number: self.smart_card_number.and_then(non_empty),
            },
            city: self.city.and_then(non_empty),
            contact_number: self.contact_number.and_then(non_empty),
        }
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// An inventory item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Maximum retail price per unit, in rupees.
    pub mrp: f64,
    /// On-hand quantity.  Can go negative through the ledger.
    pub quantity: i64,
    /// Unit of measure, free-form.
    pub unit: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub mrp: f64,
    pub quantity: i64,
    pub unit: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Shallow merge applied by [`InventoryStore::update`](crate::InventoryStore::update).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub mrp: Option<f64>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub image: Option<String>,
}

impl ProductUpdate {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(mrp) = self.mrp {
            product.mrp = mrp;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(image) = self.image {
            product.image = non_empty(image);
        }
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// An immutable ledger entry: `quantity` of a product handed to a recipient
/// by an issuer.  Names are snapshots taken at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAssignment {
    pub id: AssignmentId,
    pub product_id: ProductId,
    pub product_name: String,
    pub recipient_id: UserId,
    pub recipient_name: String,
    pub issuer_id: UserId,
    pub issuer_name: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub product_id: ProductId,
    pub product_name: String,
    pub recipient_id: UserId,
    pub recipient_name: String,
    pub issuer_id: UserId,
    pub issuer_name: String,
    pub quantity: i64,
}

impl NewAssignment {
    /// Snapshot the names of the product and both parties.
    pub fn between(product: &Product, recipient: &User, issuer: &User, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            recipient_id: recipient.id.clone(),
            recipient_name: recipient.name.clone(),
            issuer_id: issuer.id.clone(),
            issuer_name: issuer.name.clone(),
            quantity,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
