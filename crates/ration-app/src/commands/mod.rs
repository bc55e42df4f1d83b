//! Command handlers called by the presentation tier.
//!
//! Each sub-module groups the commands of one role.  Every handler locks the
//! stores once, checks the session role, validates its input and only then
//! calls into a store.  The stores themselves perform no such checks.

pub mod admin;
pub mod auth;
pub mod customer;
pub mod shopkeeper;

use std::cmp::Reverse;

use ration_shared::format::format_date;
use ration_shared::validation::{check_max_quantity, check_min_quantity, check_within_stock};
use ration_shared::{ProductId, Role, UserId};
use ration_store::{NewAssignment, ProductAssignment, Recorded, StoreError, Stores, User};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Hand `quantity` of a product to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub product_id: ProductId,
    pub recipient_id: UserId,
    pub quantity: i64,
}

/// The signed-in user as shown on a profile page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user: User,
    pub member_since: String,
}

impl From<User> for ProfileView {
    fn from(user: User) -> Self {
        let member_since = format_date(&user.created_at);
        Self { user, member_since }
    }
}

/// The session user, provided it holds `role`.
pub(crate) fn require_role(stores: &Stores, role: Role) -> AppResult<User> {
    let user = stores.session.current().ok_or(AppError::Unauthenticated)?;
    if user.role() != role {
        tracing::warn!(user = %user.id, role = %user.role(), required = %role, "role check failed");
        return Err(AppError::Forbidden { required: role });
    }
    Ok(user.clone())
}

/// Validate and record an assignment from `issuer` to a recipient of
/// `recipient_role`.  Quantity must be between one and the on-hand stock.
pub(crate) fn assign(
    stores: &mut Stores,
    issuer: &User,
    recipient_role: Role,
    request: AssignRequest,
) -> AppResult<Recorded> {
    let product = stores
        .inventory
        .get(&request.product_id)
        .cloned()
        .ok_or_else(|| StoreError::ProductNotFound(request.product_id.clone()))?;
    let recipient = stores
        .directory
        .get(&request.recipient_id)
        .cloned()
        .ok_or_else(|| StoreError::UserNotFound(request.recipient_id.clone()))?;

    if recipient.role() != recipient_role {
        return Err(AppError::BadRequest(format!(
            "recipient {} is not a {recipient_role}",
            recipient.id
        )));
    }

    check_min_quantity(request.quantity, 1)?;
    check_max_quantity(request.quantity)?;
    check_within_stock(request.quantity, product.quantity)?;

    let recorded = stores.record_assignment(NewAssignment::between(
        &product,
        &recipient,
        issuer,
        request.quantity,
    ))?;

    tracing::info!(
        id = %recorded.assignment.id,
        product = %product.name,
        recipient = %recipient.name,
        issuer = %issuer.name,
        quantity = request.quantity,
        "product assigned"
    );
    Ok(recorded)
}

/// Sum of the entries' quantities, clamped to the `i64` range.  Ledger
/// entries seeded or recorded directly against the store carry no upper
/// bound.
pub(crate) fn total_quantity(entries: &[&ProductAssignment]) -> i64 {
    entries
        .iter()
        .fold(0i64, |total, a| total.saturating_add(a.quantity))
}

/// Newest first, at most `limit` entries.
pub(crate) fn most_recent(
    entries: Vec<&ProductAssignment>,
    limit: usize,
) -> Vec<ProductAssignment> {
    let mut entries: Vec<ProductAssignment> = entries.into_iter().cloned().collect();
    entries.sort_by_key(|a| Reverse((a.created_at, a.id.seq())));
    entries.truncate(limit);
    entries
}
