//! The append-only assignment ledger.

use chrono::Utc;
use ration_shared::{AssignmentId, UserId};
use serde::Serialize;

use crate::config::StockPolicy;
use crate::error::{Result, StoreError};
use crate::events::{EventBus, StoreEvent};
use crate::inventory::InventoryStore;
use crate::models::{NewAssignment, ProductAssignment, ProductUpdate};
use crate::sequence::IdSequence;

/// What recording an assignment did to the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StockEffect {
    /// The product's quantity was reduced to `remaining`.
    Decremented { remaining: i64 },
    /// The product is not in the inventory; the entry was recorded anyway.
    ProductMissing,
}

/// A newly recorded ledger entry and its stock side effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recorded {
    pub assignment: ProductAssignment,
    pub stock: StockEffect,
}

#[derive(Debug)]
pub struct LedgerStore {
    entries: Vec<ProductAssignment>,
    ids: IdSequence,
    stock_policy: StockPolicy,
    events: EventBus,
}

impl LedgerStore {
    pub fn new(entries: Vec<ProductAssignment>, stock_policy: StockPolicy, events: EventBus) -> Self {
        let ids = IdSequence::resume(entries.iter().map(|a| a.id.seq()));
        Self {
            entries,
            ids,
            stock_policy,
            events,
        }
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn list(&self) -> &[ProductAssignment] {
        &self.entries
    }

    pub fn list_by_recipient(&self, user_id: &UserId) -> Vec<&ProductAssignment> {
        self.entries
            .iter()
            .filter(|a| &a.recipient_id == user_id)
            .collect()
    }

    pub fn list_by_issuer(&self, issuer_id: &UserId) -> Vec<&ProductAssignment> {
        self.entries
            .iter()
            .filter(|a| &a.issuer_id == issuer_id)
            .collect()
    }

    // ------------------------------------------------------------------
    // Append
    // ------------------------------------------------------------------

    /// Append an entry, then reduce the product's stock by its quantity.
    ///
    /// A missing product does not prevent the entry from being recorded.
    /// Under [`StockPolicy::RejectOverdraw`] an overdraw of an existing
    /// product fails before anything changes, as does a decrement that
    /// would overflow the stock counter.
    pub fn create(&mut self, inventory: &mut InventoryStore, new: NewAssignment) -> Result<Recorded> {
        let on_hand = inventory.get(&new.product_id).map(|p| p.quantity);

        if let (StockPolicy::RejectOverdraw, Some(available)) = (self.stock_policy, on_hand) {
            if new.quantity > available {
                tracing::warn!(
                    product_id = %new.product_id,
                    requested = new.quantity,
                    available,
                    "assignment refused, insufficient stock"
                );
                return Err(StoreError::InsufficientStock {
                    product_id: new.product_id,
                    requested: new.quantity,
                    available,
                });
            }
        }

        let remaining = match on_hand {
            Some(available) => Some(available.checked_sub(new.quantity).ok_or_else(|| {
                StoreError::StockOverflow {
                    product_id: new.product_id.clone(),
                    requested: new.quantity,
                    available,
                }
            })?),
            None => None,
        };

        let assignment = ProductAssignment {
            id: AssignmentId::from_seq(self.ids.allocate()),
            product_id: new.product_id,
            product_name: new.product_name,
            recipient_id: new.recipient_id,
            recipient_name: new.recipient_name,
            issuer_id: new.issuer_id,
            issuer_name: new.issuer_name,
            quantity: new.quantity,
            created_at: Utc::now(),
        };
        self.entries.push(assignment.clone());
        self.events.emit(StoreEvent::AssignmentCreated {
            id: assignment.id.clone(),
        });

        let stock = match remaining {
            Some(remaining) => {
                let product =
                    inventory.update(&assignment.product_id, ProductUpdate::quantity(remaining))?;
                StockEffect::Decremented {
                    remaining: product.quantity,
                }
            }
            None => {
                tracing::warn!(
                    product_id = %assignment.product_id,
                    "assignment recorded for a product missing from inventory"
                );
                StockEffect::ProductMissing
            }
        };

        tracing::debug!(
            id = %assignment.id,
            product_id = %assignment.product_id,
            recipient = %assignment.recipient_id,
            issuer = %assignment.issuer_id,
            quantity = assignment.quantity,
            "assignment recorded"
        );

        Ok(Recorded { assignment, stock })
    }
}
