//! CRUD operations for [`Product`] records.

use chrono::Utc;
use ration_shared::ProductId;

use crate::error::{Result, StoreError};
use crate::events::{EventBus, StoreEvent};
use crate::models::{NewProduct, Product, ProductUpdate};
use crate::sequence::IdSequence;

/// The product list, in insertion order.
#[derive(Debug)]
pub struct InventoryStore {
    products: Vec<Product>,
    ids: IdSequence,
    events: EventBus,
}

impl InventoryStore {
    pub fn new(products: Vec<Product>, events: EventBus) -> Self {
        let ids = IdSequence::resume(products.iter().map(|p| p.id.seq()));
        Self {
            products,
            ids,
            events,
        }
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    pub fn create(&mut self, new: NewProduct) -> Product {
        let product = Product {
            id: ProductId::from_seq(self.ids.allocate()),
            name: new.name,
            mrp: new.mrp,
            quantity: new.quantity,
            unit: new.unit,
            image: new.image,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %product.id, name = %product.name, "product created");
        self.products.push(product.clone());
        self.events.emit(StoreEvent::ProductCreated {
            id: product.id.clone(),
        });
        product
    }

    /// Merge `changes` into the product.  No floor is applied to quantity.
    pub fn update(&mut self, id: &ProductId, changes: ProductUpdate) -> Result<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        changes.apply(product);
        let updated = product.clone();

        tracing::debug!(id = %id, quantity = updated.quantity, "product updated");
        self.events.emit(StoreEvent::ProductUpdated { id: id.clone() });
        Ok(updated)
    }

    /// Remove every entry with this id and return the first one removed.
    pub fn delete(&mut self, id: &ProductId) -> Result<Product> {
        let removed = self
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        self.products.retain(|p| &p.id != id);

        tracing::debug!(id = %id, "product deleted");
        self.events.emit(StoreEvent::ProductDeleted { id: id.clone() });
        Ok(removed)
    }
}
