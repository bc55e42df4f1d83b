//! Customer commands: browsing, buying and purchase history.

use ration_shared::constants::CUSTOMER_RECENT_LIMIT;
use ration_shared::format::{format_currency, format_date_time};
use ration_shared::validation::{check_max_quantity, check_min_quantity, check_within_stock};
use ration_shared::{ProductId, Role};
use ration_store::{NewAssignment, Product, ProductAssignment, Recorded, StoreError, Stores};
use serde::{Deserialize, Serialize};

use super::{most_recent, require_role, total_quantity, ProfileView};
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub product_id: ProductId,
    #[serde(default = "one")]
    pub quantity: i64,
}

fn one() -> i64 {
    1
}

/// One purchase priced at the product's current MRP.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub assignment: ProductAssignment,
    /// `None` once the product has been removed from the inventory.
    pub unit_price: Option<f64>,
    pub total_price: f64,
    pub total_display: String,
    pub purchased_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDashboard {
    pub total_products: usize,
    pub total_purchased: i64,
    pub total_spent: f64,
    pub total_spent_display: String,
    pub recent: Vec<ProductAssignment>,
}

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let stores = state.stores().await;
    require_role(&stores, Role::Customer)?;
    Ok(stores.inventory.list().to_vec())
}

/// Buy from the shop.  The first shopkeeper in the directory is recorded as
/// the issuer; with no shopkeeper the customer issues to themself.
pub async fn buy(state: &AppState, request: BuyRequest) -> AppResult<Recorded> {
    let mut stores = state.stores().await;
    let me = require_role(&stores, Role::Customer)?;

    let product = stores
        .inventory
        .get(&request.product_id)
        .cloned()
        .ok_or_else(|| StoreError::ProductNotFound(request.product_id.clone()))?;
    check_min_quantity(request.quantity, 1)?;
    check_max_quantity(request.quantity)?;
    check_within_stock(request.quantity, product.quantity)?;

    let issuer = stores
        .directory
        .list_by_role(Role::Shopkeeper)
        .first()
        .map(|shop| (*shop).clone())
        .unwrap_or_else(|| me.clone());

    let recorded = stores.record_assignment(NewAssignment::between(
        &product,
        &me,
        &issuer,
        request.quantity,
    ))?;

    tracing::info!(
        id = %recorded.assignment.id,
        product = %product.name,
        quantity = request.quantity,
        "purchase recorded"
    );
    Ok(recorded)
}

pub async fn purchase_history(state: &AppState) -> AppResult<Vec<PurchaseLine>> {
    let stores = state.stores().await;
    let me = require_role(&stores, Role::Customer)?;

    Ok(stores
        .ledger
        .list_by_recipient(&me.id)
        .into_iter()
        .map(|a| price_line(&stores, a))
        .collect())
}

pub async fn dashboard(state: &AppState) -> AppResult<CustomerDashboard> {
    let stores = state.stores().await;
    let me = require_role(&stores, Role::Customer)?;
    let purchases = stores.ledger.list_by_recipient(&me.id);

    let total_purchased = total_quantity(&purchases);
    let total_spent: f64 = purchases
        .iter()
        .map(|a| price_line(&stores, a).total_price)
        .sum();

    Ok(CustomerDashboard {
        total_products: stores.inventory.list().len(),
        total_purchased,
        total_spent,
        total_spent_display: format_currency(total_spent),
        recent: most_recent(purchases, CUSTOMER_RECENT_LIMIT),
    })
}

pub async fn profile(state: &AppState) -> AppResult<ProfileView> {
    let stores = state.stores().await;
    Ok(require_role(&stores, Role::Customer)?.into())
}

// Products that no longer exist contribute nothing to the total.
fn price_line(stores: &Stores, assignment: &ProductAssignment) -> PurchaseLine {
    let unit_price = stores.inventory.get(&assignment.product_id).map(|p| p.mrp);
    let total_price = unit_price.map_or(0.0, |mrp| mrp * assignment.quantity as f64);

    PurchaseLine {
        assignment: assignment.clone(),
        unit_price,
        total_price,
        total_display: format_currency(total_price),
        purchased_at: format_date_time(&assignment.created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::admin;
    use crate::error::AppError;
    use crate::state::test_support::signed_in;
    use ration_shared::ValidationError;
    use ration_shared::constants::MAX_QUANTITY;
    use ration_shared::UserId;
    use ration_store::{Credentials, ProductUpdate, StockEffect};

    fn buy_request(product: &str, quantity: i64) -> BuyRequest {
        BuyRequest {
            product_id: ProductId::from(product),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_buy_records_purchase_from_shop() {
        let state = signed_in(Role::Customer).await;
        let recorded = buy(&state, buy_request("4", 1)).await.unwrap();

        assert_eq!(recorded.assignment.recipient_id.as_str(), "3");
        assert_eq!(recorded.assignment.issuer_name, "Shop User");
        assert_eq!(recorded.stock, StockEffect::Decremented { remaining: 49 });
    }

    #[tokio::test]
    async fn test_buy_without_shopkeeper_is_self_issued() {
        let state = signed_in(Role::Customer).await;
        state
            .stores()
            .await
            .directory
            .delete(&ration_shared::UserId::from("2"))
            .unwrap();

        let recorded = buy(&state, buy_request("1", 2)).await.unwrap();
        assert_eq!(recorded.assignment.issuer_id.as_str(), "3");
    }

    #[tokio::test]
    async fn test_buy_out_of_stock_refused() {
        let state = signed_in(Role::Customer).await;
        buy(&state, buy_request("4", 50)).await.unwrap();

        assert_eq!(
            buy(&state, buy_request("4", 1)).await,
            Err(AppError::Validation(ValidationError::QuantityExceedsStock {
                requested: 1,
                available: 0
            }))
        );
    }

    #[test]
    fn test_buy_request_defaults_to_one_unit() {
        let request: BuyRequest = serde_json::from_str(r#"{"productId":"2"}"#).unwrap();
        assert_eq!(request.quantity, 1);
    }

    #[tokio::test]
    async fn test_history_and_dashboard_totals() {
        let state = signed_in(Role::Customer).await;
        buy(&state, buy_request("3", 2)).await.unwrap();

        // Seeded 10 kg rice at 45 plus 2 kg sugar at 50.
        let history = purchase_history(&state).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].total_price, 450.0);
        assert_eq!(history[1].total_display, "₹100.00");

        let board = dashboard(&state).await.unwrap();
        assert_eq!(board.total_purchased, 12);
        assert_eq!(board.total_spent, 550.0);
        assert_eq!(board.total_spent_display, "₹550.00");
        assert_eq!(board.recent.len(), 2);
    }

    #[tokio::test]
    async fn test_removed_product_priced_at_zero() {
        let state = signed_in(Role::Customer).await;
        {
            let mut stores = state.stores().await;
            stores.logout();
            stores
                .login(&Credentials {
                    email: "admin@example.com".into(),
                    password: "password".into(),
                    role: Role::Admin,
                })
                .await
                .unwrap();
        }
        admin::delete_product(&state, ProductId::from("1")).await.unwrap();
        {
            let mut stores = state.stores().await;
            stores
                .login(&Credentials {
                    email: "customer@example.com".into(),
                    password: "password".into(),
                    role: Role::Customer,
                })
                .await
                .unwrap();
        }

        let history = purchase_history(&state).await.unwrap();
        assert_eq!(history[0].unit_price, None);
        assert_eq!(dashboard(&state).await.unwrap().total_spent, 0.0);
    }

    #[tokio::test]
    async fn test_buy_above_quantity_limit_refused() {
        let state = signed_in(Role::Customer).await;
        assert_eq!(
            buy(&state, buy_request("2", MAX_QUANTITY + 1)).await,
            Err(AppError::Validation(ValidationError::QuantityTooLarge {
                max: MAX_QUANTITY
            }))
        );
    }

    #[tokio::test]
    async fn test_dashboard_total_saturates() {
        let state = signed_in(Role::Customer).await;
        {
            let mut stores = state.stores().await;
            let wheat = ProductId::from("2");
            let product = stores
                .inventory
                .update(&wheat, ProductUpdate::quantity(i64::MAX))
                .unwrap();
            let me = stores.directory.get(&UserId::from("3")).unwrap().clone();
            let shop = stores.directory.get(&UserId::from("2")).unwrap().clone();
            for _ in 0..2 {
                stores
                    .record_assignment(NewAssignment::between(&product, &me, &shop, i64::MAX))
                    .unwrap();
            }
        }

        let board = dashboard(&state).await.unwrap();
        assert_eq!(board.total_purchased, i64::MAX);
    }
}
