//! Shopkeeper commands.

use std::collections::HashSet;

use ration_shared::constants::SHOPKEEPER_RECENT_LIMIT;
use ration_shared::Role;
use ration_store::{Product, ProductAssignment, Recorded, User};
use serde::Serialize;

use super::{assign, most_recent, require_role, total_quantity, AssignRequest, ProfileView};
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopkeeperDashboard {
    pub total_products: usize,
    pub total_assigned_quantity: i64,
    pub total_customers: usize,
    pub recent: Vec<ProductAssignment>,
}

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let stores = state.stores().await;
    require_role(&stores, Role::Shopkeeper)?;
    Ok(stores.inventory.list().to_vec())
}

/// Customers whose contact number contains `query`.
pub async fn search_customers(state: &AppState, query: &str) -> AppResult<Vec<User>> {
    let stores = state.stores().await;
    require_role(&stores, Role::Shopkeeper)?;
    Ok(stores
        .directory
        .search_customers_by_contact(query.trim())
        .into_iter()
        .cloned()
        .collect())
}

pub async fn assign_to_customer(state: &AppState, request: AssignRequest) -> AppResult<Recorded> {
    let mut stores = state.stores().await;
    let shopkeeper = require_role(&stores, Role::Shopkeeper)?;
    assign(&mut stores, &shopkeeper, Role::Customer, request)
}

/// Everything this shopkeeper has handed out.
pub async fn issued_history(state: &AppState) -> AppResult<Vec<ProductAssignment>> {
    let stores = state.stores().await;
    let me = require_role(&stores, Role::Shopkeeper)?;
    Ok(stores.ledger.list_by_issuer(&me.id).into_iter().cloned().collect())
}

/// Customers that received at least one assignment from this shopkeeper.
pub async fn shop_customers(state: &AppState) -> AppResult<Vec<User>> {
    let stores = state.stores().await;
    let me = require_role(&stores, Role::Shopkeeper)?;

    let served: HashSet<_> = stores
        .ledger
        .list_by_issuer(&me.id)
        .into_iter()
        .map(|a| &a.recipient_id)
        .collect();

    Ok(stores
        .directory
        .list_by_role(Role::Customer)
        .into_iter()
        .filter(|u| served.contains(&u.id))
        .cloned()
        .collect())
}

pub async fn dashboard(state: &AppState) -> AppResult<ShopkeeperDashboard> {
    let stores = state.stores().await;
    let me = require_role(&stores, Role::Shopkeeper)?;
    let issued = stores.ledger.list_by_issuer(&me.id);

    let total_assigned_quantity = total_quantity(&issued);
    let total_customers = issued
        .iter()
        .map(|a| &a.recipient_id)
        .collect::<HashSet<_>>()
        .len();

    Ok(ShopkeeperDashboard {
        total_products: stores.inventory.list().len(),
        total_assigned_quantity,
        total_customers,
        recent: most_recent(issued, SHOPKEEPER_RECENT_LIMIT),
    })
}

pub async fn profile(state: &AppState) -> AppResult<ProfileView> {
    let stores = state.stores().await;
    Ok(require_role(&stores, Role::Shopkeeper)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::auth;
    use crate::error::AppError;
    use crate::state::test_support::signed_in;
    use ration_shared::{ProductId, UserId, ValidationError};
    use ration_store::{Credentials, NewAssignment, ProductUpdate, StockEffect};

    fn to_customer(product: &str, quantity: i64) -> AssignRequest {
        AssignRequest {
            product_id: ProductId::from(product),
            recipient_id: UserId::from("3"),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_assign_to_customer() {
        let state = signed_in(Role::Shopkeeper).await;
        let recorded = assign_to_customer(&state, to_customer("3", 5)).await.unwrap();

        assert_eq!(recorded.assignment.issuer_id.as_str(), "2");
        assert_eq!(recorded.stock, StockEffect::Decremented { remaining: 70 });
        assert_eq!(issued_history(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assign_rejects_non_customer() {
        let state = signed_in(Role::Shopkeeper).await;
        let mut request = to_customer("1", 1);
        request.recipient_id = UserId::from("1");
        assert!(matches!(
            assign_to_customer(&state, request).await,
            Err(AppError::BadRequest(_))
        ));

        let mut missing = to_customer("1", 1);
        missing.recipient_id = UserId::from("42");
        assert!(matches!(
            assign_to_customer(&state, missing).await,
            Err(AppError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_assign_bounded_by_stock() {
        let state = signed_in(Role::Shopkeeper).await;
        assert_eq!(
            assign_to_customer(&state, to_customer("4", 60)).await,
            Err(AppError::Validation(ValidationError::QuantityExceedsStock {
                requested: 60,
                available: 50
            }))
        );
    }

    #[tokio::test]
    async fn test_search_customers() {
        let state = signed_in(Role::Shopkeeper).await;
        let found = search_customers(&state, " 98765432 ").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].role(), Role::Customer);
        assert!(search_customers(&state, "1111").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_and_shop_customers() {
        let state = signed_in(Role::Shopkeeper).await;
        assert!(shop_customers(&state).await.unwrap().is_empty());

        assign_to_customer(&state, to_customer("1", 3)).await.unwrap();
        assign_to_customer(&state, to_customer("2", 4)).await.unwrap();

        let board = dashboard(&state).await.unwrap();
        assert_eq!(board.total_products, 4);
        assert_eq!(board.total_assigned_quantity, 7);
        assert_eq!(board.total_customers, 1);
        assert_eq!(board.recent.len(), 2);
        assert_eq!(board.recent[0].product_name, "Wheat");

        let customers = shop_customers(&state).await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id.as_str(), "3");
    }

    #[tokio::test]
    async fn test_signed_out_is_unauthenticated() {
        let state = signed_in(Role::Shopkeeper).await;
        auth::logout(&state).await;
        assert_eq!(list_products(&state).await, Err(AppError::Unauthenticated));

        auth::login(
            &state,
            Credentials {
                email: "customer@example.com".into(),
                password: "password".into(),
                role: Role::Customer,
            },
        )
        .await
        .unwrap();
        assert_eq!(
            issued_history(&state).await,
            Err(AppError::Forbidden {
                required: Role::Shopkeeper
            })
        );
    }

    #[tokio::test]
    async fn test_dashboard_total_saturates() {
        let state = signed_in(Role::Shopkeeper).await;
        {
            let mut stores = state.stores().await;
            let product = stores
                .inventory
                .update(&ProductId::from("2"), ProductUpdate::quantity(i64::MAX))
                .unwrap();
            let customer = stores.directory.get(&UserId::from("3")).unwrap().clone();
            let me = stores.directory.get(&UserId::from("2")).unwrap().clone();
            for _ in 0..2 {
                stores
                    .record_assignment(NewAssignment::between(&product, &customer, &me, i64::MAX))
                    .unwrap();
            }
        }

        let board = dashboard(&state).await.unwrap();
        assert_eq!(board.total_assigned_quantity, i64::MAX);
        assert_eq!(board.total_customers, 1);
    }
}
