//! Admin commands: inventory management, shop accounts, user directory and
//! assignments to shopkeepers.

use ration_shared::constants::DEFAULT_UNIT;
use ration_shared::validation::{
    check_max_quantity, check_min_quantity, check_price, check_unit, require,
};
use ration_shared::{ProductId, Role, UserId};
use ration_store::{
    NewProduct, NewUser, Product, ProductAssignment, ProductUpdate, Recorded, RoleProfile,
    StoreError, User, UserUpdate,
};
use serde::{Deserialize, Serialize};

use super::{assign, require_role, AssignRequest, ProfileView};
use crate::error::AppResult;
use crate::state::AppState;

/// Product form, used for both create and edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub mrp: f64,
    pub quantity: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl ProductForm {
    fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        check_price(self.mrp)?;
        check_min_quantity(self.quantity, 0)?;
        check_max_quantity(self.quantity)?;
        check_unit(&self.unit)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShopUserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub aadhar_number: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_products: usize,
    pub shopkeepers: usize,
    pub customers: usize,
    pub assignments: usize,
}

/// A user together with everything assigned to them.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user: User,
    pub assignments: Vec<ProductAssignment>,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    Ok(stores.inventory.list().to_vec())
}

pub async fn create_product(state: &AppState, form: ProductForm) -> AppResult<Product> {
    let mut stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    form.validate()?;

    Ok(stores.inventory.create(NewProduct {
        name: form.name,
        mrp: form.mrp,
        quantity: form.quantity,
        unit: form.unit,
        image: form.image,
    }))
}

pub async fn update_product(state: &AppState, id: ProductId, form: ProductForm) -> AppResult<Product> {
    let mut stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    form.validate()?;

    let changes = ProductUpdate {
        name: Some(form.name),
        mrp: Some(form.mrp),
        quantity: Some(form.quantity),
        unit: Some(form.unit),
        image: form.image,
    };
    Ok(stores.inventory.update(&id, changes)?)
}

pub async fn delete_product(state: &AppState, id: ProductId) -> AppResult<Product> {
    let mut stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    Ok(stores.inventory.delete(&id)?)
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Create a shopkeeper account.  The admin stays signed in.
pub async fn create_shop_user(state: &AppState, form: ShopUserForm) -> AppResult<User> {
    let mut stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    require("name", &form.name)?;
    require("email", &form.email)?;
    require("password", &form.password)?;
    require("aadharNumber", &form.aadhar_number)?;

    let user = stores.directory.create(NewUser {
        name: form.name,
        email: form.email,
        password: form.password,
        profile: RoleProfile::Shopkeeper {
            aadhar_number: Some(form.aadhar_number),
        },
        city: form.city.filter(|c| !c.is_empty()),
        contact_number: form.contact_number.filter(|c| !c.is_empty()),
    });
    tracing::info!(id = %user.id, "shopkeeper account created");
    Ok(user)
}

/// All users, or only those holding `role`.
pub async fn list_users(state: &AppState, role: Option<Role>) -> AppResult<Vec<User>> {
    let stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    Ok(match role {
        Some(role) => stores.directory.list_by_role(role).into_iter().cloned().collect(),
        None => stores.directory.list().to_vec(),
    })
}

pub async fn user_details(state: &AppState, id: UserId) -> AppResult<UserDetails> {
    let stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    let user = stores
        .directory
        .get(&id)
        .cloned()
        .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;
    let assignments = stores.ledger.list_by_recipient(&id).into_iter().cloned().collect();
    Ok(UserDetails { user, assignments })
}

pub async fn edit_user(state: &AppState, id: UserId, changes: UserUpdate) -> AppResult<User> {
    let mut stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    if let Some(name) = &changes.name {
        require("name", name)?;
    }
    if let Some(email) = &changes.email {
        require("email", email)?;
    }
    Ok(stores.directory.update(&id, changes)?)
}

/// Remove a user.  Their ledger history stays as it is.
pub async fn delete_user(state: &AppState, id: UserId) -> AppResult<User> {
    let mut stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    let removed = stores.directory.delete(&id)?;
    tracing::info!(id = %removed.id, role = %removed.role(), "user removed by admin");
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

pub async fn assign_to_shopkeeper(state: &AppState, request: AssignRequest) -> AppResult<Recorded> {
    let mut stores = state.stores().await;
    let admin = require_role(&stores, Role::Admin)?;
    assign(&mut stores, &admin, Role::Shopkeeper, request)
}

pub async fn assignment_history(state: &AppState) -> AppResult<Vec<ProductAssignment>> {
    let stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    Ok(stores.ledger.list().to_vec())
}

pub async fn dashboard(state: &AppState) -> AppResult<AdminDashboard> {
    let stores = state.stores().await;
    require_role(&stores, Role::Admin)?;
    Ok(AdminDashboard {
        total_products: stores.inventory.list().len(),
        shopkeepers: stores.directory.list_by_role(Role::Shopkeeper).len(),
        customers: stores.directory.list_by_role(Role::Customer).len(),
        assignments: stores.ledger.list().len(),
    })
}

pub async fn profile(state: &AppState) -> AppResult<ProfileView> {
    let stores = state.stores().await;
    Ok(require_role(&stores, Role::Admin)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::state::test_support::signed_in;
    use ration_shared::constants::MAX_QUANTITY;
    use ration_shared::ValidationError;

    fn dal() -> ProductForm {
        ProductForm {
            name: "Dal".into(),
            mrp: 95.0,
            quantity: 40,
            unit: "kg".into(),
            image: None,
        }
    }

    fn to_shop(product: &str, quantity: i64) -> AssignRequest {
        AssignRequest {
            product_id: ProductId::from(product),
            recipient_id: UserId::from("2"),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_product_lifecycle() {
        let state = signed_in(Role::Admin).await;
        let created = create_product(&state, dal()).await.unwrap();
        assert_eq!(created.id.as_str(), "5");

        let mut edit = dal();
        edit.quantity = 35;
        let updated = update_product(&state, created.id.clone(), edit).await.unwrap();
        assert_eq!(updated.quantity, 35);

        delete_product(&state, created.id.clone()).await.unwrap();
        assert_eq!(
            delete_product(&state, created.id.clone()).await,
            Err(AppError::Store(StoreError::ProductNotFound(created.id)))
        );
        assert_eq!(list_products(&state).await.unwrap().len(), 4);
    }

    #[test]
    fn test_product_form_unit_defaults_to_kg() {
        let form: ProductForm =
            serde_json::from_str(r#"{"name":"Dal","mrp":90.0,"quantity":20}"#).unwrap();
        assert_eq!(form.unit, "kg");
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn test_product_form_validation() {
        let state = signed_in(Role::Admin).await;
        let mut form = dal();
        form.unit = "bushel".into();
        assert_eq!(
            create_product(&state, form).await,
            Err(AppError::Validation(ValidationError::UnsupportedUnit("bushel".into())))
        );

        let mut form = dal();
        form.mrp = -1.0;
        assert!(create_product(&state, form).await.is_err());

        let mut form = dal();
        form.quantity = MAX_QUANTITY + 1;
        assert_eq!(
            create_product(&state, form).await,
            Err(AppError::Validation(ValidationError::QuantityTooLarge {
                max: MAX_QUANTITY
            }))
        );
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let state = signed_in(Role::Customer).await;
        assert_eq!(
            create_product(&state, dal()).await,
            Err(AppError::Forbidden {
                required: Role::Admin
            })
        );
        assert_eq!(state.stores().await.inventory.list().len(), 4);
    }

    #[tokio::test]
    async fn test_create_shop_user() {
        let state = signed_in(Role::Admin).await;
        let shop = create_shop_user(
            &state,
            ShopUserForm {
                name: "Ration Shop 2".into(),
                email: "shop2@example.com".into(),
                password: "password".into(),
                aadhar_number: "111122223333".into(),
                city: Some("Pune".into()),
                contact_number: Some(String::new()),
            },
        )
        .await
        .unwrap();

        assert_eq!(shop.role(), Role::Shopkeeper);
        assert_eq!(shop.aadhar_number(), Some("111122223333"));
        assert_eq!(shop.contact_number, None);
        assert_eq!(list_users(&state, Some(Role::Shopkeeper)).await.unwrap().len(), 2);
        // The admin is still the session user.
        assert_eq!(profile(&state).await.unwrap().user.id.as_str(), "1");
    }

    #[tokio::test]
    async fn test_shop_user_requires_aadhar() {
        let state = signed_in(Role::Admin).await;
        let err = create_shop_user(
            &state,
            ShopUserForm {
                name: "No Id".into(),
                email: "noid@example.com".into(),
                password: "password".into(),
                ..ShopUserForm::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            AppError::Validation(ValidationError::MissingField("aadharNumber"))
        );
    }

    #[tokio::test]
    async fn test_assign_to_shopkeeper() {
        let state = signed_in(Role::Admin).await;
        let recorded = assign_to_shopkeeper(&state, to_shop("2", 25)).await.unwrap();

        assert_eq!(recorded.assignment.recipient_name, "Shop User");
        assert_eq!(recorded.assignment.issuer_name, "Admin User");
        assert_eq!(assignment_history(&state).await.unwrap().len(), 2);
        let wheat = state
            .stores()
            .await
            .inventory
            .get(&ProductId::from("2"))
            .cloned()
            .unwrap();
        assert_eq!(wheat.quantity, 125);
    }

    #[tokio::test]
    async fn test_assign_checks_recipient_and_quantity() {
        let state = signed_in(Role::Admin).await;

        let mut to_customer = to_shop("1", 5);
        to_customer.recipient_id = UserId::from("3");
        assert!(matches!(
            assign_to_shopkeeper(&state, to_customer).await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(
            assign_to_shopkeeper(&state, to_shop("1", 0)).await,
            Err(AppError::Validation(ValidationError::QuantityTooSmall { min: 1 }))
        );
        assert_eq!(
            assign_to_shopkeeper(&state, to_shop("4", 51)).await,
            Err(AppError::Validation(ValidationError::QuantityExceedsStock {
                requested: 51,
                available: 50
            }))
        );
        assert_eq!(assignment_history(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_keeps_history() {
        let state = signed_in(Role::Admin).await;
        let before = user_details(&state, UserId::from("3")).await.unwrap();
        assert_eq!(before.assignments.len(), 1);

        delete_user(&state, UserId::from("3")).await.unwrap();

        assert!(user_details(&state, UserId::from("3")).await.is_err());
        assert_eq!(assignment_history(&state).await.unwrap(), before.assignments);
    }

    #[tokio::test]
    async fn test_edit_user() {
        let state = signed_in(Role::Admin).await;
        let updated = edit_user(
            &state,
            UserId::from("2"),
            UserUpdate {
                city: Some("Noida".into()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.city.as_deref(), Some("Noida"));
        assert_eq!(updated.role(), Role::Shopkeeper);

        let blank_name = UserUpdate {
            name: Some(" ".into()),
            ..UserUpdate::default()
        };
        assert!(edit_user(&state, UserId::from("2"), blank_name).await.is_err());
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let state = signed_in(Role::Admin).await;
        assert_eq!(
            dashboard(&state).await.unwrap(),
            AdminDashboard {
                total_products: 4,
                shopkeepers: 1,
                customers: 1,
                assignments: 1,
            }
        );
    }
}
