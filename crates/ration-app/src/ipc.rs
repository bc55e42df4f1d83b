//! JSON command protocol used by the `ration-hub` shell.
//!
//! One request object per line in, one response object per line out:
//!
//! ```text
//! {"cmd":"login","email":"admin@example.com","password":"password","role":"admin"}
//! {"ok":true,"data":{"id":"1","name":"Admin User",...}}
//! ```

use ration_shared::{ProductId, Role, UserId};
use ration_store::{Credentials, UserUpdate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commands::admin::{self, ProductForm, ShopUserForm};
use crate::commands::auth::{self, RegisterForm};
use crate::commands::customer::{self, BuyRequest};
use crate::commands::{shopkeeper, AssignRequest};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    Login(Credentials),
    Register(RegisterForm),
    Logout,
    Whoami,

    /// Product list for whichever role is signed in.
    Products,
    /// Dashboard summary for whichever role is signed in.
    Dashboard,
    /// Profile of whichever role is signed in.
    Profile,

    CreateProduct(ProductForm),
    UpdateProduct { id: ProductId, product: ProductForm },
    DeleteProduct { id: ProductId },
    CreateShopUser(ShopUserForm),
    Users {
        #[serde(default)]
        role: Option<Role>,
    },
    UserDetails { id: UserId },
    EditUser { id: UserId, changes: UserUpdate },
    DeleteUser { id: UserId },
    AssignToShopkeeper(AssignRequest),
    AssignmentHistory,

    SearchCustomers {
        #[serde(default)]
        query: String,
    },
    AssignToCustomer(AssignRequest),
    IssuedHistory,
    ShopCustomers,

    Buy(BuyRequest),
    PurchaseHistory,

    Quit,
}

impl Request {
    /// Wire name of the command.  Logged instead of the request itself so
    /// passwords stay out of the trace output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Products => "products",
            Self::Dashboard => "dashboard",
            Self::Profile => "profile",
            Self::CreateProduct(_) => "create_product",
            Self::UpdateProduct { .. } => "update_product",
            Self::DeleteProduct { .. } => "delete_product",
            Self::CreateShopUser(_) => "create_shop_user",
            Self::Users { .. } => "users",
            Self::UserDetails { .. } => "user_details",
            Self::EditUser { .. } => "edit_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::AssignToShopkeeper(_) => "assign_to_shopkeeper",
            Self::AssignmentHistory => "assignment_history",
            Self::SearchCustomers { .. } => "search_customers",
            Self::AssignToCustomer(_) => "assign_to_customer",
            Self::IssuedHistory => "issued_history",
            Self::ShopCustomers => "shop_customers",
            Self::Buy(_) => "buy",
            Self::PurchaseHistory => "purchase_history",
            Self::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl Response {
    fn data(value: Value) -> Self {
        Self {
            ok: true,
            data: Some(value),
            error: None,
            kind: None,
        }
    }

    pub fn failure(err: &AppError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
        }
    }
}

pub fn parse(line: &str) -> AppResult<Request> {
    parse_bytes(line.as_bytes())
}

/// Parse one raw input line.  Malformed JSON and invalid UTF-8 are both
/// reported as [`AppError::BadRequest`].
pub fn parse_bytes(line: &[u8]) -> AppResult<Request> {
    serde_json::from_slice(line).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Run one request against the hub.
pub async fn dispatch(state: &AppState, request: Request) -> Response {
    tracing::debug!(cmd = request.name(), "dispatching");

    match request {
        Request::Login(credentials) => reply(auth::login(state, credentials).await),
        Request::Register(form) => reply(auth::register(state, form).await),
        Request::Logout => {
            auth::logout(state).await;
            Response::data(Value::Null)
        }
        Request::Whoami => reply(auth::whoami(state).await),

        Request::Products => match session_role(state).await {
            Ok(Role::Admin) => reply(admin::list_products(state).await),
            Ok(Role::Shopkeeper) => reply(shopkeeper::list_products(state).await),
            Ok(Role::Customer) => reply(customer::list_products(state).await),
            Err(e) => Response::failure(&e),
        },
        Request::Dashboard => match session_role(state).await {
            Ok(Role::Admin) => reply(admin::dashboard(state).await),
            Ok(Role::Shopkeeper) => reply(shopkeeper::dashboard(state).await),
            Ok(Role::Customer) => reply(customer::dashboard(state).await),
            Err(e) => Response::failure(&e),
        },
        Request::Profile => match session_role(state).await {
            Ok(Role::Admin) => reply(admin::profile(state).await),
            Ok(Role::Shopkeeper) => reply(shopkeeper::profile(state).await),
            Ok(Role::Customer) => reply(customer::profile(state).await),
            Err(e) => Response::failure(&e),
        },

        Request::CreateProduct(form) => reply(admin::create_product(state, form).await),
        Request::UpdateProduct { id, product } => {
            reply(admin::update_product(state, id, product).await)
        }
        Request::DeleteProduct { id } => reply(admin::delete_product(state, id).await),
        Request::CreateShopUser(form) => reply(admin::create_shop_user(state, form).await),
        Request::Users { role } => reply(admin::list_users(state, role).await),
        Request::UserDetails { id } => reply(admin::user_details(state, id).await),
        Request::EditUser { id, changes } => reply(admin::edit_user(state, id, changes).await),
        Request::DeleteUser { id } => reply(admin::delete_user(state, id).await),
        Request::AssignToShopkeeper(request) => {
            reply(admin::assign_to_shopkeeper(state, request).await)
        }
        Request::AssignmentHistory => reply(admin::assignment_history(state).await),

        Request::SearchCustomers { query } => {
            reply(shopkeeper::search_customers(state, &query).await)
        }
        Request::AssignToCustomer(request) => {
            reply(shopkeeper::assign_to_customer(state, request).await)
        }
        Request::IssuedHistory => reply(shopkeeper::issued_history(state).await),
        Request::ShopCustomers => reply(shopkeeper::shop_customers(state).await),

        Request::Buy(request) => reply(customer::buy(state, request).await),
        Request::PurchaseHistory => reply(customer::purchase_history(state).await),

        Request::Quit => Response::data(Value::Null),
    }
}

async fn session_role(state: &AppState) -> AppResult<Role> {
    auth::whoami(state).await.map(|user| user.role())
}

fn reply<T: Serialize>(result: AppResult<T>) -> Response {
    match result.and_then(|value| {
        serde_json::to_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
    }) {
        Ok(value) => Response::data(value),
        Err(e) => {
            tracing::debug!(error = %e, kind = e.kind(), "command failed");
            Response::failure(&e)
        }
    }
}
