//! Sign-in, registration and sign-out.

use ration_shared::validation::{check_new_password, require};
use ration_store::{Credentials, RegisterData, User};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Registration form as submitted, including the confirmation field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub smart_card_number: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

pub async fn login(state: &AppState, credentials: Credentials) -> AppResult<User> {
    require("email", &credentials.email)?;
    require("password", &credentials.password)?;

    let mut stores = state.stores().await;
    Ok(stores.login(&credentials).await?)
}

/// Register a customer account and sign in as it.
pub async fn register(state: &AppState, form: RegisterForm) -> AppResult<User> {
    require("name", &form.name)?;
    require("email", &form.email)?;
    require("password", &form.password)?;
    check_new_password(&form.password, &form.confirm_password)?;

    let data = RegisterData {
        name: form.name,
        email: form.email,
        password: form.password,
        smart_card_number: form.smart_card_number,
        contact_number: form.contact_number,
        city: form.city,
    };

    let mut stores = state.stores().await;
    Ok(stores.register(data).await?)
}

pub async fn logout(state: &AppState) {
    state.stores().await.logout();
}

pub async fn whoami(state: &AppState) -> AppResult<User> {
    let stores = state.stores().await;
    let user = stores.session.current().cloned();
    user.ok_or(AppError::Unauthenticated)
}
