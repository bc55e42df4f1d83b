//! The authenticated session.
//!
//! Login and registration wait for a configurable delay before touching the
//! directory, simulating a round trip to a backend.  There is no hashing,
//! lockout or rate limiting: passwords are compared as plaintext.

use std::time::Duration;

use ration_shared::Role;

use crate::config::RegistrationPolicy;
use crate::directory::DirectoryStore;
use crate::error::{Result, StoreError};
use crate::events::{EventBus, StoreEvent};
use crate::models::{Credentials, RegisterData, User};

#[derive(Debug)]
pub struct SessionStore {
    current: Option<User>,
    delay: Duration,
    registration_policy: RegistrationPolicy,
    events: EventBus,
}

impl SessionStore {
    pub fn new(delay: Duration, registration_policy: RegistrationPolicy, events: EventBus) -> Self {
        Self {
            current: None,
            delay,
            registration_policy,
            events,
        }
    }

    /// Snapshot of the signed-in user, taken at login.
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub async fn login(&mut self, directory: &DirectoryStore, credentials: &Credentials) -> Result<User> {
        self.simulate_latency().await;

        tracing::info!(email = %credentials.email, role = %credentials.role, "login attempt");

        let Some(user) = directory.find_by_credentials(credentials).cloned() else {
            tracing::info!(email = %credentials.email, "login rejected");
            return Err(StoreError::InvalidCredentials);
        };

        self.set_current(Some(user.clone()));
        Ok(user)
    }

    /// Create a customer account and sign in as it.  Any role the caller
    /// had in mind is ignored.
    pub async fn register(&mut self, directory: &mut DirectoryStore, data: RegisterData) -> Result<User> {
        self.simulate_latency().await;

        if self.registration_policy == RegistrationPolicy::RejectDuplicateEmail
            && directory.has_email(Role::Customer, &data.email)
        {
            tracing::info!(email = %data.email, "registration rejected, duplicate email");
            return Err(StoreError::DuplicateEmail(data.email));
        }

        let user = directory.create(data.into_new_user());
        tracing::info!(id = %user.id, "customer registered");

        self.set_current(Some(user.clone()));
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.current {
            tracing::info!(id = %user.id, "logout");
        }
        self.set_current(None);
    }

    fn set_current(&mut self, user: Option<User>) {
        let id = user.as_ref().map(|u| u.id.clone());
        self.current = user;
        self.events.emit(StoreEvent::SessionChanged { user: id });
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
