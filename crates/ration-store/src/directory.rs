//! CRUD operations for [`User`] records.

use chrono::Utc;
use ration_shared::{Role, UserId};

use crate::error::{Result, StoreError};
use crate::events::{EventBus, StoreEvent};
use crate::models::{Credentials, NewUser, User, UserUpdate};
use crate::sequence::IdSequence;

/// The user directory.  One list is the only source of truth.
#[derive(Debug)]
pub struct DirectoryStore {
    users: Vec<User>,
    ids: IdSequence,
    events: EventBus,
}

impl DirectoryStore {
    pub fn new(users: Vec<User>, events: EventBus) -> Self {
        let ids = IdSequence::resume(users.iter().map(|u| u.id.seq()));
        Self { users, ids, events }
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn list_by_role(&self, role: Role) -> Vec<&User> {
        self.users.iter().filter(|u| u.role() == role).collect()
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// First user, in list order, whose email, password and role all match
    /// exactly.
    pub fn find_by_credentials(&self, credentials: &Credentials) -> Option<&User> {
        self.users.iter().find(|u| {
            u.email == credentials.email
                && u.role() == credentials.role
                && u.password == credentials.password
        })
    }

    /// Customers whose contact number contains `query`.
    pub fn search_customers_by_contact(&self, query: &str) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.role() == Role::Customer)
            .filter(|u| {
                u.contact_number
                    .as_deref()
                    .is_some_and(|contact| contact.contains(query))
            })
            .collect()
    }

    pub fn has_email(&self, role: Role, email: &str) -> bool {
        self.users
            .iter()
            .any(|u| u.role() == role && u.email == email)
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    pub fn create(&mut self, new: NewUser) -> User {
        let user = User {
            id: UserId::from_seq(self.ids.allocate()),
            name: new.name,
            email: new.email,
            password: new.password,
            profile: new.profile,
            city: new.city,
            contact_number: new.contact_number,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %user.id, role = %user.role(), "user created");
        self.users.push(user.clone());
        self.events.emit(StoreEvent::UserCreated {
            id: user.id.clone(),
        });
        user
    }

    pub fn update(&mut self, id: &UserId, changes: UserUpdate) -> Result<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;

        changes.apply(user);
        let updated = user.clone();

        tracing::debug!(id = %id, "user updated");
        self.events.emit(StoreEvent::UserUpdated { id: id.clone() });
        Ok(updated)
    }

    /// Remove the user.  Ledger entries that reference it are left alone.
    pub fn delete(&mut self, id: &UserId) -> Result<User> {
        let index = self
            .users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;

        let removed = self.users.remove(index);

        tracing::debug!(id = %id, role = %removed.role(), "user deleted");
        self.events.emit(StoreEvent::UserDeleted { id: id.clone() });
        Ok(removed)
    }
}
