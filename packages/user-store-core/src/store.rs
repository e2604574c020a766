//! Ordered in-memory user store.

use std::sync::RwLock;

use crate::error::StoreError;
use crate::id::new_user_id;
use crate::user::{NewUser, User, UserPatch};

/// The authoritative user collection.
///
/// Records keep insertion order. Each operation takes the lock once, so a
/// single call is atomic but consecutive calls are not isolated from other
/// callers.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new user with a freshly generated id.
    ///
    /// # Arguments
    /// * `new_user` - Validated create input
    ///
    /// # Returns
    /// `Result<User, StoreError>` containing the stored record.
    pub fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockPoisoned)?;
        let user = User::from_new(new_user_id(), new_user);
        users.push(user.clone());
        tracing::debug!("Created user {} ({} total)", user.id, users.len());
        Ok(user)
    }

    /// Looks up a user by id.
    ///
    /// Any string is accepted; an id that matches no record yields `None`.
    pub fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    /// Applies a partial update in place.
    ///
    /// # Arguments
    /// * `id` - Record id
    /// * `patch` - Fields to overwrite; absent fields are kept
    ///
    /// # Returns
    /// `Result<Option<User>, StoreError>` with the updated record, or `None`
    /// if no record has this id.
    pub fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockPoisoned)?;
        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        user.apply(patch);
        tracing::debug!("Updated user {}", id);
        Ok(Some(user.clone()))
    }

    /// Removes the user with this id, returning whether a record was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::LockPoisoned)?;
        match users.iter().position(|user| user.id == id) {
            Some(index) => {
                users.remove(index);
                tracing::debug!("Deleted user {} ({} remaining)", id, users.len());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns a snapshot of every user in insertion order.
    pub fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.clone())
    }

    /// Number of stored users.
    pub fn len(&self) -> Result<usize, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(users.len())
    }

    /// True when no users are stored.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
