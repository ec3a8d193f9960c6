//! In-Memory Repository Implementation
//!
//! Backs tests and local runs without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use parking_lot::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// User store held in process memory
#[derive(Debug)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<i32, User>>,
    next_id: AtomicI32,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.users.write();
        if users.values().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = user.clone().into_user(UserId::from_i32(id));
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.user_name.as_str() == user_name)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self.users.read().values().any(|u| &u.user_name == user_name))
    }

    async fn any(&self) -> AuthResult<bool> {
        Ok(!self.users.read().is_empty())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write();
        let stored = users
            .get_mut(&user.user_id.value())
            .ok_or(AuthError::UserNotFound)?;
        *stored = user.clone();
        Ok(())
    }
}
