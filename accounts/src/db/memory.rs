//! In-memory `UserRepository` for tests and database-less local runs.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::repository::UserRepository;
use crate::auth::{AuthError, AuthResult, NewUser, ProfileUpdate, StoredUser, User, UserId};

/// Users kept in insertion order behind a lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored password hash for `email`, if any
    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.users
            .read()
            .iter()
            .find(|u| u.user.email == email)
            .map(|u| u.password_hash.clone())
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert_user(&self, new_user: NewUser) -> AuthResult<User> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.user.email == new_user.email) {
            return Err(AuthError::EmailTaken(new_user.email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            address: new_user.address,
            created_at: Utc::now(),
        };
        users.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<StoredUser>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.user.id == user_id)
            .map(|u| u.user.clone()))
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> AuthResult<Option<User>> {
        let mut users = self.users.write();
        let Some(stored) = users.iter_mut().find(|u| u.user.id == user_id) else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            stored.user.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            stored.user.phone = phone.clone();
        }
        if let Some(address) = &update.address {
            stored.user.address = address.clone();
        }
        Ok(Some(stored.user.clone()))
    }

    async fn list_users(&self) -> AuthResult<Vec<User>> {
        Ok(self.users.read().iter().map(|u| u.user.clone()).collect())
    }
}
