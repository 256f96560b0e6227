//! User service

use crate::repository::Repository;
use crate::storage::CollectionStore;
use chrono::Utc;
use shared::error::AppResult;
use shared::models::{User, UserCreate, UserUpdate};
use shared::util::entity_id;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    repo: Repository<User>,
}

impl UserService {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            repo: Repository::new(store),
        }
    }

    pub fn list(&self) -> AppResult<Vec<User>> {
        self.repo.list()
    }

    pub fn get(&self, id: &str) -> AppResult<User> {
        self.repo.get_required(id)
    }

    pub fn create(&self, payload: UserCreate) -> AppResult<User> {
        payload.validate()?;
        let user = User {
            id: entity_id(),
            name: payload.name,
            email: payload.email,
            role: payload.role,
            is_active: true,
            created_at: Utc::now(),
        };
        tracing::info!(user_id = %user.id, role = ?user.role, "user created");
        self.repo.insert(user)
    }

    pub fn update(&self, id: &str, payload: UserUpdate) -> AppResult<User> {
        payload.validate()?;
        let mut user = self.repo.get_required(id)?;
        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(email) = payload.email {
            user.email = email;
        }
        if let Some(role) = payload.role {
            user.role = role;
        }
        if let Some(is_active) = payload.is_active {
            user.is_active = is_active;
        }
        self.repo.update(user)
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.repo.get_required(id)?;
        self.repo.remove(id)?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
