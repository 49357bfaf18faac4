use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::password::hash_password;
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::{NewUser, UserPatch, UserRepository};
use crate::data::{ListFilter, Page};
use crate::domain::error::DomainError;
use crate::domain::role::Role;
use crate::domain::user::{CreateUserRequest, UpdateUserRequest, User};

pub(crate) struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserService {
    pub(crate) fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    pub(crate) async fn list(&self, filter: &ListFilter) -> Result<Page<User>, DomainError> {
        let items = self.users.list_users(filter).await?;
        let total = self.users.count_users(filter.search.as_deref()).await?;
        Ok(Page { items, total })
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    pub(crate) async fn get_with_roles(&self, id: Uuid) -> Result<(User, Vec<Role>), DomainError> {
        let user = self.get(id).await?;
        let roles = self.users.roles_of(user.id).await?;
        Ok((user, roles))
    }

    pub(crate) async fn create(&self, req: CreateUserRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::conflict("Email already exists"));
        }
        if let Some(role_id) = req.role_id {
            self.require_role(role_id).await?;
        }

        let user = self
            .users
            .create_user(NewUser {
                email: req.email,
                name: req.name,
                password_hash: hash_password(&req.password)?,
                verification: None,
                email_verified_at: None,
            })
            .await?;

        if let Some(role_id) = req.role_id {
            self.users.assign_role(user.id, role_id).await?;
        }

        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub(crate) async fn update(&self, id: Uuid, req: UpdateUserRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let current = self.get(id).await?;

        if let Some(email) = &req.email
            && *email != current.email
            && self.users.find_by_email(email).await?.is_some()
        {
            return Err(DomainError::conflict("Email already exists"));
        }

        let password_hash = req.password.as_deref().map(hash_password).transpose()?;
        let patch = UserPatch {
            email: req.email,
            name: req.name,
            password_hash,
        };

        self.users
            .update_user(id, patch)
            .await?
            .ok_or_else(|| DomainError::internal("Failed to update user"))
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let user = self.get(id).await?;
        if !self.users.delete_user(user.id).await? {
            return Err(DomainError::internal("Failed to delete user"));
        }
        info!(user_id = %user.id, "user deleted");
        Ok(())
    }

    pub(crate) async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        let user = self.get(user_id).await?;
        let role = self.require_role(role_id).await?;
        self.users.assign_role(user.id, role.id).await
    }

    pub(crate) async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        let user = self.get(user_id).await?;
        let role = self.require_role(role_id).await?;
        self.users.remove_role(user.id, role.id).await
    }

    async fn require_role(&self, role_id: Uuid) -> Result<Role, DomainError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role"))
    }
}
