use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{MemoryStore, UserRecord, conflict_if, matches_search, window};
use crate::data::ListFilter;
use crate::data::user_repository::{
    NewUser, PendingVerification, UserCredentials, UserPatch, UserRepository, VerificationToken,
};
use crate::domain::error::DomainError;
use crate::domain::role::Role;
use crate::domain::user::User;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.lock();
        conflict_if(
            state.users.iter().any(|r| r.user.email == input.email),
            "Email already exists",
        )?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            name: input.name,
            email_verified_at: input.email_verified_at,
            created_at: now,
            updated_at: now,
        };
        let (verification_token, verification_expires_at) = match input.verification {
            Some(VerificationToken { token, expires_at }) => (Some(token), Some(expires_at)),
            None => (None, None),
        };
        state.users.push(UserRecord {
            user: user.clone(),
            password_hash: input.password_hash,
            verification_token,
            verification_expires_at,
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|r| r.user.email == email)
            .map(|r| UserCredentials {
                user: r.user.clone(),
                password_hash: r.password_hash.clone(),
            }))
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<PendingVerification>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|r| r.verification_token.as_deref() == Some(token))
            .map(|r| PendingVerification {
                user: r.user.clone(),
                expires_at: r.verification_expires_at,
            }))
    }

    async fn list_users(&self, filter: &ListFilter) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self
            .lock()
            .users
            .iter()
            .filter(|r| {
                matches_search(
                    &[Some(r.user.email.as_str()), r.user.name.as_deref()],
                    filter.search.as_deref(),
                )
            })
            .map(|r| r.user.clone())
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(window(users, filter.offset, filter.limit))
    }

    async fn count_users(&self, search: Option<&str>) -> Result<u64, DomainError> {
        let count = self
            .lock()
            .users
            .iter()
            .filter(|r| matches_search(&[Some(r.user.email.as_str()), r.user.name.as_deref()], search))
            .count();
        Ok(count as u64)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let mut state = self.lock();
        if let Some(email) = &patch.email {
            conflict_if(
                state
                    .users
                    .iter()
                    .any(|r| r.user.id != id && &r.user.email == email),
                "Email already exists",
            )?;
        }
        let Some(record) = state.users.iter_mut().find(|r| r.user.id == id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            record.user.email = email;
        }
        if let Some(name) = patch.name {
            record.user.name = Some(name);
        }
        if let Some(password_hash) = patch.password_hash {
            record.password_hash = password_hash;
        }
        record.user.updated_at = Utc::now();
        Ok(Some(record.user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let before = state.users.len();
        state.users.retain(|r| r.user.id != id);
        state.role_users.retain(|(_, user_id)| *user_id != id);
        Ok(state.users.len() < before)
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token: VerificationToken,
    ) -> Result<(), DomainError> {
        if let Some(record) = self.lock().users.iter_mut().find(|r| r.user.id == id) {
            record.verification_token = Some(token.token);
            record.verification_expires_at = Some(token.expires_at);
        }
        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let mut state = self.lock();
        let Some(record) = state.users.iter_mut().find(|r| r.user.id == id) else {
            return Ok(None);
        };
        record.user.email_verified_at = Some(verified_at);
        record.verification_token = None;
        record.verification_expires_at = None;
        Ok(Some(record.user.clone()))
    }

    async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        if !state.roles.iter().any(|role| role.id == role_id) {
            return Err(DomainError::not_found("Role"));
        }
        if !state.role_users.contains(&(role_id, user_id)) {
            state.role_users.push((role_id, user_id));
        }
        Ok(())
    }

    async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        self.lock()
            .role_users
            .retain(|link| *link != (role_id, user_id));
        Ok(())
    }

    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError> {
        let state = self.lock();
        let mut roles: Vec<Role> = state
            .roles
            .iter()
            .filter(|role| state.role_users.contains(&(role.id, user_id)))
            .cloned()
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }
}
