use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ListFilter;
use crate::domain::error::DomainError;
use crate::domain::role::Role;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VerificationToken {
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct PendingVerification {
    pub(crate) user: User,
    pub(crate) expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) name: Option<String>,
    pub(crate) password_hash: String,
    pub(crate) verification: Option<VerificationToken>,
    pub(crate) email_verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UserPatch {
    pub(crate) email: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) password_hash: Option<String>,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<PendingVerification>, DomainError>;
    async fn list_users(&self, filter: &ListFilter) -> Result<Vec<User>, DomainError>;
    async fn count_users(&self, search: Option<&str>) -> Result<u64, DomainError>;
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, DomainError>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn set_verification_token(
        &self,
        id: Uuid,
        token: VerificationToken,
    ) -> Result<(), DomainError>;
    async fn mark_email_verified(
        &self,
        id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError>;
    async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError>;
    async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError>;
    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError>;
}
