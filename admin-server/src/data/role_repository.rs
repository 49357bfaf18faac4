use async_trait::async_trait;
use uuid::Uuid;

use super::ListFilter;
use crate::domain::error::DomainError;
use crate::domain::role::{Permission, Role};
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct NewRole {
    pub(crate) name: String,
}

#[async_trait]
pub(crate) trait RoleRepository: Send + Sync {
    async fn create_role(&self, input: NewRole) -> Result<Role, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    async fn find_default(&self) -> Result<Option<Role>, DomainError>;
    async fn list_roles(&self, filter: &ListFilter) -> Result<Vec<Role>, DomainError>;
    async fn count_roles(&self, search: Option<&str>) -> Result<u64, DomainError>;
    async fn rename_role(&self, id: Uuid, name: &str) -> Result<Option<Role>, DomainError>;
    async fn delete_role(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn users_of(&self, role_id: Uuid) -> Result<Vec<User>, DomainError>;
    async fn permissions_of(&self, role_id: Uuid) -> Result<Vec<Permission>, DomainError>;
    async fn find_permission(&self, id: Uuid) -> Result<Option<Permission>, DomainError>;
    async fn assign_permission(&self, role_id: Uuid, permission_id: Uuid)
    -> Result<(), DomainError>;
    async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid)
    -> Result<(), DomainError>;
}
