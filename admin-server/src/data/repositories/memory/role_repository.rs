use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{MemoryStore, conflict_if, matches_search, window};
use crate::data::ListFilter;
use crate::data::role_repository::{NewRole, RoleRepository};
use crate::domain::error::DomainError;
use crate::domain::role::{Permission, Role};
use crate::domain::user::User;

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn create_role(&self, input: NewRole) -> Result<Role, DomainError> {
        let mut state = self.lock();
        conflict_if(
            state.roles.iter().any(|role| role.name == input.name),
            "Role name already exists",
        )?;
        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: input.name,
            is_default: false,
            created_at: now,
            updated_at: now,
        };
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        Ok(self.lock().roles.iter().find(|role| role.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        Ok(self
            .lock()
            .roles
            .iter()
            .find(|role| role.name == name)
            .cloned())
    }

    async fn find_default(&self) -> Result<Option<Role>, DomainError> {
        Ok(self.lock().roles.iter().find(|role| role.is_default).cloned())
    }

    async fn list_roles(&self, filter: &ListFilter) -> Result<Vec<Role>, DomainError> {
        let mut roles: Vec<Role> = self
            .lock()
            .roles
            .iter()
            .filter(|role| matches_search(&[Some(role.name.as_str())], filter.search.as_deref()))
            .cloned()
            .collect();
        roles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(window(roles, filter.offset, filter.limit))
    }

    async fn count_roles(&self, search: Option<&str>) -> Result<u64, DomainError> {
        let count = self
            .lock()
            .roles
            .iter()
            .filter(|role| matches_search(&[Some(role.name.as_str())], search))
            .count();
        Ok(count as u64)
    }

    async fn rename_role(&self, id: Uuid, name: &str) -> Result<Option<Role>, DomainError> {
        let mut state = self.lock();
        conflict_if(
            state.roles.iter().any(|role| role.id != id && role.name == name),
            "Role name already exists",
        )?;
        let Some(role) = state.roles.iter_mut().find(|role| role.id == id) else {
            return Ok(None);
        };
        role.name = name.to_string();
        role.updated_at = Utc::now();
        Ok(Some(role.clone()))
    }

    async fn delete_role(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let before = state.roles.len();
        state.roles.retain(|role| role.id != id);
        state.role_users.retain(|(role_id, _)| *role_id != id);
        state.role_permissions.retain(|(role_id, _)| *role_id != id);
        Ok(state.roles.len() < before)
    }

    async fn users_of(&self, role_id: Uuid) -> Result<Vec<User>, DomainError> {
        let state = self.lock();
        let mut users: Vec<User> = state
            .users
            .iter()
            .filter(|r| state.role_users.contains(&(role_id, r.user.id)))
            .map(|r| r.user.clone())
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn permissions_of(&self, role_id: Uuid) -> Result<Vec<Permission>, DomainError> {
        let state = self.lock();
        let mut permissions: Vec<Permission> = state
            .permissions
            .iter()
            .filter(|p| state.role_permissions.contains(&(role_id, p.id)))
            .cloned()
            .collect();
        permissions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(permissions)
    }

    async fn find_permission(&self, id: Uuid) -> Result<Option<Permission>, DomainError> {
        Ok(self
            .lock()
            .permissions
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn assign_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        let mut state = self.lock();
        if !state.role_permissions.contains(&(role_id, permission_id)) {
            state.role_permissions.push((role_id, permission_id));
        }
        Ok(())
    }

    async fn remove_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        self.lock()
            .role_permissions
            .retain(|link| *link != (role_id, permission_id));
        Ok(())
    }
}
