use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::data::role_repository::{NewRole, RoleRepository};
use crate::data::{ListFilter, Page};
use crate::domain::error::DomainError;
use crate::domain::role::{CreateRoleRequest, Permission, Role, UpdateRoleRequest};
use crate::domain::user::User;

pub(crate) struct RoleService {
    roles: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub(crate) fn new(roles: Arc<dyn RoleRepository>) -> Self {
        Self { roles }
    }

    pub(crate) async fn list(&self, filter: &ListFilter) -> Result<Page<Role>, DomainError> {
        let items = self.roles.list_roles(filter).await?;
        let total = self.roles.count_roles(filter.search.as_deref()).await?;
        Ok(Page { items, total })
    }

    pub(crate) async fn get(&self, id: Uuid) -> Result<Role, DomainError> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Role"))
    }

    pub(crate) async fn with_users(&self, id: Uuid) -> Result<(Role, Vec<User>), DomainError> {
        let role = self.get(id).await?;
        let users = self.roles.users_of(role.id).await?;
        Ok((role, users))
    }

    pub(crate) async fn with_permissions(
        &self,
        id: Uuid,
    ) -> Result<(Role, Vec<Permission>), DomainError> {
        let role = self.get(id).await?;
        let permissions = self.roles.permissions_of(role.id).await?;
        Ok((role, permissions))
    }

    pub(crate) async fn create(&self, req: CreateRoleRequest) -> Result<Role, DomainError> {
        let req = req.validate()?;
        if self.roles.find_by_name(&req.name).await?.is_some() {
            return Err(DomainError::conflict("Role name already exists"));
        }
        let role = self.roles.create_role(NewRole { name: req.name }).await?;
        info!(role_id = %role.id, role = %role.name, "role created");
        Ok(role)
    }

    pub(crate) async fn update(&self, id: Uuid, req: UpdateRoleRequest) -> Result<Role, DomainError> {
        let req = req.validate()?;
        let current = self.get(id).await?;

        let Some(name) = req.name.filter(|name| *name != current.name) else {
            return Ok(current);
        };
        if self.roles.find_by_name(&name).await?.is_some() {
            return Err(DomainError::conflict("Role name already exists"));
        }

        self.roles
            .rename_role(id, &name)
            .await?
            .ok_or_else(|| DomainError::internal("Failed to update role"))
    }

    pub(crate) async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let role = self.get(id).await?;
        if !self.roles.delete_role(role.id).await? {
            return Err(DomainError::internal("Failed to delete role"));
        }
        info!(role_id = %role.id, "role deleted");
        Ok(())
    }

    pub(crate) async fn assign_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        let role = self.get(role_id).await?;
        let permission = self.require_permission(permission_id).await?;
        self.roles.assign_permission(role.id, permission.id).await
    }

    pub(crate) async fn remove_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        let role = self.get(role_id).await?;
        let permission = self.require_permission(permission_id).await?;
        self.roles.remove_permission(role.id, permission.id).await
    }

    async fn require_permission(&self, id: Uuid) -> Result<Permission, DomainError> {
        self.roles
            .find_permission(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Permission"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::RoleService;
    use crate::data::ListFilter;
    use crate::data::repositories::memory::MemoryStore;
    use crate::domain::error::DomainError;
    use crate::domain::role::{CreateRoleRequest, UpdateRoleRequest};

    fn create(name: &str) -> CreateRoleRequest {
        CreateRoleRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_rename_guard_unique_names() {
        let roles = RoleService::new(Arc::new(MemoryStore::seeded()));

        let editor = roles.create(create(" editor ")).await.expect("create");
        assert_eq!(editor.name, "editor");

        let err = roles.create(create("admin")).await.expect_err("taken");
        assert!(matches!(err, DomainError::Conflict(ref msg) if msg == "Role name already exists"));

        let err = roles
            .update(
                editor.id,
                UpdateRoleRequest {
                    name: Some("customer".to_string()),
                },
            )
            .await
            .expect_err("rename onto existing");
        assert!(matches!(err, DomainError::Conflict(_)));

        let unchanged = roles
            .update(editor.id, UpdateRoleRequest::default())
            .await
            .expect("no-op update");
        assert_eq!(unchanged.name, "editor");

        let renamed = roles
            .update(
                editor.id,
                UpdateRoleRequest {
                    name: Some("writer".to_string()),
                },
            )
            .await
            .expect("rename");
        assert_eq!(renamed.name, "writer");
    }

    #[tokio::test]
    async fn list_filters_by_name() {
        let roles = RoleService::new(Arc::new(MemoryStore::seeded()));
        let page = roles
            .list(&ListFilter {
                offset: 0,
                limit: 10,
                search: Some("ADM".to_string()),
            })
            .await
            .expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "admin");
    }

    #[tokio::test]
    async fn permissions_can_be_assigned_and_removed() {
        let store = MemoryStore::seeded();
        let roles = RoleService::new(Arc::new(store.clone()));
        let role_id = store.role_id("customer").expect("seeded");
        let permission_id = store.permission_id("users.read").expect("seeded");

        roles
            .assign_permission(role_id, permission_id)
            .await
            .expect("assign");
        let (_, permissions) = roles.with_permissions(role_id).await.expect("get");
        assert_eq!(permissions.len(), 1);
        assert_eq!(permissions[0].name, "users.read");

        roles
            .remove_permission(role_id, permission_id)
            .await
            .expect("remove");
        let (_, permissions) = roles.with_permissions(role_id).await.expect("get");
        assert!(permissions.is_empty());

        let err = roles
            .assign_permission(role_id, Uuid::new_v4())
            .await
            .expect_err("unknown permission");
        assert!(matches!(err, DomainError::NotFound { ref resource } if resource == "Permission"));
    }

    #[tokio::test]
    async fn delete_missing_role_is_not_found() {
        let roles = RoleService::new(Arc::new(MemoryStore::seeded()));
        let err = roles.delete(Uuid::new_v4()).await.expect_err("missing");
        assert!(matches!(err, DomainError::NotFound { ref resource } if resource == "Role"));
    }
}
