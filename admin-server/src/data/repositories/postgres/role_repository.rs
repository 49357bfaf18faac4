use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::user_repository::UserRow;
use super::{like_pattern, map_db_error, to_count, to_sql_int};
use crate::data::ListFilter;
use crate::data::role_repository::{NewRole, RoleRepository};
use crate::domain::error::DomainError;
use crate::domain::role::{Permission, Role};
use crate::domain::user::User;

const ROLE_COLUMNS: &str = "id, name, is_default, created_at, updated_at";
const ROLE_SEARCH: &str = "($1::TEXT IS NULL OR name ILIKE $1)";

#[derive(Debug, Clone)]
pub(crate) struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
pub(super) struct RoleRow {
    id: Uuid,
    name: String,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            is_default: row.is_default,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct PermissionRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create_role(&self, input: NewRole) -> Result<Role, DomainError> {
        let sql = format!(
            "INSERT INTO roles (id, name) VALUES ($1, $2) RETURNING {ROLE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, RoleRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1");
        let row = sqlx::query_as::<_, RoleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE name = $1");
        let row = sqlx::query_as::<_, RoleRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn find_default(&self) -> Result<Option<Role>, DomainError> {
        let sql = format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE is_default ORDER BY created_at LIMIT 1"
        );
        let row = sqlx::query_as::<_, RoleRow>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn list_roles(&self, filter: &ListFilter) -> Result<Vec<Role>, DomainError> {
        let sql = format!(
            r#"
            SELECT {ROLE_COLUMNS}
            FROM roles
            WHERE {ROLE_SEARCH}
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, RoleRow>(&sql)
            .bind(like_pattern(filter.search.as_deref()))
            .bind(to_sql_int(filter.limit))
            .bind(to_sql_int(filter.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn count_roles(&self, search: Option<&str>) -> Result<u64, DomainError> {
        let sql = format!("SELECT COUNT(*) FROM roles WHERE {ROLE_SEARCH}");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(like_pattern(search))
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(to_count(count))
    }

    async fn rename_role(&self, id: Uuid, name: &str) -> Result<Option<Role>, DomainError> {
        let sql = format!(
            r#"
            UPDATE roles
            SET name = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ROLE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, RoleRow>(&sql)
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Role::from))
    }

    async fn delete_role(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn users_of(&self, role_id: Uuid) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.name, u.email_verified_at, u.created_at, u.updated_at
            FROM users u
            JOIN role_user ru ON ru.user_id = u.id
            WHERE ru.role_id = $1
            ORDER BY u.email
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn permissions_of(&self, role_id: Uuid) -> Result<Vec<Permission>, DomainError> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT p.id, p.name, p.created_at
            FROM permissions p
            JOIN role_permission rp ON rp.permission_id = p.id
            WHERE rp.role_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Permission::from).collect())
    }

    async fn find_permission(&self, id: Uuid) -> Result<Option<Permission>, DomainError> {
        let row = sqlx::query_as::<_, PermissionRow>(
            "SELECT id, name, created_at FROM permissions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Permission::from))
    }

    async fn assign_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO role_permission (role_id, permission_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn remove_permission(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM role_permission WHERE role_id = $1 AND permission_id = $2")
            .bind(role_id)
            .bind(permission_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
