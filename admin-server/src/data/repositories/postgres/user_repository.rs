use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{like_pattern, map_db_error, to_count, to_sql_int};
use crate::data::ListFilter;
use crate::data::repositories::postgres::role_repository::RoleRow;
use crate::data::user_repository::{
    NewUser, PendingVerification, UserCredentials, UserPatch, UserRepository, VerificationToken,
};
use crate::domain::error::DomainError;
use crate::domain::role::Role;
use crate::domain::user::User;

const USER_COLUMNS: &str = "id, email, name, email_verified_at, created_at, updated_at";
const USER_SEARCH: &str = "($1::TEXT IS NULL OR email ILIKE $1 OR name ILIKE $1)";

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    email_verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            email_verified_at: row.email_verified_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct UserCredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

#[derive(FromRow)]
struct PendingVerificationRow {
    #[sqlx(flatten)]
    user: UserRow,
    verification_token_expires_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let (token, expires_at) = match input.verification {
            Some(VerificationToken { token, expires_at }) => (Some(token), Some(expires_at)),
            None => (None, None),
        };
        let sql = format!(
            r#"
            INSERT INTO users (
                id, email, name, password_hash,
                verification_token, verification_token_expires_at, email_verified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(token)
            .bind(expires_at)
            .bind(input.email_verified_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserCredentialsRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(|r| UserCredentials {
            user: r.user.into(),
            password_hash: r.password_hash,
        }))
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<PendingVerification>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS}, verification_token_expires_at FROM users WHERE verification_token = $1"
        );
        let row = sqlx::query_as::<_, PendingVerificationRow>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(|r| PendingVerification {
            user: r.user.into(),
            expires_at: r.verification_token_expires_at,
        }))
    }

    async fn list_users(&self, filter: &ListFilter) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE {USER_SEARCH}
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(like_pattern(filter.search.as_deref()))
            .bind(to_sql_int(filter.limit))
            .bind(to_sql_int(filter.offset))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn count_users(&self, search: Option<&str>) -> Result<u64, DomainError> {
        let sql = format!("SELECT COUNT(*) FROM users WHERE {USER_SEARCH}");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(like_pattern(search))
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(to_count(count))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let sql = format!(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                name = COALESCE($3, name),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(patch.email)
            .bind(patch.name)
            .bind(patch.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(User::from))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token: VerificationToken,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE users
            SET verification_token = $2,
                verification_token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token.token)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn mark_email_verified(
        &self,
        id: Uuid,
        verified_at: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!(
            r#"
            UPDATE users
            SET email_verified_at = $2,
                verification_token = NULL,
                verification_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(verified_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(User::from))
    }

    async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO role_user (role_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM role_user WHERE role_id = $1 AND user_id = $2")
            .bind(role_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<Role>, DomainError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT r.id, r.name, r.is_default, r.created_at, r.updated_at
            FROM roles r
            JOIN role_user ru ON ru.role_id = r.id
            WHERE ru.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Role::from).collect())
    }
}
