use crate::domain::error::DomainError;

pub(crate) mod role_repository;
pub(crate) mod user_repository;

pub(crate) use role_repository::PostgresRoleRepository;
pub(crate) use user_repository::PostgresUserRepository;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(super) fn map_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && let Some(code) = db_err.code()
    {
        match code.as_ref() {
            UNIQUE_VIOLATION => return DomainError::conflict(conflict_message(db_err.constraint())),
            FOREIGN_KEY_VIOLATION => {
                return DomainError::not_found(referenced_resource(db_err.constraint()));
            }
            _ => {}
        }
    }
    DomainError::unexpected("database query failed", err)
}

fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_email_key") => "Email already exists",
        Some("roles_name_key") => "Role name already exists",
        Some("permissions_name_key") => "Permission name already exists",
        _ => "Resource already exists",
    }
}

fn referenced_resource(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("role_user_role_id_fkey" | "role_permission_role_id_fkey") => "Role",
        Some("role_user_user_id_fkey") => "User",
        Some("role_permission_permission_id_fkey") => "Permission",
        _ => "Resource",
    }
}

// экранируем % и _ из поисковой строки
pub(super) fn like_pattern(search: Option<&str>) -> Option<String> {
    search.map(|term| {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}

pub(super) fn to_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

pub(super) fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
