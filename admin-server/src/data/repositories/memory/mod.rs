use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::role::{Permission, Role};
use crate::domain::user::User;

mod role_repository;
mod user_repository;

#[derive(Debug, Clone)]
pub(super) struct UserRecord {
    pub(super) user: User,
    pub(super) password_hash: String,
    pub(super) verification_token: Option<String>,
    pub(super) verification_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub(super) struct MemoryState {
    pub(super) users: Vec<UserRecord>,
    pub(super) roles: Vec<Role>,
    pub(super) permissions: Vec<Permission>,
    pub(super) role_users: Vec<(Uuid, Uuid)>,
    pub(super) role_permissions: Vec<(Uuid, Uuid)>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub(crate) fn seeded() -> Self {
        let store = Self::default();
        {
            let mut state = store.lock();
            let now = Utc::now();
            for (name, is_default) in [("admin", false), ("customer", true)] {
                state.roles.push(Role {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    is_default,
                    created_at: now,
                    updated_at: now,
                });
            }
            for name in ["users.read", "users.write", "roles.read", "roles.write"] {
                state.permissions.push(Permission {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    created_at: now,
                });
            }
        }
        store
    }

    pub(crate) fn role_id(&self, name: &str) -> Option<Uuid> {
        self.lock()
            .roles
            .iter()
            .find(|role| role.name == name)
            .map(|role| role.id)
    }

    pub(crate) fn permission_id(&self, name: &str) -> Option<Uuid> {
        self.lock()
            .permissions
            .iter()
            .find(|permission| permission.name == name)
            .map(|permission| permission.id)
    }

    pub(crate) fn verification_token_of(&self, email: &str) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|record| record.user.email == email)
            .and_then(|record| record.verification_token.clone())
    }

    pub(crate) fn expire_verification_of(&self, email: &str) {
        let mut state = self.lock();
        if let Some(record) = state.users.iter_mut().find(|r| r.user.email == email) {
            record.verification_expires_at = Some(Utc::now() - chrono::Duration::hours(1));
        }
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store mutex poisoned")
    }
}

pub(super) fn matches_search(haystacks: &[Option<&str>], search: Option<&str>) -> bool {
    let Some(term) = search else {
        return true;
    };
    let term = term.to_lowercase();
    haystacks
        .iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&term))
}

pub(super) fn window<T>(items: Vec<T>, offset: u64, limit: u64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

pub(super) fn conflict_if(exists: bool, message: &str) -> Result<(), DomainError> {
    if exists {
        return Err(DomainError::conflict(message));
    }
    Ok(())
}
