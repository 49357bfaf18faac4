use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::DomainError;

pub(crate) const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Role {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) is_default: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Role {
    pub(crate) fn is_admin(&self) -> bool {
        self.name == ADMIN_ROLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Permission {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreateRoleRequest {
    pub(crate) name: String,
}

impl CreateRoleRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_role_name(&self.name)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateRoleRequest {
    pub(crate) name: Option<String>,
}

impl UpdateRoleRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = self.name.as_deref().map(normalize_role_name).transpose()?;
        Ok(Self { name })
    }
}

fn normalize_role_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_field("name", "Name is required"));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::{CreateRoleRequest, UpdateRoleRequest};

    #[test]
    fn role_name_is_trimmed_and_required() {
        let req = CreateRoleRequest {
            name: "  editor ".to_string(),
        }
        .validate()
        .expect("must be valid");
        assert_eq!(req.name, "editor");

        let blank = CreateRoleRequest {
            name: "   ".to_string(),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn update_without_name_is_a_no_op() {
        let req = UpdateRoleRequest::default().validate().expect("must be valid");
        assert!(req.name.is_none());
    }
}
