use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::ValidateEmail;

use super::error::DomainError;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct User {
    pub(crate) id: Uuid,
    pub(crate) email: String,
    pub(crate) name: Option<String>,
    pub(crate) email_verified_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RegisterRequest {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) name: Option<String>,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        check_password(&self.password)?;
        Ok(Self {
            email,
            password: self.password,
            name: normalize_name(self.name),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(DomainError::invalid_field("email", "Email is required"));
        }
        if self.password.is_empty() {
            return Err(DomainError::invalid_field("password", "Password is required"));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreateUserRequest {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) name: Option<String>,
    pub(crate) role_id: Option<Uuid>,
}

impl CreateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        check_password(&self.password)?;
        Ok(Self {
            email,
            password: self.password,
            name: normalize_name(self.name),
            role_id: self.role_id,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateUserRequest {
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) name: Option<String>,
}

impl UpdateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = self.email.as_deref().map(normalize_email).transpose()?;
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        Ok(Self {
            email,
            password: self.password,
            name: normalize_name(self.name),
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::invalid_field("email", "Email is required"));
    }
    if !email.validate_email() {
        return Err(DomainError::invalid_field("email", "Invalid email format"));
    }
    Ok(email)
}

fn check_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::invalid_field(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}
