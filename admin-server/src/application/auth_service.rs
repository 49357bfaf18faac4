use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::password::{
    DUMMY_PASSWORD_HASH, generate_verification_token, hash_password, verify_password,
};
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::{NewUser, UserRepository, VerificationToken};
use crate::domain::error::{AuthError, DomainError};
use crate::domain::role::{ADMIN_ROLE, Role};
use crate::domain::user::{LoginRequest, RegisterRequest, User, normalize_email};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::mailer::{Mailer, VerificationMail};

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Profile {
    pub(crate) user: User,
    pub(crate) roles: Vec<Role>,
}

pub(crate) struct AuthService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    jwt: Arc<JwtService>,
    mailer: Arc<dyn Mailer>,
    verification_ttl: Duration,
}

impl AuthService {
    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        jwt: Arc<JwtService>,
        mailer: Arc<dyn Mailer>,
        verification_ttl: Duration,
    ) -> Self {
        Self {
            users,
            roles,
            jwt,
            mailer,
            verification_ttl,
        }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::conflict("Email already registered"));
        }

        let verification = self.new_verification_token();
        let new_user = NewUser {
            email: req.email,
            name: req.name,
            password_hash: hash_password(&req.password)?,
            verification: Some(verification.clone()),
            email_verified_at: None,
        };
        let user = self.users.create_user(new_user).await?;

        if let Some(role) = self.roles.find_default().await? {
            self.users.assign_role(user.id, role.id).await?;
        }

        // письмо не ушло, но пользователь уже создан
        if let Err(err) = self.send_verification(&user, verification.token).await {
            warn!(user_id = %user.id, error = ?err, "failed to send verification email");
        }

        let access_token = self.issue_token(&user)?;
        Ok(AuthResult { user, access_token })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let Some(credentials) = self.users.find_by_email(&req.email).await? else {
            // одинаковое время проверки для неизвестного email и неверного пароля
            let _ = verify_password(&req.password, DUMMY_PASSWORD_HASH);
            return Err(AuthError::InvalidCredentials.into());
        };

        verify_password(&req.password, &credentials.password_hash)?;

        let access_token = self.issue_token(&credentials.user)?;
        Ok(AuthResult {
            user: credentials.user,
            access_token,
        })
    }

    pub(crate) async fn profile(&self, user_id: Uuid) -> Result<Profile, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        let roles = self.users.roles_of(user.id).await?;
        Ok(Profile { user, roles })
    }

    pub(crate) async fn verify_email(&self, token: &str) -> Result<User, DomainError> {
        let pending = self
            .users
            .find_by_verification_token(token)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        let now = Utc::now();
        if pending.expires_at.is_some_and(|expires_at| expires_at < now) {
            return Err(AuthError::TokenExpired.into());
        }
        if pending.user.is_email_verified() {
            return Err(AuthError::EmailAlreadyVerified.into());
        }

        let user = self
            .users
            .mark_email_verified(pending.user.id, now)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        info!(user_id = %user.id, "email verified");
        Ok(user)
    }

    pub(crate) async fn resend_verification(&self, user_id: Uuid) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        if user.is_email_verified() {
            return Err(AuthError::EmailAlreadyVerified.into());
        }

        let verification = self.new_verification_token();
        self.users
            .set_verification_token(user.id, verification.clone())
            .await?;

        self.send_verification(&user, verification.token)
            .await
            .map_err(|err| {
                error!(user_id = %user.id, error = ?err, "failed to resend verification email");
                DomainError::internal("Failed to send verification email")
            })
    }

    pub(crate) async fn authorize_admin(&self, user_id: Uuid) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if !user.is_email_verified() {
            return Err(AuthError::EmailNotVerified.into());
        }

        let roles = self.users.roles_of(user.id).await?;
        if !roles.iter().any(Role::is_admin) {
            return Err(AuthError::Forbidden.into());
        }
        Ok(user)
    }

    pub(crate) async fn ensure_admin(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = normalize_email(email)?;
        let now = Utc::now();

        let user = match self.users.find_by_email(&email).await? {
            Some(credentials) => credentials.user,
            None => {
                let new_user = NewUser {
                    email,
                    name: Some("Administrator".to_string()),
                    password_hash: hash_password(password)?,
                    verification: None,
                    email_verified_at: Some(now),
                };
                self.users.create_user(new_user).await?
            }
        };

        let user = if user.is_email_verified() {
            user
        } else {
            self.users
                .mark_email_verified(user.id, now)
                .await?
                .ok_or_else(|| DomainError::not_found("User"))?
        };

        let admin = self
            .roles
            .find_by_name(ADMIN_ROLE)
            .await?
            .ok_or_else(|| DomainError::internal("admin role is missing"))?;
        self.users.assign_role(user.id, admin.id).await?;

        info!(user_id = %user.id, "admin account ensured");
        Ok(user)
    }

    fn new_verification_token(&self) -> VerificationToken {
        VerificationToken {
            token: generate_verification_token(),
            expires_at: Utc::now() + self.verification_ttl,
        }
    }

    async fn send_verification(&self, user: &User, token: String) -> anyhow::Result<()> {
        self.mailer
            .send_verification(VerificationMail {
                to: user.email.clone(),
                recipient_name: user.name.clone(),
                token,
            })
            .await
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_token(user.id, &user.email)
            .map_err(|err| DomainError::unexpected("failed to issue token", err))
    }
}
