use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::dto::{UserDto, UserWithRolesDto};
use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::auth::AuthenticatedUser;
use crate::presentation::http::response::ApiResponse;
use crate::presentation::http::validation::{ValidatedJson, ValidatedQuery};

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct RegisterDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub(crate) email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub(crate) password: String,
    #[validate(
        length(min = 1, message = "Password confirmation is required"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub(crate) password_confirmation: String,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct LoginDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct VerifyEmailQuery {
    /// Token from the verification link
    #[validate(
        required(message = "Token is required"),
        length(min = 1, message = "Token is required")
    )]
    pub(crate) token: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) user: UserDto,
    pub(crate) token: String,
    pub(crate) email_verified: bool,
}

impl From<AuthResult> for AuthResponseDto {
    fn from(result: AuthResult) -> Self {
        let email_verified = result.user.is_email_verified();
        Self {
            user: result.user.into(),
            token: result.access_token,
            email_verified,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileDto {
    #[serde(flatten)]
    pub(crate) user: UserWithRolesDto,
    pub(crate) email_verified: bool,
}

#[utoipa::path(
    post,
    path = "/api/v1/auths/register",
    tag = "auths",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered; data is AuthResponseDto", body = AuthResponseDto),
        (status = 400, description = "Validation error or email already registered"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterDto>,
) -> AppResult<ApiResponse<AuthResponseDto>> {
    let req = RegisterRequest {
        email: dto.email,
        password: dto.password,
        name: dto.name,
    };

    let result = state.auth_service.register(req).await?;

    Ok(ApiResponse::created(AuthResponseDto::from(result))
        .with_message("Registration successful. Please verify your email"))
}

#[utoipa::path(
    post,
    path = "/api/v1/auths/login",
    tag = "auths",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful; data is AuthResponseDto", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> AppResult<ApiResponse<AuthResponseDto>> {
    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;

    Ok(ApiResponse::ok(AuthResponseDto::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auths/profile",
    tag = "auths",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user with roles", body = ProfileDto),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<ApiResponse<ProfileDto>> {
    let profile = state.auth_service.profile(auth.user_id).await?;
    let email_verified = profile.user.is_email_verified();

    Ok(ApiResponse::ok(ProfileDto {
        user: UserWithRolesDto::new(profile.user, profile.roles),
        email_verified,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auths/verify-email",
    tag = "auths",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Missing token or email already verified"),
        (status = 401, description = "Token invalid or expired"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn verify_email(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<VerifyEmailQuery>,
) -> AppResult<ApiResponse<()>> {
    let token = query.token.unwrap_or_default();
    state.auth_service.verify_email(&token).await?;

    Ok(ApiResponse::success("Email verified successfully"))
}

#[utoipa::path(
    post,
    path = "/api/v1/auths/resend-verification",
    tag = "auths",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Verification email sent"),
        (status = 400, description = "Email already verified"),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 500, description = "Mail delivery failed")
    )
)]
pub(crate) async fn resend_verification(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<ApiResponse<()>> {
    state.auth_service.resend_verification(auth.user_id).await?;

    Ok(ApiResponse::success("Verification email sent successfully"))
}

#[utoipa::path(
    get,
    path = "/api/v1/auths/signout",
    tag = "auths",
    responses(
        (status = 200, description = "Signed out")
    )
)]
pub(crate) async fn signout() -> ApiResponse<()> {
    ApiResponse::success("Signed out successfully")
}
