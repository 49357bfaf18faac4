use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::domain::error::{DomainError, FieldErrors, ROOT_FIELD, VALIDATION_FAILED};
use crate::presentation::http::app_error::AppError;

pub(crate) const INVALID_ID_FORMAT: &str = "Invalid ID format";

const SCHEMA_LEVEL_KEY: &str = "__all__";

pub(crate) fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    collect(errors, None, &mut fields);
    fields
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, field);
        match kind {
            ValidationErrorsKind::Field(violations) => out
                .entry(path)
                .or_default()
                .extend(violations.iter().map(message_of)),
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{path}.{index}")), out);
                }
            }
        }
    }
}

fn join_path(prefix: Option<&str>, field: &str) -> String {
    match (prefix, field == SCHEMA_LEVEL_KEY) {
        (None, true) => ROOT_FIELD.to_string(),
        (None, false) => field.to_string(),
        (Some(prefix), true) => prefix.to_string(),
        (Some(prefix), false) => format!("{prefix}.{field}"),
    }
}

fn message_of(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "email" => "Invalid email format".to_string(),
        "required" => "This field is required".to_string(),
        "length" => match error.params.get("min") {
            Some(min) => format!("Must be at least {min} characters"),
            None => "Invalid length".to_string(),
        },
        "must_match" => "Values do not match".to_string(),
        code => format!("Invalid value ({code})"),
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::validation(VALIDATION_FAILED, field_errors(&errors)).into()
    }
}

fn root_error(message: impl Into<String>) -> AppError {
    DomainError::invalid_field(ROOT_FIELD, message).into()
}

#[derive(Debug, Clone)]
pub(crate) struct ValidatedJson<T>(pub(crate) T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| root_error(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ValidatedQuery<T>(pub(crate) T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| root_error(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct UuidPath<const N: usize>(pub(crate) [Uuid; N]);

impl<S, const N: usize> FromRequestParts<S> for UuidPath<N>
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| root_error(rejection.body_text()))?;

        let mut fields = FieldErrors::new();
        let mut ids = Vec::with_capacity(params.len());
        for (name, raw) in params {
            match Uuid::parse_str(&raw) {
                Ok(id) => ids.push(id),
                Err(_) => fields
                    .entry(name)
                    .or_default()
                    .push(INVALID_ID_FORMAT.to_string()),
            }
        }
        if !fields.is_empty() {
            return Err(DomainError::validation(VALIDATION_FAILED, fields).into());
        }

        let ids: [Uuid; N] = ids.try_into().map_err(|ids: Vec<Uuid>| {
            anyhow!("route has {} path parameters, extractor expects {N}", ids.len())
        })?;
        Ok(Self(ids))
    }
}
