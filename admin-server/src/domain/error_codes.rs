use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ErrorCode {
    Validation,
    AuthInvalidCredentials,
    AuthUnauthorized,
    AuthForbidden,
    AuthTokenExpired,
    AuthTokenInvalid,
    AuthEmailNotVerified,
    AuthEmailAlreadyVerified,
    ResourceNotFound,
    ResourceConflict,
    Internal,
}

impl ErrorCode {
    #[cfg(test)]
    pub(crate) const ALL: [ErrorCode; 11] = [
        ErrorCode::Validation,
        ErrorCode::AuthInvalidCredentials,
        ErrorCode::AuthUnauthorized,
        ErrorCode::AuthForbidden,
        ErrorCode::AuthTokenExpired,
        ErrorCode::AuthTokenInvalid,
        ErrorCode::AuthEmailNotVerified,
        ErrorCode::AuthEmailAlreadyVerified,
        ErrorCode::ResourceNotFound,
        ErrorCode::ResourceConflict,
        ErrorCode::Internal,
    ];

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::AuthInvalidCredentials => "AUTH_INVALID_CREDENTIALS",
            ErrorCode::AuthUnauthorized => "AUTH_UNAUTHORIZED",
            ErrorCode::AuthForbidden => "AUTH_FORBIDDEN",
            ErrorCode::AuthTokenExpired => "AUTH_TOKEN_EXPIRED",
            ErrorCode::AuthTokenInvalid => "AUTH_TOKEN_INVALID",
            ErrorCode::AuthEmailNotVerified => "AUTH_EMAIL_NOT_VERIFIED",
            ErrorCode::AuthEmailAlreadyVerified => "AUTH_EMAIL_ALREADY_VERIFIED",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ResourceConflict => "RESOURCE_CONFLICT",
            ErrorCode::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegistryEntry {
    pub(crate) code: &'static str,
    pub(crate) http_status: u16,
    pub(crate) type_name: &'static str,
}

// неизвестный код -> 500 / UnknownError
pub(crate) const FALLBACK_HTTP_STATUS: u16 = 500;
pub(crate) const FALLBACK_TYPE_NAME: &str = "UnknownError";

const fn entry(code: ErrorCode, http_status: u16, type_name: &'static str) -> RegistryEntry {
    RegistryEntry {
        code: code.as_str(),
        http_status,
        type_name,
    }
}

static REGISTRY: [RegistryEntry; 11] = [
    entry(ErrorCode::Validation, 400, "ValidationError"),
    entry(ErrorCode::AuthInvalidCredentials, 401, "AuthError"),
    entry(ErrorCode::AuthUnauthorized, 401, "AuthError"),
    entry(ErrorCode::AuthForbidden, 403, "AuthError"),
    entry(ErrorCode::AuthTokenExpired, 401, "AuthError"),
    entry(ErrorCode::AuthTokenInvalid, 401, "AuthError"),
    entry(ErrorCode::AuthEmailNotVerified, 403, "AuthError"),
    entry(ErrorCode::AuthEmailAlreadyVerified, 400, "AuthError"),
    entry(ErrorCode::ResourceNotFound, 404, "NotFoundError"),
    entry(ErrorCode::ResourceConflict, 400, "ConflictError"),
    entry(ErrorCode::Internal, 500, "InternalError"),
];

pub(crate) fn lookup(code: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|entry| entry.code == code)
}

pub(crate) fn http_status(code: &str) -> u16 {
    lookup(code).map_or(FALLBACK_HTTP_STATUS, |entry| entry.http_status)
}

pub(crate) fn type_name(code: &str) -> &'static str {
    lookup(code).map_or(FALLBACK_TYPE_NAME, |entry| entry.type_name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{ErrorCode, REGISTRY, http_status, lookup, type_name};

    #[test]
    fn every_code_has_exactly_one_entry() {
        for code in ErrorCode::ALL {
            let matches = REGISTRY
                .iter()
                .filter(|entry| entry.code == code.as_str())
                .count();
            assert_eq!(matches, 1, "{code} must be registered exactly once");
        }
        assert_eq!(REGISTRY.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn codes_are_unique_strings() {
        let unique: HashSet<_> = ErrorCode::ALL.iter().map(|code| code.as_str()).collect();
        assert_eq!(unique.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn statuses_stay_in_the_emitted_set() {
        let allowed = [400, 401, 403, 404, 500];
        for code in ErrorCode::ALL {
            assert!(allowed.contains(&http_status(code.as_str())), "{code}");
        }
    }

    #[test]
    fn known_codes_map_to_expected_status_and_type() {
        assert_eq!(http_status("VALIDATION_ERROR"), 400);
        assert_eq!(type_name("VALIDATION_ERROR"), "ValidationError");
        assert_eq!(http_status("AUTH_FORBIDDEN"), 403);
        assert_eq!(http_status("AUTH_EMAIL_NOT_VERIFIED"), 403);
        assert_eq!(http_status("AUTH_EMAIL_ALREADY_VERIFIED"), 400);
        assert_eq!(http_status("AUTH_TOKEN_EXPIRED"), 401);
        assert_eq!(http_status("RESOURCE_NOT_FOUND"), 404);
        assert_eq!(type_name("RESOURCE_NOT_FOUND"), "NotFoundError");
        assert_eq!(http_status("RESOURCE_CONFLICT"), 400);
        assert_eq!(type_name("RESOURCE_CONFLICT"), "ConflictError");
        assert_eq!(type_name("INTERNAL_ERROR"), "InternalError");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert!(lookup("SOMETHING_ELSE").is_none());
        assert_eq!(http_status("SOMETHING_ELSE"), 500);
        assert_eq!(type_name("SOMETHING_ELSE"), "UnknownError");
        assert_eq!(http_status(""), 500);
    }
}
