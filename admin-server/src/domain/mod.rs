pub(crate) mod error;
pub(crate) mod error_codes;
pub(crate) mod role;
pub(crate) mod user;
