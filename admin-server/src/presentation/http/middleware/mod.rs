pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod panic;
pub(crate) mod trace;
