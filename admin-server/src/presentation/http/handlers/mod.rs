pub(crate) mod auth;
pub(crate) mod dto;
pub(crate) mod roles;
pub(crate) mod users;
