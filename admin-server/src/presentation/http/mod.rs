pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod pagination;
pub(crate) mod response;
pub(crate) mod routes;
pub(crate) mod validation;
