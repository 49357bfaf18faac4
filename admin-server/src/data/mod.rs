pub(crate) mod repositories;
pub(crate) mod role_repository;
pub(crate) mod user_repository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListFilter {
    pub(crate) offset: u64,
    pub(crate) limit: u64,
    pub(crate) search: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: u64,
}
