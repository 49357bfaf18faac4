use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Serialize;
use utoipa::{IntoParams, ToSchema};

use crate::data::ListFilter;

pub(crate) const DEFAULT_LIMIT: u32 = 10;
pub(crate) const MAX_LIMIT: u32 = 100;

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct PaginationQuery {
    /// Page number, starting at 1
    pub(crate) page: Option<String>,
    /// Items per page (1..=100)
    pub(crate) limit: Option<String>,
    /// Free-text filter
    pub(crate) search: Option<String>,
}

impl PaginationQuery {
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "search" => &mut query.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

impl<S> FromRequestParts<S> for PaginationQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(pairs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageParams {
    pub(crate) page: u32,
    pub(crate) limit: u32,
    pub(crate) search: Option<String>,
}

impl PageParams {
    pub(crate) fn from_query(query: PaginationQuery, default_limit: u32) -> Self {
        let (page, limit) = normalize(query.page.as_deref(), query.limit.as_deref(), default_limit);
        let search = query
            .search
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());
        Self {
            page,
            limit,
            search,
        }
    }

    pub(crate) fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    pub(crate) fn filter(&self) -> ListFilter {
        ListFilter {
            offset: self.offset(),
            limit: u64::from(self.limit),
            search: self.search.clone(),
        }
    }

    pub(crate) fn meta(&self, total: u64) -> PaginationMeta {
        PaginationMeta::new(self.page, self.limit, total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub(crate) struct PaginationMeta {
    pub(crate) page: u32,
    pub(crate) limit: u32,
    pub(crate) total: u64,
    #[serde(rename = "totalPages")]
    pub(crate) total_pages: u64,
}

impl PaginationMeta {
    pub(crate) fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit)),
        }
    }
}

pub(crate) fn normalize(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> (u32, u32) {
    let page = match parse_number(page).map(f64::trunc) {
        Some(value) if value >= 1.0 => value.min(f64::from(u32::MAX)) as u32,
        _ => 1,
    };

    let limit = match parse_number(limit) {
        Some(value) if value != 0.0 => value.clamp(1.0, f64::from(MAX_LIMIT)).trunc() as u32,
        _ => default_limit.clamp(1, MAX_LIMIT),
    };

    (page, limit)
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_LIMIT, PageParams, PaginationMeta, PaginationQuery, normalize};

    #[test]
    fn normalize_applies_defaults_and_bounds() {
        assert_eq!(normalize(Some("0"), Some("0"), DEFAULT_LIMIT), (1, 10));
        assert_eq!(normalize(Some("3"), Some("500"), DEFAULT_LIMIT), (3, 100));
        assert_eq!(normalize(None, None, DEFAULT_LIMIT), (1, 10));
        assert_eq!(normalize(Some("-4"), Some("-4"), DEFAULT_LIMIT), (1, 1));
        assert_eq!(normalize(Some("abc"), Some("xyz"), 25), (1, 25));
        assert_eq!(normalize(Some("2.9"), Some("7.5"), DEFAULT_LIMIT), (2, 7));
        assert_eq!(normalize(Some("NaN"), Some("Infinity"), DEFAULT_LIMIT), (1, 10));
        assert_eq!(normalize(Some("0.5"), Some("0.5"), DEFAULT_LIMIT), (1, 1));
        assert_eq!(normalize(None, Some("-0.2"), DEFAULT_LIMIT), (1, 1));
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let pairs = [
            ("page", "1"),
            ("page", "2"),
            ("search", "jane"),
            ("search", "bob"),
            ("sort", "x"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        let query = PaginationQuery::from_pairs(pairs);
        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.limit, None);
        assert_eq!(query.search.as_deref(), Some("jane"));
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(PaginationMeta::new(1, 10, 95).total_pages, 10);
        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(2, 10, 25).total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 10, 10).total_pages, 1);
    }

    #[test]
    fn page_params_compute_offset_and_trim_search() {
        let params = PageParams::from_query(
            PaginationQuery {
                page: Some("3".to_string()),
                limit: Some("20".to_string()),
                search: Some("  jane ".to_string()),
            },
            DEFAULT_LIMIT,
        );
        assert_eq!(params.offset(), 40);

        let filter = params.filter();
        assert_eq!(filter.offset, 40);
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.search.as_deref(), Some("jane"));

        let blank = PageParams::from_query(
            PaginationQuery {
                search: Some("   ".to_string()),
                ..PaginationQuery::default()
            },
            DEFAULT_LIMIT,
        );
        assert_eq!(blank.search, None);
        assert_eq!(blank.offset(), 0);
    }

    #[test]
    fn meta_serializes_camel_case_total_pages() {
        let value = serde_json::to_value(PaginationMeta::new(2, 10, 25)).expect("json");
        assert_eq!(
            value,
            serde_json::json!({ "page": 2, "limit": 10, "total": 25, "totalPages": 3 })
        );
    }
}
