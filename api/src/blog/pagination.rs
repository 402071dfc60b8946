use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `?page=&limit=` values. Kept as strings so that a non-numeric value
/// falls back to the default instead of rejecting the request.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

fn parse(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

impl Pagination {
    /// Absent or non-numeric values take the defaults; anything below 1 is
    /// clamped to 1 and `limit` is capped at [`MAX_LIMIT`].
    pub fn from_query(query: &ListQuery) -> Self {
        let page = parse(query.page.as_deref()).unwrap_or(DEFAULT_PAGE).max(1);
        let limit = parse(query.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        Pagination { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}
