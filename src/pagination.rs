use crate::models::ListLeadsQuery;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 5;

/// A coerced page request: both values are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page >= 1 { page } else { DEFAULT_PAGE },
            limit: if limit >= 1 { limit } else { DEFAULT_LIMIT },
        }
    }

    /// Coerces raw query strings; anything missing, non-numeric or below 1 takes the default.
    pub fn from_query(query: &ListLeadsQuery) -> Self {
        Self::new(
            parse_or(query.page.as_deref(), DEFAULT_PAGE),
            parse_or(query.limit.as_deref(), DEFAULT_LIMIT),
        )
    }

    /// Number of leads skipped before this window.
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn take(&self) -> i64 {
        self.limit
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// `ceil(total / limit)`; zero when there are no leads.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListLeadsQuery {
        ListLeadsQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_when_missing() {
        assert_eq!(PageRequest::from_query(&query(None, None)), PageRequest::new(1, 5));
    }

    #[test]
    fn test_garbage_and_non_positive_fall_back() {
        assert_eq!(
            PageRequest::from_query(&query(Some("abc"), Some("0"))),
            PageRequest { page: 1, limit: 5 }
        );
        assert_eq!(
            PageRequest::from_query(&query(Some("-3"), Some(" 10 "))),
            PageRequest { page: 1, limit: 10 }
        );
    }

    #[test]
    fn test_window_arithmetic() {
        let req = PageRequest::new(3, 5);
        assert_eq!(req.skip(), 10);
        assert_eq!(req.take(), 5);
        assert_eq!(PageRequest::new(1, 10).skip(), 0);
        assert_eq!(PageRequest::new(i64::MAX, i64::MAX).skip(), i64::MAX);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(3, i64::MAX), 1);
    }
}
