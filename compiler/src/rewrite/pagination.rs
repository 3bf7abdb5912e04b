use tablequery_parser::ast::{Pagination, QuerySpecification};
use tracing::debug;

/// Apply a requested page on top of the query's own pagination. The requested offset is
/// relative to the query's offset and the requested limit can only shrink the query's limit.
///
/// With neither `offset` nor `limit` the pagination is returned as is. A missing limit on
/// either side means no limit.
pub fn override_pagination(
    pagination: Option<&Pagination>,
    offset: Option<u64>,
    limit: Option<u64>,
) -> Option<Pagination> {
    if offset.is_none() && limit.is_none() {
        return pagination.cloned();
    }
    let offset_from_request = offset.unwrap_or(0);
    let limit_from_query = pagination.and_then(|p| p.limit);
    let offset_from_query = pagination.and_then(|p| p.offset).unwrap_or(0);

    let paginated_offset = offset_from_query.saturating_add(offset_from_request);
    let remaining = limit_from_query.map(|l| l.saturating_sub(offset_from_request));
    let paginated_limit = match (remaining, limit) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    Some(Pagination::new(paginated_limit, Some(paginated_offset)))
}

/// Clamp the page size to `max_rows_per_page`. A query without pagination gets the first page.
pub fn limit_max_rows_per_page(
    pagination: Option<&Pagination>,
    max_rows_per_page: Option<u64>,
) -> Option<Pagination> {
    let Some(max_rows_per_page) = max_rows_per_page else {
        return pagination.cloned();
    };
    let Some(pagination) = pagination else {
        return Some(Pagination::new(Some(max_rows_per_page), Some(0)));
    };
    match pagination.limit {
        Some(limit) if limit <= max_rows_per_page => Some(pagination.clone()),
        _ => Some(Pagination::new(Some(max_rows_per_page), pagination.offset)),
    }
}

/// Copy of the query with its pagination overridden and then clamped.
pub fn convert_to_paginated_query(
    query: &QuerySpecification,
    offset: Option<u64>,
    limit: Option<u64>,
    max_rows_per_page: Option<u64>,
) -> QuerySpecification {
    let mut query = query.clone();
    let pagination = override_pagination(query.table_expression.pagination.as_ref(), offset, limit);
    let pagination = limit_max_rows_per_page(pagination.as_ref(), max_rows_per_page);
    query.table_expression.replace_pagination(pagination);
    debug!(sql = %query, "paginated query");
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablequery_parser::{ast::Element, parse_query};

    fn page(limit: Option<u64>, offset: Option<u64>) -> Pagination {
        Pagination::new(limit, offset)
    }

    #[test]
    fn test_override_nothing_requested() {
        let pagination = page(Some(100), Some(50));
        assert_eq!(override_pagination(Some(&pagination), None, None), Some(pagination));
        assert_eq!(override_pagination(None, None, None), None);
    }

    #[test]
    fn test_override_within_query_page() {
        assert_eq!(
            override_pagination(Some(&page(Some(100), Some(50))), Some(10), Some(20)),
            Some(page(Some(20), Some(60)))
        );
    }

    #[test]
    fn test_override_offset_only() {
        assert_eq!(
            override_pagination(Some(&page(Some(34), Some(12))), Some(2), None),
            Some(page(Some(32), Some(14)))
        );
    }

    #[test]
    fn test_override_past_end_of_query_page() {
        assert_eq!(
            override_pagination(Some(&page(Some(100), Some(50))), Some(101), Some(25)),
            Some(page(Some(0), Some(151)))
        );
    }

    #[test]
    fn test_override_without_query_pagination() {
        assert_eq!(
            override_pagination(None, Some(10), Some(20)),
            Some(page(Some(20), Some(10)))
        );
        assert_eq!(override_pagination(None, Some(10), None), Some(page(None, Some(10))));
        assert_eq!(override_pagination(None, None, Some(5)), Some(page(Some(5), Some(0))));
    }

    #[test]
    fn test_limit_max_rows_per_page() {
        let pagination = page(Some(100), Some(7));
        assert_eq!(
            limit_max_rows_per_page(Some(&pagination), None),
            Some(pagination.clone())
        );
        assert_eq!(limit_max_rows_per_page(None, Some(10)), Some(page(Some(10), Some(0))));
        assert_eq!(
            limit_max_rows_per_page(Some(&pagination), Some(10)),
            Some(page(Some(10), Some(7)))
        );
        assert_eq!(
            limit_max_rows_per_page(Some(&pagination), Some(100)),
            Some(pagination)
        );
        assert_eq!(
            limit_max_rows_per_page(Some(&page(None, Some(3))), Some(10)),
            Some(page(Some(10), Some(3)))
        );
    }

    #[test]
    fn test_convert_to_paginated_query() {
        let query = parse_query("select * from syn123 limit 100 offset 50").unwrap();
        let paginated = convert_to_paginated_query(&query, Some(10), Some(20), Some(15));
        assert_eq!(paginated.to_sql(), "SELECT * FROM syn123 LIMIT 15 OFFSET 60");

        let query = parse_query("select * from syn123").unwrap();
        let paginated = convert_to_paginated_query(&query, None, None, None);
        assert_eq!(paginated.to_sql(), "SELECT * FROM syn123");
        let paginated = convert_to_paginated_query(&query, None, None, Some(25));
        assert_eq!(paginated.to_sql(), "SELECT * FROM syn123 LIMIT 25 OFFSET 0");
    }
}
