use serde::{Deserialize, Serialize};
use tablequery_parser::{
    ast::{
        Element, OrderByClause, OrderingSpecification, QuerySpecification, SortKey,
        SortSpecification, SortSpecificationList, TableExpression, ValueExpression,
    },
    Parse,
};
use tracing::debug;

use crate::errors::Result;

use super::wrap_in_double_quotes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for OrderingSpecification {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => OrderingSpecification::Asc,
            SortDirection::Desc => OrderingSpecification::Desc,
        }
    }
}

impl From<OrderingSpecification> for SortDirection {
    fn from(ordering: OrderingSpecification) -> Self {
        match ordering {
            OrderingSpecification::Asc => SortDirection::Asc,
            OrderingSpecification::Desc => SortDirection::Desc,
        }
    }
}

/// A requested sort on one column. No direction means ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortItem {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

impl SortItem {
    pub fn new(column: impl Into<String>, direction: Option<SortDirection>) -> Self {
        SortItem {
            column: column.into(),
            direction,
        }
    }
}

/// Sort key for a column name. Aggregate expressions such as `max(foo)` are used as written and
/// everything else is double quoted, since the name may contain spaces or keywords.
pub fn create_sort_key(column_name: &str) -> Result<SortKey> {
    match ValueExpression::parse(column_name) {
        Ok(value) if value.has_any_aggregate_elements() => Ok(SortKey { value }),
        _ => Ok(SortKey::parse(&wrap_in_double_quotes(column_name))?),
    }
}

/// Merge requested sorts into an ORDER BY. Requested columns come first, in request order,
/// followed by the original sorts on other columns.
///
/// An empty request returns the original clause.
pub fn convert_to_sorted_query(
    current_order_by: Option<&OrderByClause>,
    sort_items: &[SortItem],
) -> Result<Option<OrderByClause>> {
    if sort_items.is_empty() {
        return Ok(current_order_by.cloned());
    }
    let mut requested = Vec::with_capacity(sort_items.len());
    for item in sort_items {
        requested.push(SortSpecification {
            sort_key: create_sort_key(&item.column)?,
            ordering: Some(item.direction.unwrap_or(SortDirection::Asc).into()),
        });
    }
    let originals = current_order_by
        .map(|o| o.sort_specifications.items.as_slice())
        .unwrap_or_default()
        .iter()
        .filter(|original| {
            !sort_items
                .iter()
                .zip(&requested)
                .any(|(item, spec)| overrides(item, spec, original))
        })
        .cloned()
        .collect::<Vec<_>>();

    let mut items = requested;
    items.extend(originals);
    Ok(Some(OrderByClause {
        sort_specifications: SortSpecificationList { items },
    }))
}

/// A requested sort replaces an original one on the same key, whether named the same way or
/// equivalent once quoting is ignored.
fn overrides(item: &SortItem, requested: &SortSpecification, original: &SortSpecification) -> bool {
    original.sort_key.to_sql() == item.column || original.sort_key.equivalent(&requested.sort_key)
}

/// Copy of the query with requested sorts merged into its ORDER BY.
pub fn convert_query_to_sorted(
    query: &QuerySpecification,
    sort_items: &[SortItem],
) -> Result<QuerySpecification> {
    let mut query = query.clone();
    let order_by = convert_to_sorted_query(query.table_expression.order_by_clause.as_ref(), sort_items)?;
    query.table_expression.replace_order_by(order_by);
    debug!(sql = %query, "sorted query");
    Ok(query)
}

pub fn remove_order_by_clause(table_expression: &TableExpression) -> TableExpression {
    table_expression.clone().with_order_by(None)
}

/// Copy of the query sorted first by `column`. A column already sorted has its direction
/// flipped, otherwise it is sorted ascending. The remaining sorts keep their relative order.
pub fn toggle_sort(query: &QuerySpecification, column: &str) -> Result<QuerySpecification> {
    let sort_key = create_sort_key(column)?;
    let existing = query
        .table_expression
        .order_by_clause
        .as_ref()
        .map(|o| o.sort_specifications.items.as_slice())
        .unwrap_or_default();

    let current = existing
        .iter()
        .find(|s| s.sort_key.equivalent(&sort_key))
        .map(|s| s.ordering.unwrap_or(OrderingSpecification::Asc));
    let ordering = match current {
        Some(OrderingSpecification::Asc) => OrderingSpecification::Desc,
        Some(OrderingSpecification::Desc) | None => OrderingSpecification::Asc,
    };

    let mut items = vec![SortSpecification {
        sort_key: sort_key.clone(),
        ordering: Some(ordering),
    }];
    items.extend(
        existing
            .iter()
            .filter(|s| !s.sort_key.equivalent(&sort_key))
            .cloned(),
    );

    let mut query = query.clone();
    query.table_expression.replace_order_by(Some(OrderByClause {
        sort_specifications: SortSpecificationList { items },
    }));
    debug!(sql = %query, column, "toggled sort");
    Ok(query)
}

/// The current ORDER BY as sort items. Quoted column names are unquoted.
pub fn get_sort_items(query: &QuerySpecification) -> Vec<SortItem> {
    let Some(order_by) = &query.table_expression.order_by_clause else {
        return Vec::new();
    };
    order_by
        .sort_specifications
        .items
        .iter()
        .map(|spec| {
            let column = match spec.sort_key.value.as_column_reference() {
                Some(column) => column.to_sql_without_quotes(),
                None => spec.sort_key.to_sql(),
            };
            SortItem::new(column, spec.ordering.map(SortDirection::from))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablequery_parser::parse_query;

    fn order_by(sql: &str) -> OrderByClause {
        OrderByClause::parse(sql).unwrap()
    }

    #[test]
    fn test_create_sort_key() {
        let key = |c| create_sort_key(c).unwrap().to_sql();
        assert_eq!(key("foo"), r#""foo""#);
        assert_eq!(key("has space"), r#""has space""#);
        assert_eq!(key("select"), r#""select""#);
        assert_eq!(key(r#"a"b"#), r#""a""b""#);
        assert_eq!(key("max(foo)"), "MAX(foo)");
        assert_eq!(key("count(*)"), "COUNT(*)");
        assert_eq!(key("foo + 1"), r#""foo + 1""#);
    }

    #[test]
    fn test_sorted_empty_request() {
        let current = order_by("order by bar");
        assert_eq!(
            convert_to_sorted_query(Some(&current), &[]),
            Ok(Some(current))
        );
        assert_eq!(convert_to_sorted_query(None, &[]), Ok(None));
    }

    #[test]
    fn test_sorted_without_current() {
        let sorted = convert_to_sorted_query(
            None,
            &[
                SortItem::new("foo", None),
                SortItem::new("bar", Some(SortDirection::Desc)),
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(sorted.to_sql(), r#"ORDER BY "foo" ASC, "bar" DESC"#);
    }

    #[test]
    fn test_sorted_overrides_current() {
        let current = order_by("order by bar");
        let sorted = convert_to_sorted_query(
            Some(&current),
            &[
                SortItem::new("bar", Some(SortDirection::Desc)),
                SortItem::new("foo", None),
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(sorted.to_sql(), r#"ORDER BY "bar" DESC, "foo" ASC"#);
    }

    #[test]
    fn test_sorted_keeps_other_current() {
        let current = order_by("order by bar");
        let sorted = convert_to_sorted_query(
            Some(&current),
            &[
                SortItem::new("foo", None),
                SortItem::new("zoo", Some(SortDirection::Asc)),
                SortItem::new("zaa", Some(SortDirection::Desc)),
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            sorted.to_sql(),
            r#"ORDER BY "foo" ASC, "zoo" ASC, "zaa" DESC, bar"#
        );
    }

    #[test]
    fn test_sorted_aggregate() {
        let current = order_by("order by max(foo) desc, bar");
        let sorted = convert_to_sorted_query(
            Some(&current),
            &[SortItem::new("max(foo)", Some(SortDirection::Asc))],
        )
        .unwrap()
        .unwrap();
        assert_eq!(sorted.to_sql(), "ORDER BY MAX(foo) ASC, bar");
    }

    #[test]
    fn test_convert_query_to_sorted() {
        let query = parse_query("select * from syn123 where a = 1 order by b limit 4").unwrap();
        let sorted = convert_query_to_sorted(&query, &[SortItem::new("a", None)]).unwrap();
        assert_eq!(
            sorted.to_sql(),
            r#"SELECT * FROM syn123 WHERE a = 1 ORDER BY "a" ASC, b LIMIT 4"#
        );
    }

    #[test]
    fn test_remove_order_by_clause() {
        let query = parse_query("select * from syn123 where a = 1 order by b limit 4").unwrap();
        assert_eq!(
            remove_order_by_clause(&query.table_expression).to_sql(),
            "FROM syn123 WHERE a = 1 LIMIT 4"
        );
    }

    #[test]
    fn test_toggle_unsorted() {
        let query = parse_query("select * from syn123").unwrap();
        let toggled = toggle_sort(&query, "foo").unwrap();
        assert_eq!(toggled.to_sql(), r#"SELECT * FROM syn123 ORDER BY "foo" ASC"#);
        let toggled = toggle_sort(&toggled, "foo").unwrap();
        assert_eq!(toggled.to_sql(), r#"SELECT * FROM syn123 ORDER BY "foo" DESC"#);
        let toggled = toggle_sort(&toggled, "foo").unwrap();
        assert_eq!(toggled.to_sql(), r#"SELECT * FROM syn123 ORDER BY "foo" ASC"#);
    }

    #[test]
    fn test_toggle_moves_to_front() {
        let query =
            parse_query(r#"select * from syn123 order by bar desc, foo, "baz" asc limit 3"#).unwrap();
        let toggled = toggle_sort(&query, "foo").unwrap();
        assert_eq!(
            toggled.to_sql(),
            r#"SELECT * FROM syn123 ORDER BY "foo" DESC, bar DESC, "baz" ASC LIMIT 3"#
        );
        let toggled = toggle_sort(&query, "qux").unwrap();
        assert_eq!(
            toggled.to_sql(),
            r#"SELECT * FROM syn123 ORDER BY "qux" ASC, bar DESC, foo, "baz" ASC LIMIT 3"#
        );
    }

    #[test]
    fn test_get_sort_items() {
        let query =
            parse_query(r#"select * from syn123 order by "my col" desc, foo, max(bar) asc"#).unwrap();
        assert_eq!(
            get_sort_items(&query),
            vec![
                SortItem::new("my col", Some(SortDirection::Desc)),
                SortItem::new("foo", None),
                SortItem::new("MAX(bar)", Some(SortDirection::Asc)),
            ]
        );
        let query = parse_query("select * from syn123").unwrap();
        assert_eq!(get_sort_items(&query), vec![]);
    }

    #[test]
    fn test_sort_item_json() {
        let items: Vec<SortItem> =
            serde_json::from_str(r#"[{"column": "foo", "direction": "DESC"}, {"column": "bar"}]"#)
                .unwrap();
        assert_eq!(
            items,
            vec![
                SortItem::new("foo", Some(SortDirection::Desc)),
                SortItem::new("bar", None),
            ]
        );
    }
}
