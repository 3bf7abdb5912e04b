use tablequery_parser::ast::{Element, QuerySpecification, TableExpression};
use tracing::debug;

use crate::options::Options;

/// SQL selecting the row id and version of every row the query matches, up to `max_limit`
/// rows. Grouping, ordering and pagination are dropped.
///
/// `None` when the query aggregates, since its rows do not correspond to table rows.
pub fn build_sql_select_row_id_and_versions(
    query: &QuerySpecification,
    max_limit: u64,
    options: &Options,
) -> Option<String> {
    if query.has_any_aggregate_elements() {
        debug!(sql = %query, "aggregate query has no row ids");
        return None;
    }
    let table_expression = TableExpression::new(query.table_name().clone())
        .with_where(query.table_expression.where_clause.clone());
    Some(format!(
        "SELECT {}, {} {} LIMIT {max_limit}",
        options.row_id_column, options.row_version_column, table_expression
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablequery_parser::parse_query;

    fn row_ids(sql: &str) -> Option<String> {
        let query = parse_query(sql).unwrap();
        build_sql_select_row_id_and_versions(&query, 1000, &Options::default())
    }

    #[test]
    fn test_row_ids() {
        assert_eq!(
            row_ids("select foo, bar from syn123 where foo = 1 order by bar limit 5 offset 10")
                .as_deref(),
            Some("SELECT ROW_ID, ROW_VERSION FROM syn123 WHERE foo = 1 LIMIT 1000")
        );
        assert_eq!(
            row_ids("select * from syn123.4").as_deref(),
            Some("SELECT ROW_ID, ROW_VERSION FROM syn123.4 LIMIT 1000")
        );
    }

    #[test]
    fn test_row_ids_of_aggregates() {
        assert_eq!(row_ids("select count(*) from syn123"), None);
        assert_eq!(row_ids("select distinct foo from syn123"), None);
        assert_eq!(row_ids("select foo from syn123 group by foo"), None);
    }

    #[test]
    fn test_row_ids_custom_columns() {
        let query = parse_query("select * from syn123").unwrap();
        let options = Options {
            row_id_column: "ID".to_string(),
            row_version_column: "VERSION".to_string(),
            max_rows_per_page: None,
        };
        assert_eq!(
            build_sql_select_row_id_and_versions(&query, 7, &options).as_deref(),
            Some("SELECT ID, VERSION FROM syn123 LIMIT 7")
        );
    }
}
