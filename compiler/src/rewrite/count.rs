use std::collections::HashMap;

use itertools::Itertools;
use tablequery_parser::{
    ast::{Element, GroupByClause, QuerySpecification, SelectList, SetQuantifier, ValueExpression},
    Parse,
};
use tracing::debug;

use crate::errors::Result;

/// Turn the query into one which counts the rows it would return.
///
/// * `GROUP BY` counts the distinct groups.
/// * `SELECT DISTINCT` counts the distinct selected values.
/// * Anything else without aggregates counts `*`.
///
/// Returns `false` and leaves the query alone when it already aggregates down to a single row.
/// Otherwise the select list is replaced and grouping, ordering and pagination are dropped.
pub fn create_count_sql(query: &mut QuerySpecification) -> Result<bool> {
    let count = if query.has_any_aggregate_elements() {
        if let Some(group_by) = &query.table_expression.group_by_clause {
            format!(
                "COUNT(DISTINCT {})",
                create_select_from_group_by(&query.select_list, group_by)
            )
        } else if query.set_quantifier == Some(SetQuantifier::Distinct) {
            format!("COUNT(DISTINCT {})", create_select_without_as(&query.select_list))
        } else {
            debug!(sql = %query, "query is already an aggregate, not counting");
            return Ok(false);
        }
    } else {
        "COUNT(*)".to_string()
    };

    query.replace_select_list(SelectList::parse(&count)?);
    query.replace_set_quantifier(None);
    let table_expression = &mut query.table_expression;
    table_expression.replace_pagination(None);
    table_expression.replace_group_by(None);
    table_expression.replace_order_by(None);
    debug!(sql = %query, "created count query");
    Ok(true)
}

/// The grouping columns as a select list. A grouping column which names an `AS` alias is replaced
/// by the aliased expression.
pub fn create_select_from_group_by(select_list: &SelectList, group_by: &GroupByClause) -> String {
    let aliases: HashMap<String, &ValueExpression> = match select_list {
        SelectList::Star => HashMap::new(),
        SelectList::Columns(columns) => columns
            .iter()
            .filter_map(|c| {
                c.alias
                    .as_ref()
                    .map(|alias| (alias.to_sql_without_quotes(), &c.value_expression))
            })
            .collect(),
    };
    group_by
        .columns
        .iter()
        .map(|g| match aliases.get(&g.column.to_sql_without_quotes()) {
            Some(value) => value.to_sql(),
            None => g.to_sql(),
        })
        .join(", ")
}

/// The select list with every `AS` clause dropped.
pub fn create_select_without_as(select_list: &SelectList) -> String {
    match select_list {
        SelectList::Star => select_list.to_sql(),
        SelectList::Columns(columns) => columns.iter().map(|c| c.value_expression.to_sql()).join(", "),
    }
}
