use tablequery_parser::{
    ast::{Element, QuerySpecification, WhereClause},
    Parse,
};
use tracing::debug;

use crate::{errors::Result, filters::QueryFilter, rewrite::append_combined_where_clause};

use super::FacetRequestColumnModel;

/// AND together the selections of every facet except `column_to_ignore`, as `( a AND b )`.
pub fn concat_facet_search_condition_strings(
    facets: &[FacetRequestColumnModel],
    column_to_ignore: Option<&str>,
) -> Option<String> {
    concat_search_conditions(
        facets
            .iter()
            .filter(|f| Some(f.column_name()) != column_to_ignore)
            .map(|f| f.search_condition()),
    )
}

/// AND together raw condition fragments as `( a AND b )`, skipping empty ones.
pub fn concat_search_conditions<I, S>(conditions: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let conditions = conditions
        .into_iter()
        .flatten()
        .filter(|c| !c.as_ref().is_empty())
        .map(|c| c.as_ref().to_string())
        .collect::<Vec<_>>();
    if conditions.is_empty() {
        None
    } else {
        Some(format!("( {} )", conditions.join(" AND ")))
    }
}

/// Return a copy of the query with the condition ANDed into its WHERE clause.
pub fn append_search_condition_to_query_specification(
    query: &QuerySpecification,
    search_condition: Option<&str>,
) -> Result<QuerySpecification> {
    let mut copy = QuerySpecification::parse(&query.to_sql())?;
    let Some(search_condition) = search_condition else {
        return Ok(copy);
    };
    let mut builder = String::new();
    append_combined_where_clause(
        &mut builder,
        Some(search_condition),
        copy.table_expression.where_clause.as_ref(),
    );
    let where_clause = WhereClause::parse(&builder)?;
    copy.table_expression.replace_where(Some(where_clause));
    debug!(sql = %copy, "appended search condition");
    Ok(copy)
}

pub fn append_facet_search_condition_to_query_specification(
    query: &QuerySpecification,
    facets: &[FacetRequestColumnModel],
) -> Result<QuerySpecification> {
    let search_condition = concat_facet_search_condition_strings(facets, None);
    append_search_condition_to_query_specification(query, search_condition.as_deref())
}

/// An empty filter list leaves the query as it is.
pub fn append_query_filters_to_query_specification(
    query: &QuerySpecification,
    filters: &[QueryFilter],
) -> Result<QuerySpecification> {
    if filters.is_empty() {
        return append_search_condition_to_query_specification(query, None);
    }
    let search_condition = crate::filters::translate_query_filters(filters)?;
    append_search_condition_to_query_specification(query, Some(&search_condition))
}
