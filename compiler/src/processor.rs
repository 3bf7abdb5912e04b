use tablequery_parser::{
    ast::{Element, QuerySpecification},
    parse_query,
};
use tracing::debug;

use crate::{
    errors::{msg, Error, Result},
    facets::{
        append_query_filters_to_query_specification, concat_facet_search_condition_strings,
        FacetColumnRequest, FacetRequestColumnModel,
    },
    filters::QueryFilter,
    rewrite::{
        append_combined_where_clause, build_sql_select_row_id_and_versions,
        convert_query_to_sorted, convert_to_paginated_query, create_count_sql, get_sort_items,
        toggle_sort, SortItem,
    },
    schema::{ColumnModel, Schema},
    Options,
};

/// Rewrites SQL for one table, given that table's schema.
pub struct TableSqlProcessor {
    options: Options,
    schema: Schema,
}

impl TableSqlProcessor {
    pub fn new(schema_json: &str, options: Options) -> Result<Self> {
        let schema = Schema::from_json(schema_json)?;
        Ok(Self { options, schema })
    }

    pub fn with_schema(schema: Schema, options: Options) -> Self {
        Self { options, schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Canonical form of the SQL.
    pub fn format(&self, sql: &str) -> Result<String> {
        Ok(parse_query(sql)?.to_sql())
    }

    /// A basic query selects `*` and does not group.
    pub fn is_basic_sql(&self, sql: &str) -> Result<bool> {
        Ok(is_basic_query(&parse_query(sql)?))
    }

    pub fn toggle_sort(&self, sql: &str, column: &str) -> Result<String> {
        Ok(toggle_sort(&parse_query(sql)?, column)?.to_sql())
    }

    pub fn get_sort_items(&self, sql: &str) -> Result<Vec<SortItem>> {
        Ok(get_sort_items(&parse_query(sql)?))
    }

    pub fn sort(&self, sql: &str, sort_items: &[SortItem]) -> Result<String> {
        Ok(convert_query_to_sorted(&parse_query(sql)?, sort_items)?.to_sql())
    }

    /// Page within the query's own pagination, clamped to the configured maximum page size.
    pub fn paginate(&self, sql: &str, offset: Option<u64>, limit: Option<u64>) -> Result<String> {
        let query = parse_query(sql)?;
        Ok(
            convert_to_paginated_query(&query, offset, limit, self.options.max_rows_per_page)
                .to_sql(),
        )
    }

    /// `None` when the query already aggregates to a single row.
    pub fn count_sql(&self, sql: &str) -> Result<Option<String>> {
        let mut query = parse_query(sql)?;
        Ok(create_count_sql(&mut query)?.then(|| query.to_sql()))
    }

    /// `None` when the query aggregates.
    pub fn row_ids_sql(&self, sql: &str, max_limit: u64) -> Result<Option<String>> {
        let query = parse_query(sql)?;
        Ok(build_sql_select_row_id_and_versions(
            &query,
            max_limit,
            &self.options,
        ))
    }

    pub fn apply_query_filters(&self, sql: &str, filters: &[QueryFilter]) -> Result<String> {
        let query = parse_query(sql)?;
        Ok(append_query_filters_to_query_specification(&query, filters)?.to_sql())
    }

    /// Narrow a basic query to the selected facet values.
    ///
    /// Every faceted column in the schema takes part, selected or not. The existing WHERE clause,
    /// ORDER BY and pagination are kept.
    pub fn generate_sql_with_facets(
        &self,
        sql: &str,
        selected_facets: &[FacetColumnRequest],
    ) -> Result<String> {
        let query = parse_query(sql)?;
        if !is_basic_query(&query) {
            return Err(Error::invalid_argument(msg::not_basic_sql()));
        }
        if self.schema.len() < selected_facets.len() {
            return Err(Error::invalid_argument(msg::too_many_facets(
                selected_facets.len(),
                self.schema.len(),
            )));
        }
        for request in selected_facets {
            self.check_faceted(request)?;
        }

        let facets = self.facet_columns(selected_facets)?;
        let search_condition = concat_facet_search_condition_strings(&facets, None);

        let table_expression = &query.table_expression;
        let mut builder = format!("SELECT * FROM {}", query.table_name());
        append_combined_where_clause(
            &mut builder,
            search_condition.as_deref(),
            table_expression.where_clause.as_ref(),
        );
        if let Some(order_by) = &table_expression.order_by_clause {
            builder.push(' ');
            builder.push_str(&order_by.to_sql());
        }
        if let Some(pagination) = table_expression.pagination.as_ref().filter(|p| !p.is_empty()) {
            builder.push(' ');
            builder.push_str(&pagination.to_sql());
        }
        // the result must still be a valid query
        parse_query(&builder)?;
        debug!(sql = %builder, facets = facets.len(), "generated sql with facets");
        Ok(builder)
    }

    fn check_faceted(&self, request: &FacetColumnRequest) -> Result<()> {
        let column_name = request.column_name();
        let column = self
            .schema
            .get_column(column_name)
            .ok_or_else(|| Error::invalid_argument(msg::facet_column_not_in_schema(column_name)))?;
        let faceted = match request.json_path() {
            None => column.facet_type.is_some(),
            Some(path) => column
                .json_sub_columns
                .iter()
                .any(|s| s.json_path == path && s.facet_type.is_some()),
        };
        if faceted {
            Ok(())
        } else {
            Err(Error::invalid_argument(msg::column_not_faceted(column_name)))
        }
    }

    /// One facet per faceted column and faceted JSON sub column, in schema order.
    fn facet_columns(
        &self,
        selected_facets: &[FacetColumnRequest],
    ) -> Result<Vec<FacetRequestColumnModel>> {
        let mut facets = Vec::new();
        for column in &self.schema.columns {
            let Some(name) = column.name.as_deref() else {
                continue;
            };
            if column.facet_type.is_some() {
                let request = find_request(selected_facets, column, None);
                facets.push(FacetRequestColumnModel::new(column, request)?);
            }
            for sub_column in column.json_sub_columns.iter().filter(|s| s.facet_type.is_some()) {
                let request = find_request(selected_facets, column, Some(&sub_column.json_path));
                facets.push(FacetRequestColumnModel::for_json_sub_column(
                    name, sub_column, request,
                )?);
            }
        }
        Ok(facets)
    }
}

fn is_basic_query(query: &QuerySpecification) -> bool {
    query.is_select_star() && query.table_expression.group_by_clause.is_none()
}

fn find_request(
    selected_facets: &[FacetColumnRequest],
    column: &ColumnModel,
    json_path: Option<&str>,
) -> Option<FacetColumnRequest> {
    selected_facets
        .iter()
        .find(|r| Some(r.column_name()) == column.name.as_deref() && r.json_path() == json_path)
        .cloned()
}
