//! Extra filters ANDed onto a query on behalf of the caller, independent of facets.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{msg, Error, Result},
    facets::append_value,
    rewrite::wrap_in_double_quotes,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "concreteType")]
pub enum QueryFilter {
    #[serde(
        rename = "ColumnSingleValueQueryFilter",
        alias = "org.sagebionetworks.repo.model.table.ColumnSingleValueQueryFilter"
    )]
    ColumnSingleValue(ColumnSingleValueQueryFilter),
    #[serde(
        rename = "ColumnMultiValueFunctionQueryFilter",
        alias = "org.sagebionetworks.repo.model.table.ColumnMultiValueFunctionQueryFilter"
    )]
    ColumnMultiValueFunction(ColumnMultiValueFunctionQueryFilter),
    #[serde(
        rename = "TextMatchesQueryFilter",
        alias = "org.sagebionetworks.repo.model.table.TextMatchesQueryFilter"
    )]
    TextMatches(TextMatchesQueryFilter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnSingleValueFilterOperator {
    Like,
    Equal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSingleValueQueryFilter {
    pub column_name: String,
    pub operator: ColumnSingleValueFilterOperator,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnMultiValueFunction {
    Has,
    HasLike,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMultiValueFunctionQueryFilter {
    pub column_name: String,
    pub function: ColumnMultiValueFunction,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMatchesQueryFilter {
    pub search_expression: String,
}

/// AND the filters together into a single search condition.
pub fn translate_query_filters(filters: &[QueryFilter]) -> Result<String> {
    if filters.is_empty() {
        return Err(Error::invalid_argument(msg::no_query_filters()));
    }
    let mut builder = String::new();
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            builder.push_str(" AND ");
        }
        translate_query_filter(&mut builder, filter)?;
    }
    Ok(builder)
}

pub fn translate_query_filter(builder: &mut String, filter: &QueryFilter) -> Result<()> {
    match filter {
        QueryFilter::ColumnSingleValue(f) => translate_single_value_filter(builder, f),
        QueryFilter::ColumnMultiValueFunction(f) => translate_multi_value_function_filter(builder, f),
        QueryFilter::TextMatches(f) => translate_text_matches_filter(builder, f),
    }
}

fn require_not_empty<T>(items: &[T], name: &str) -> Result<()> {
    if items.is_empty() {
        return Err(Error::invalid_argument(msg::required_not_empty(name)));
    }
    Ok(())
}

/// `("c" LIKE 'a' OR "c" LIKE 'b')`
fn translate_single_value_filter(
    builder: &mut String,
    filter: &ColumnSingleValueQueryFilter,
) -> Result<()> {
    require_not_empty(
        filter.column_name.as_bytes(),
        "ColumnSingleValueQueryFilter.columnName",
    )?;
    require_not_empty(&filter.values, "ColumnSingleValueQueryFilter.values")?;

    let column = wrap_in_double_quotes(&filter.column_name);
    let operator = match filter.operator {
        ColumnSingleValueFilterOperator::Like => " LIKE ",
        ColumnSingleValueFilterOperator::Equal => "=",
    };
    builder.push('(');
    for (i, value) in filter.values.iter().enumerate() {
        if i > 0 {
            builder.push_str(" OR ");
        }
        builder.push_str(&column);
        builder.push_str(operator);
        append_value(builder, value, None);
    }
    builder.push(')');
    Ok(())
}

/// `("c" HAS ('a', 'b'))`
fn translate_multi_value_function_filter(
    builder: &mut String,
    filter: &ColumnMultiValueFunctionQueryFilter,
) -> Result<()> {
    require_not_empty(
        filter.column_name.as_bytes(),
        "ColumnMultiValueFunctionQueryFilter.columnName",
    )?;
    require_not_empty(&filter.values, "ColumnMultiValueFunctionQueryFilter.values")?;

    let function = match filter.function {
        ColumnMultiValueFunction::Has => "HAS",
        ColumnMultiValueFunction::HasLike => "HAS_LIKE",
    };
    builder.push('(');
    builder.push_str(&wrap_in_double_quotes(&filter.column_name));
    builder.push(' ');
    builder.push_str(function);
    builder.push_str(" (");
    for (i, value) in filter.values.iter().enumerate() {
        if i > 0 {
            builder.push_str(", ");
        }
        append_value(builder, value, None);
    }
    builder.push_str("))");
    Ok(())
}

/// `(TEXT_MATCHES('expr'))`
fn translate_text_matches_filter(
    builder: &mut String,
    filter: &TextMatchesQueryFilter,
) -> Result<()> {
    require_not_empty(
        filter.search_expression.as_bytes(),
        "TextMatchesQueryFilter.searchExpression",
    )?;
    builder.push_str("(TEXT_MATCHES(");
    append_value(builder, &filter.search_expression, None);
    builder.push_str("))");
    Ok(())
}
