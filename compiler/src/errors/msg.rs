use crate::schema::{ColumnType, FacetType};

pub fn required(name: &str) -> String {
    format!("{name} is required.")
}

pub fn required_not_empty(name: &str) -> String {
    format!("{name} is required and must not be empty.")
}

pub fn unexpected_json_path(was: Option<&str>, expected: &str) -> String {
    format!(
        "Unexpected facet request jsonPath (Was '{}', Expected '{expected}')",
        was.unwrap_or("null")
    )
}

pub fn facet_column_name_mismatch(requested: &str, column_name: &str) -> String {
    format!("Facet request for column `{requested}` does not match column `{column_name}`.")
}

pub fn facet_request_kind_mismatch(facet_type: FacetType, column_name: &str) -> String {
    let expected = match facet_type {
        FacetType::Enumeration => "FacetColumnValuesRequest",
        FacetType::Range => "FacetColumnRangeRequest",
    };
    format!("Column `{column_name}` has facet type {facet_type} and requires a {expected}.")
}

pub fn no_list_type(column_type: ColumnType) -> String {
    format!("Column type {column_type} has no list counterpart.")
}

pub fn not_a_list_type(column_type: ColumnType) -> String {
    format!("Column type {column_type} is not a list type.")
}

pub fn not_basic_sql() -> String {
    "The SQL must be a basic query: `SELECT *` with no GROUP BY.".to_string()
}

pub fn too_many_facets(facet_count: usize, column_count: usize) -> String {
    format!("Requested {facet_count} facets but the schema only has {column_count} columns.")
}

pub fn facet_column_not_in_schema(column_name: &str) -> String {
    format!("Facet requested for column `{column_name}` which is not in the schema.")
}

pub fn column_not_faceted(column_name: &str) -> String {
    format!("Column `{column_name}` does not have a facet type.")
}

pub fn duplicate_column(column_name: &str) -> String {
    format!("Schema has more than one column named `{column_name}`.")
}

pub fn invalid_schema_json(details: &str) -> String {
    format!("Schema input is not valid JSON. {details}")
}

pub fn invalid_options_toml(details: &str) -> String {
    format!("Options are not valid TOML. {details}")
}

pub fn invalid_examples_toml(details: &str) -> String {
    format!("Example queries are not valid TOML. {details}")
}

pub fn fragment_is_not_a(expected: &str, sql: &str) -> String {
    format!("`{sql}` does not contain a {expected}.")
}

pub fn no_query_filters() -> String {
    required_not_empty("additionalFilters")
}
