use tablequery::{
    facets::FacetColumnRequest, filters::QueryFilter, rewrite::SortItem, Options,
    TableSqlProcessor,
};
use wasm_bindgen::prelude::*;

fn processor(schema_json: &str, options_toml: Option<String>) -> Result<TableSqlProcessor, String> {
    let options = match options_toml {
        Some(toml) => Options::from_toml(&toml).map_err(|e| e.to_string())?,
        None => Options::default(),
    };
    TableSqlProcessor::new(schema_json, options).map_err(|e| e.to_string())
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn format(sql: &str) -> Result<String, String> {
    processor("[]", None)?.format(sql).map_err(|e| e.to_string())
}

/// `undefined` when the query already aggregates.
#[wasm_bindgen]
pub fn count_sql(sql: &str) -> Result<Option<String>, String> {
    processor("[]", None)?.count_sql(sql).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn paginate(
    sql: &str,
    offset: Option<u64>,
    limit: Option<u64>,
    options_toml: Option<String>,
) -> Result<String, String> {
    processor("[]", options_toml)?
        .paginate(sql, offset, limit)
        .map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn sort(sql: &str, sort_items_json: &str) -> Result<String, String> {
    let sort_items: Vec<SortItem> = from_json(sort_items_json)?;
    processor("[]", None)?.sort(sql, &sort_items).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn toggle_sort(sql: &str, column: &str) -> Result<String, String> {
    processor("[]", None)?.toggle_sort(sql, column).map_err(|e| e.to_string())
}

/// The current sorts as a JSON array of sort items.
#[wasm_bindgen]
pub fn get_sort_items(sql: &str) -> Result<String, String> {
    let sort_items = processor("[]", None)?
        .get_sort_items(sql)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&sort_items).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn generate_sql_with_facets(
    schema_json: &str,
    sql: &str,
    selected_facets_json: &str,
) -> Result<String, String> {
    let selected: Vec<FacetColumnRequest> = from_json(selected_facets_json)?;
    processor(schema_json, None)?
        .generate_sql_with_facets(sql, &selected)
        .map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn apply_query_filters(sql: &str, filters_json: &str) -> Result<String, String> {
    let filters: Vec<QueryFilter> = from_json(filters_json)?;
    processor("[]", None)?
        .apply_query_filters(sql, &filters)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_sort_round_trip() {
        let sql = toggle_sort("select * from syn123", "foo").unwrap();
        assert_eq!(sql, r#"SELECT * FROM syn123 ORDER BY "foo" ASC"#);
        assert_eq!(
            get_sort_items(&sql).unwrap(),
            r#"[{"column":"foo","direction":"ASC"}]"#
        );
    }

    #[test]
    fn test_errors_are_messages() {
        assert!(format("select from").is_err());
        assert!(sort("select * from syn123", "not json").is_err());
    }
}
