use crate::{
    constants::{JSON_EXTRACT, NULL_VALUE_KEYWORD},
    errors::{msg, Error, Result},
    rewrite::wrap_in_double_quotes,
    schema::{ColumnModel, ColumnType, FacetType, JsonSubColumnModel},
};

use super::{FacetColumnRangeRequest, FacetColumnRequest, FacetColumnValuesRequest};

/// A faceted column paired with the user's selection for it, validated against each other. The
/// resulting search condition is computed once on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetRequestColumnModel {
    column_name: String,
    json_path: Option<String>,
    facet_type: FacetType,
    facet_column_request: Option<FacetColumnRequest>,
    search_condition: Option<String>,
}

impl FacetRequestColumnModel {
    pub fn new(
        column_model: &ColumnModel,
        facet_column_request: Option<FacetColumnRequest>,
    ) -> Result<Self> {
        let column_name = column_model
            .name
            .as_deref()
            .ok_or_else(|| Error::invalid_argument(msg::required("columnModel.name")))?;
        let facet_type = column_model
            .facet_type
            .ok_or_else(|| Error::invalid_argument(msg::required("columnModel.facetType")))?;
        let column_type = column_model
            .column_type
            .ok_or_else(|| Error::invalid_argument(msg::required("columnModel.columnType")))?;
        if let Some(request) = &facet_column_request {
            check_request(column_name, facet_type, request)?;
        }
        let search_condition = create_facet_search_condition(
            facet_column_request.as_ref(),
            column_type.is_list(),
            None,
        );
        Ok(FacetRequestColumnModel {
            column_name: column_name.to_string(),
            json_path: None,
            facet_type,
            facet_column_request,
            search_condition,
        })
    }

    /// Facet on a value extracted from a JSON column. Values are cast to the sub column's type.
    pub fn for_json_sub_column(
        column_name: &str,
        sub_column: &JsonSubColumnModel,
        facet_column_request: Option<FacetColumnRequest>,
    ) -> Result<Self> {
        let facet_type = sub_column
            .facet_type
            .ok_or_else(|| Error::invalid_argument(msg::required("subColumn.facetType")))?;
        let column_type = sub_column
            .column_type
            .ok_or_else(|| Error::invalid_argument(msg::required("subColumn.columnType")))?;
        if let Some(request) = &facet_column_request {
            if request.json_path() != Some(sub_column.json_path.as_str()) {
                return Err(Error::invalid_argument(msg::unexpected_json_path(
                    request.json_path(),
                    &sub_column.json_path,
                )));
            }
            check_request(column_name, facet_type, request)?;
        }
        let search_condition =
            create_facet_search_condition(facet_column_request.as_ref(), false, Some(column_type));
        Ok(FacetRequestColumnModel {
            column_name: column_name.to_string(),
            json_path: Some(sub_column.json_path.clone()),
            facet_type,
            facet_column_request,
            search_condition,
        })
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn json_path(&self) -> Option<&str> {
        self.json_path.as_deref()
    }

    pub fn facet_type(&self) -> FacetType {
        self.facet_type
    }

    pub fn facet_column_request(&self) -> Option<&FacetColumnRequest> {
        self.facet_column_request.as_ref()
    }

    /// `None` when nothing is selected for this facet.
    pub fn search_condition(&self) -> Option<&str> {
        self.search_condition.as_deref()
    }
}

fn check_request(
    column_name: &str,
    facet_type: FacetType,
    request: &FacetColumnRequest,
) -> Result<()> {
    if request.column_name() != column_name {
        return Err(Error::invalid_argument(msg::facet_column_name_mismatch(
            request.column_name(),
            column_name,
        )));
    }
    match (facet_type, request) {
        (FacetType::Enumeration, FacetColumnRequest::Values(_))
        | (FacetType::Range, FacetColumnRequest::Range(_)) => Ok(()),
        _ => Err(Error::invalid_argument(msg::facet_request_kind_mismatch(
            facet_type,
            column_name,
        ))),
    }
}

pub fn create_facet_search_condition(
    request: Option<&FacetColumnRequest>,
    column_type_is_list: bool,
    target_type: Option<ColumnType>,
) -> Option<String> {
    match request? {
        FacetColumnRequest::Values(values) if column_type_is_list => {
            create_list_column_enumeration_search_condition(values)
        }
        FacetColumnRequest::Values(values) => {
            create_single_value_column_enumeration_search_condition(values, target_type)
        }
        FacetColumnRequest::Range(range) => create_range_search_condition(range, target_type),
    }
}

/// `("c"='a' OR "c" IS NULL ...)` in the order the values were given.
pub fn create_single_value_column_enumeration_search_condition(
    request: &FacetColumnValuesRequest,
    target_type: Option<ColumnType>,
) -> Option<String> {
    if request.facet_values.is_empty() {
        return None;
    }
    let mut builder = String::from("(");
    for (i, value) in request.facet_values.iter().enumerate() {
        if i > 0 {
            builder.push_str(" OR ");
        }
        append_column_expression(&mut builder, &request.column_name, request.json_path.as_deref());
        if value == NULL_VALUE_KEYWORD {
            builder.push_str(" IS NULL");
        } else {
            builder.push('=');
            append_value(&mut builder, value, target_type);
        }
    }
    builder.push(')');
    Some(builder)
}

/// `("c" HAS ('a','b') OR "c" IS NULL)`. The null keyword is pulled out of the value list.
pub fn create_list_column_enumeration_search_condition(
    request: &FacetColumnValuesRequest,
) -> Option<String> {
    if request.facet_values.is_empty() {
        return None;
    }
    let (nulls, values): (Vec<&String>, Vec<&String>) = request
        .facet_values
        .iter()
        .partition(|v| v.as_str() == NULL_VALUE_KEYWORD);

    let mut builder = String::from("(");
    if !values.is_empty() {
        append_column_expression(&mut builder, &request.column_name, request.json_path.as_deref());
        builder.push_str(" HAS (");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                builder.push(',');
            }
            append_value(&mut builder, value, None);
        }
        builder.push(')');
    }
    if !nulls.is_empty() {
        if !values.is_empty() {
            builder.push_str(" OR ");
        }
        append_column_expression(&mut builder, &request.column_name, request.json_path.as_deref());
        builder.push_str(" IS NULL");
    }
    builder.push(')');
    Some(builder)
}

/// `("c" BETWEEN 'lo' AND 'hi')`, `("c">='lo')` or `("c"<='hi')`. A null keyword in either
/// bound selects empty cells instead. Empty strings count as open bounds.
pub fn create_range_search_condition(
    request: &FacetColumnRangeRequest,
    target_type: Option<ColumnType>,
) -> Option<String> {
    let min = request.min.as_deref().filter(|m| !m.is_empty());
    let max = request.max.as_deref().filter(|m| !m.is_empty());
    if min.is_none() && max.is_none() {
        return None;
    }

    let mut builder = String::from("(");
    append_column_expression(&mut builder, &request.column_name, request.json_path.as_deref());
    if min == Some(NULL_VALUE_KEYWORD) || max == Some(NULL_VALUE_KEYWORD) {
        builder.push_str(" IS NULL");
    } else {
        match (min, max) {
            (Some(min), Some(max)) => {
                builder.push_str(" BETWEEN ");
                append_value(&mut builder, min, target_type);
                builder.push_str(" AND ");
                append_value(&mut builder, max, target_type);
            }
            (Some(min), None) => {
                builder.push_str(">=");
                append_value(&mut builder, min, target_type);
            }
            (None, Some(max)) => {
                builder.push_str("<=");
                append_value(&mut builder, max, target_type);
            }
            (None, None) => {}
        }
    }
    builder.push(')');
    Some(builder)
}

/// `"col"`, or `JSON_EXTRACT("col",'$.path')` when a path is given.
pub fn append_column_expression(builder: &mut String, column_name: &str, json_path: Option<&str>) {
    match json_path {
        Some(path) => {
            builder.push_str(JSON_EXTRACT);
            builder.push('(');
            builder.push_str(&wrap_in_double_quotes(column_name));
            builder.push(',');
            append_value(builder, path, None);
            builder.push(')');
        }
        None => builder.push_str(&wrap_in_double_quotes(column_name)),
    }
}

/// `'v'`, or `CAST('v' AS TYPE)` when a target type is given.
pub fn append_value(builder: &mut String, value: &str, target_type: Option<ColumnType>) {
    let quoted = format!("'{}'", value.replace('\'', "''"));
    match target_type {
        Some(column_type) => builder.push_str(&format!("CAST({quoted} AS {column_type})")),
        None => builder.push_str(&quoted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMN: &str = "someColumn";

    fn column_model(facet_type: Option<FacetType>) -> ColumnModel {
        ColumnModel {
            id: Some("123".to_string()),
            ..ColumnModel::new(COLUMN, ColumnType::String, facet_type)
        }
    }

    fn values(values: &[&str]) -> FacetColumnValuesRequest {
        FacetColumnValuesRequest {
            column_name: COLUMN.to_string(),
            json_path: None,
            facet_values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn range(min: Option<&str>, max: Option<&str>) -> FacetColumnRangeRequest {
        FacetColumnRangeRequest {
            column_name: COLUMN.to_string(),
            json_path: None,
            min: min.map(str::to_string),
            max: max.map(str::to_string),
        }
    }

    fn sub_column(
        facet_type: Option<FacetType>,
        column_type: Option<ColumnType>,
    ) -> JsonSubColumnModel {
        JsonSubColumnModel {
            name: "foo".to_string(),
            json_path: "$.bar".to_string(),
            column_type,
            facet_type,
        }
    }

    fn invalid(message: &str) -> Error {
        Error::InvalidArgument(message.to_string())
    }

    #[test]
    fn test_new_requires_column_fields() {
        let request = Some(values(&["a"]).into());

        let mut model = column_model(Some(FacetType::Enumeration));
        model.name = None;
        assert_eq!(
            FacetRequestColumnModel::new(&model, request.clone()),
            Err(invalid("columnModel.name is required."))
        );

        let model = column_model(None);
        assert_eq!(
            FacetRequestColumnModel::new(&model, request.clone()),
            Err(invalid("columnModel.facetType is required."))
        );

        let mut model = column_model(Some(FacetType::Enumeration));
        model.column_type = None;
        assert_eq!(
            FacetRequestColumnModel::new(&model, request),
            Err(invalid("columnModel.columnType is required."))
        );
    }

    #[test]
    fn test_new_rejects_mismatched_requests() {
        let mut model = column_model(Some(FacetType::Enumeration));
        model.name = Some("wrongName".to_string());
        assert!(matches!(
            FacetRequestColumnModel::new(&model, Some(values(&[]).into())),
            Err(Error::InvalidArgument(_))
        ));

        let model = column_model(Some(FacetType::Enumeration));
        assert!(matches!(
            FacetRequestColumnModel::new(&model, Some(range(None, None).into())),
            Err(Error::InvalidArgument(_))
        ));

        let model = column_model(Some(FacetType::Range));
        assert!(matches!(
            FacetRequestColumnModel::new(&model, Some(values(&[]).into())),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_new_without_selection() {
        let model = column_model(Some(FacetType::Enumeration));
        let facet = FacetRequestColumnModel::new(&model, None).unwrap();
        assert_eq!(facet.column_name(), COLUMN);
        assert_eq!(facet.facet_column_request(), None);
        assert_eq!(facet.search_condition(), None);

        let facet = FacetRequestColumnModel::new(&model, Some(values(&[]).into())).unwrap();
        assert_eq!(facet.facet_column_request(), Some(&values(&[]).into()));
        assert_eq!(facet.search_condition(), None);

        let model = column_model(Some(FacetType::Range));
        let facet = FacetRequestColumnModel::new(&model, Some(range(None, None).into())).unwrap();
        assert_eq!(facet.facet_type(), FacetType::Range);
        assert_eq!(facet.search_condition(), None);
    }

    #[test]
    fn test_new_for_list_column() {
        let model = ColumnModel::new(
            COLUMN,
            ColumnType::StringList,
            Some(FacetType::Enumeration),
        );
        let facet = FacetRequestColumnModel::new(&model, Some(values(&["a", "b"]).into())).unwrap();
        assert_eq!(facet.search_condition(), Some(r#"("someColumn" HAS ('a','b'))"#));
    }

    #[test]
    fn test_for_json_sub_column() {
        let sub = sub_column(Some(FacetType::Enumeration), Some(ColumnType::Integer));
        let mut request = values(&["10"]);
        request.json_path = Some("$.bar".to_string());
        let facet =
            FacetRequestColumnModel::for_json_sub_column(COLUMN, &sub, Some(request.into()))
                .unwrap();
        assert_eq!(facet.json_path(), Some("$.bar"));
        assert_eq!(facet.facet_type(), FacetType::Enumeration);
        assert_eq!(facet.column_name(), COLUMN);
        assert_eq!(
            facet.search_condition(),
            Some(r#"(JSON_EXTRACT("someColumn",'$.bar')=CAST('10' AS INTEGER))"#)
        );
    }

    #[test]
    fn test_for_json_sub_column_errors() {
        let request: FacetColumnRequest = values(&["10"]).into();

        let sub = sub_column(Some(FacetType::Enumeration), Some(ColumnType::Integer));
        assert_eq!(
            FacetRequestColumnModel::for_json_sub_column(COLUMN, &sub, Some(request.clone())),
            Err(invalid("Unexpected facet request jsonPath (Was 'null', Expected '$.bar')"))
        );

        let sub = sub_column(None, Some(ColumnType::Integer));
        assert_eq!(
            FacetRequestColumnModel::for_json_sub_column(COLUMN, &sub, Some(request.clone())),
            Err(invalid("subColumn.facetType is required."))
        );

        let sub = sub_column(Some(FacetType::Enumeration), None);
        assert_eq!(
            FacetRequestColumnModel::for_json_sub_column(COLUMN, &sub, Some(request)),
            Err(invalid("subColumn.columnType is required."))
        );

        let sub = sub_column(Some(FacetType::Enumeration), Some(ColumnType::Integer));
        let mut request = values(&["10"]);
        request.json_path = Some("$.foo".to_string());
        assert_eq!(
            FacetRequestColumnModel::for_json_sub_column(COLUMN, &sub, Some(request.into())),
            Err(invalid("Unexpected facet request jsonPath (Was '$.foo', Expected '$.bar')"))
        );
    }

    #[test]
    fn test_create_facet_search_condition_dispatch() {
        assert_eq!(create_facet_search_condition(None, false, None), None);
        let request = values(&["hello"]);
        assert_eq!(
            create_facet_search_condition(Some(&request.clone().into()), false, None),
            create_single_value_column_enumeration_search_condition(&request, None)
        );
        assert_eq!(
            create_facet_search_condition(Some(&request.clone().into()), true, None),
            create_list_column_enumeration_search_condition(&request)
        );
        let request = range(None, Some("123"));
        assert_eq!(
            create_facet_search_condition(Some(&request.clone().into()), false, None),
            create_range_search_condition(&request, None)
        );
    }

    #[test]
    fn test_single_value_enumeration() {
        let render = |v: &[&str]| create_single_value_column_enumeration_search_condition(&values(v), None);
        assert_eq!(render(&[]), None);
        assert_eq!(render(&["hello"]).as_deref(), Some(r#"("someColumn"='hello')"#));
        assert_eq!(
            render(&[NULL_VALUE_KEYWORD]).as_deref(),
            Some(r#"("someColumn" IS NULL)"#)
        );
        assert_eq!(
            render(&["hello", "world"]).as_deref(),
            Some(r#"("someColumn"='hello' OR "someColumn"='world')"#)
        );
        assert_eq!(
            render(&[NULL_VALUE_KEYWORD, "world"]).as_deref(),
            Some(r#"("someColumn" IS NULL OR "someColumn"='world')"#)
        );
        assert_eq!(
            render(&["hello world"]).as_deref(),
            Some(r#"("someColumn"='hello world')"#)
        );
    }

    #[test]
    fn test_single_value_enumeration_with_json_path() {
        let mut request = values(&["hello world"]);
        request.json_path = Some("$.foo".to_string());
        assert_eq!(
            create_single_value_column_enumeration_search_condition(&request, None).as_deref(),
            Some(r#"(JSON_EXTRACT("someColumn",'$.foo')='hello world')"#)
        );
        assert_eq!(
            create_single_value_column_enumeration_search_condition(
                &request,
                Some(ColumnType::String)
            )
            .as_deref(),
            Some(r#"(JSON_EXTRACT("someColumn",'$.foo')=CAST('hello world' AS STRING))"#)
        );
    }

    #[test]
    fn test_single_value_enumeration_quoted_column_name() {
        let mut request = values(&["myValue"]);
        request.column_name = r#""quoted"Column"#.to_string();
        assert_eq!(
            create_single_value_column_enumeration_search_condition(&request, None).as_deref(),
            Some(r#"("""quoted""Column"='myValue')"#)
        );
    }

    #[test]
    fn test_list_enumeration() {
        let render = |v: &[&str]| create_list_column_enumeration_search_condition(&values(v));
        assert_eq!(render(&[]), None);
        assert_eq!(render(&["hello"]).as_deref(), Some(r#"("someColumn" HAS ('hello'))"#));
        assert_eq!(
            render(&[NULL_VALUE_KEYWORD]).as_deref(),
            Some(r#"("someColumn" IS NULL)"#)
        );
        assert_eq!(
            render(&["hello", "world"]).as_deref(),
            Some(r#"("someColumn" HAS ('hello','world'))"#)
        );
        assert_eq!(
            render(&["hello", "world", NULL_VALUE_KEYWORD]).as_deref(),
            Some(r#"("someColumn" HAS ('hello','world') OR "someColumn" IS NULL)"#)
        );
        assert_eq!(
            render(&[NULL_VALUE_KEYWORD, "world"]).as_deref(),
            Some(r#"("someColumn" HAS ('world') OR "someColumn" IS NULL)"#)
        );
    }

    #[test]
    fn test_range() {
        let render = |min, max| create_range_search_condition(&range(min, max), None);
        assert_eq!(render(None, None), None);
        assert_eq!(render(Some(""), None), None);
        assert_eq!(render(Some("42"), None).as_deref(), Some(r#"("someColumn">='42')"#));
        assert_eq!(render(None, Some("42")).as_deref(), Some(r#"("someColumn"<='42')"#));
        assert_eq!(
            render(Some("123"), Some("456")).as_deref(),
            Some(r#"("someColumn" BETWEEN '123' AND '456')"#)
        );
        assert_eq!(
            render(Some(NULL_VALUE_KEYWORD), Some("456")).as_deref(),
            Some(r#"("someColumn" IS NULL)"#)
        );
        assert_eq!(
            render(Some("123"), Some(NULL_VALUE_KEYWORD)).as_deref(),
            Some(r#"("someColumn" IS NULL)"#)
        );
    }

    #[test]
    fn test_range_with_json_path() {
        let mut request = range(Some("123"), Some("456"));
        request.json_path = Some("$.foo".to_string());
        assert_eq!(
            create_range_search_condition(&request, None).as_deref(),
            Some(r#"(JSON_EXTRACT("someColumn",'$.foo') BETWEEN '123' AND '456')"#)
        );
        assert_eq!(
            create_range_search_condition(&request, Some(ColumnType::Integer)).as_deref(),
            Some(
                r#"(JSON_EXTRACT("someColumn",'$.foo') BETWEEN CAST('123' AS INTEGER) AND CAST('456' AS INTEGER))"#
            )
        );
    }

    #[test]
    fn test_append_value() {
        let mut builder = String::new();
        append_value(&mut builder, "whomst'd've", None);
        assert_eq!(builder, "'whomst''d''ve'");

        let mut builder = String::new();
        append_value(&mut builder, "10", Some(ColumnType::Integer));
        assert_eq!(builder, "CAST('10' AS INTEGER)");
    }
}
