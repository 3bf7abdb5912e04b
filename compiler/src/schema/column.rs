use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    String,
    Double,
    Integer,
    Boolean,
    Date,
    FileHandleId,
    EntityId,
    SubmissionId,
    EvaluationId,
    Link,
    MediumText,
    LargeText,
    UserId,
    Json,
    #[serde(rename = "STRING_LIST")]
    StringList,
    #[serde(rename = "INTEGER_LIST")]
    IntegerList,
    #[serde(rename = "BOOLEAN_LIST")]
    BooleanList,
    #[serde(rename = "DATE_LIST")]
    DateList,
    #[serde(rename = "ENTITYID_LIST")]
    EntityIdList,
    #[serde(rename = "USERID_LIST")]
    UserIdList,
}

impl ColumnType {
    /// The name used both on the wire and as a `CAST` target.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::String => "STRING",
            ColumnType::Double => "DOUBLE",
            ColumnType::Integer => "INTEGER",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Date => "DATE",
            ColumnType::FileHandleId => "FILEHANDLEID",
            ColumnType::EntityId => "ENTITYID",
            ColumnType::SubmissionId => "SUBMISSIONID",
            ColumnType::EvaluationId => "EVALUATIONID",
            ColumnType::Link => "LINK",
            ColumnType::MediumText => "MEDIUMTEXT",
            ColumnType::LargeText => "LARGETEXT",
            ColumnType::UserId => "USERID",
            ColumnType::Json => "JSON",
            ColumnType::StringList => "STRING_LIST",
            ColumnType::IntegerList => "INTEGER_LIST",
            ColumnType::BooleanList => "BOOLEAN_LIST",
            ColumnType::DateList => "DATE_LIST",
            ColumnType::EntityIdList => "ENTITYID_LIST",
            ColumnType::UserIdList => "USERID_LIST",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetType {
    Enumeration,
    Range,
}

impl fmt::Display for FacetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetType::Enumeration => write!(f, "enumeration"),
            FacetType::Range => write!(f, "range"),
        }
    }
}

/// A column of a table, as supplied by the caller. Only the fields needed for a given operation
/// are validated, so most are optional here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_type: Option<FacetType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub json_sub_columns: Vec<JsonSubColumnModel>,
}

impl ColumnModel {
    pub fn new(name: &str, column_type: ColumnType, facet_type: Option<FacetType>) -> Self {
        ColumnModel {
            id: None,
            name: Some(name.to_string()),
            column_type: Some(column_type),
            facet_type,
            json_sub_columns: Vec::new(),
        }
    }
}

/// A value inside a JSON column which is addressed by `json_path` and faceted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSubColumnModel {
    pub name: String,
    pub json_path: String,
    #[serde(default)]
    pub column_type: Option<ColumnType>,
    #[serde(default)]
    pub facet_type: Option<FacetType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_names() {
        assert_eq!(
            serde_json::to_string(&ColumnType::EntityIdList).unwrap(),
            r#""ENTITYID_LIST""#
        );
        assert_eq!(
            serde_json::from_str::<ColumnType>(r#""FILEHANDLEID""#).unwrap(),
            ColumnType::FileHandleId
        );
        for column_type in [ColumnType::MediumText, ColumnType::StringList, ColumnType::Json] {
            let json = serde_json::to_string(&column_type).unwrap();
            assert_eq!(json, format!("\"{}\"", column_type.name()));
        }
    }

    #[test]
    fn test_column_model_json() {
        let column: ColumnModel = serde_json::from_str(
            r#"{
                "id": "42",
                "name": "state",
                "columnType": "STRING",
                "facetType": "enumeration",
                "jsonSubColumns": [
                    { "name": "a", "jsonPath": "$.a", "columnType": "INTEGER", "facetType": "range" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(column.name.as_deref(), Some("state"));
        assert_eq!(column.column_type, Some(ColumnType::String));
        assert_eq!(column.facet_type, Some(FacetType::Enumeration));
        assert_eq!(column.json_sub_columns[0].json_path, "$.a");
        assert_eq!(column.json_sub_columns[0].facet_type, Some(FacetType::Range));
    }
}
