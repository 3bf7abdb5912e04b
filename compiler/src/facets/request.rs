use serde::{Deserialize, Serialize};

/// A facet selection made by the user, tagged by `concreteType` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "concreteType")]
pub enum FacetColumnRequest {
    #[serde(
        rename = "FacetColumnValuesRequest",
        alias = "org.sagebionetworks.repo.model.table.FacetColumnValuesRequest"
    )]
    Values(FacetColumnValuesRequest),
    #[serde(
        rename = "FacetColumnRangeRequest",
        alias = "org.sagebionetworks.repo.model.table.FacetColumnRangeRequest"
    )]
    Range(FacetColumnRangeRequest),
}

impl FacetColumnRequest {
    pub fn column_name(&self) -> &str {
        match self {
            FacetColumnRequest::Values(r) => &r.column_name,
            FacetColumnRequest::Range(r) => &r.column_name,
        }
    }

    pub fn json_path(&self) -> Option<&str> {
        match self {
            FacetColumnRequest::Values(r) => r.json_path.as_deref(),
            FacetColumnRequest::Range(r) => r.json_path.as_deref(),
        }
    }
}

/// Select rows whose column holds any of the given values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetColumnValuesRequest {
    pub column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    #[serde(default)]
    pub facet_values: Vec<String>,
}

/// Select rows whose column lies within a range. Either bound may be left open.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetColumnRangeRequest {
    pub column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl From<FacetColumnValuesRequest> for FacetColumnRequest {
    fn from(request: FacetColumnValuesRequest) -> Self {
        FacetColumnRequest::Values(request)
    }
}

impl From<FacetColumnRangeRequest> for FacetColumnRequest {
    fn from(request: FacetColumnRangeRequest) -> Self {
        FacetColumnRequest::Range(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_requests() {
        let requests: Vec<FacetColumnRequest> = serde_json::from_str(
            r#"[
                {"concreteType": "FacetColumnValuesRequest", "columnName": "state", "facetValues": ["CA", "NY"]},
                {"concreteType": "org.sagebionetworks.repo.model.table.FacetColumnRangeRequest", "columnName": "age", "min": "18"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            requests,
            vec![
                FacetColumnRequest::Values(FacetColumnValuesRequest {
                    column_name: "state".to_string(),
                    json_path: None,
                    facet_values: vec!["CA".to_string(), "NY".to_string()],
                }),
                FacetColumnRequest::Range(FacetColumnRangeRequest {
                    column_name: "age".to_string(),
                    json_path: None,
                    min: Some("18".to_string()),
                    max: None,
                }),
            ]
        );
        assert_eq!(requests[1].column_name(), "age");
    }

    #[test]
    fn test_serialize_uses_short_tag() {
        let request = FacetColumnRequest::from(FacetColumnRangeRequest {
            column_name: "age".to_string(),
            json_path: Some("$.a".to_string()),
            min: None,
            max: Some("3".to_string()),
        });
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"concreteType":"FacetColumnRangeRequest","columnName":"age","jsonPath":"$.a","max":"3"}"#
        );
    }
}
