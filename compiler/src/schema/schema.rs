use std::collections::HashSet;

use crate::errors::{msg, Error, Result};

use super::ColumnModel;

/// The columns of the table being queried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<ColumnModel>,
}

impl Schema {
    /// Read a schema from a JSON array of column models.
    pub fn from_json(schema_json: &str) -> Result<Self> {
        let columns = serde_json::from_str::<Vec<ColumnModel>>(schema_json)
            .map_err(|e| Error::Schema(msg::invalid_schema_json(&e.to_string())))?;
        Schema::try_from(columns)
    }

    pub fn get_column(&self, name: &str) -> Option<&ColumnModel> {
        self.columns
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<ColumnModel>> for Schema {
    type Error = Error;

    fn try_from(columns: Vec<ColumnModel>) -> Result<Self> {
        let mut names = HashSet::new();
        for column in &columns {
            let name = column
                .name
                .as_deref()
                .ok_or_else(|| Error::Schema(msg::required("columnModel.name")))?;
            if !names.insert(name) {
                return Err(Error::Schema(msg::duplicate_column(name)));
            }
        }
        Ok(Schema { columns })
    }
}
