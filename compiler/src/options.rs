use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_ROW_ID_COLUMN, DEFAULT_ROW_VERSION_COLUMN},
    errors::{msg, Error, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Column projected as the row id by the row id query.
    pub row_id_column: String,
    pub row_version_column: String,
    /// Upper bound applied to every page size. `None` leaves page sizes alone.
    pub max_rows_per_page: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            row_id_column: DEFAULT_ROW_ID_COLUMN.to_string(),
            row_version_column: DEFAULT_ROW_VERSION_COLUMN.to_string(),
            max_rows_per_page: None,
        }
    }
}

impl Options {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::Config(msg::invalid_options_toml(&e.to_string())))
    }
}
