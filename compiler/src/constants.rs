/// Facet value which stands for "the cell is empty". It renders as `IS NULL` rather than as a
/// literal.
pub const NULL_VALUE_KEYWORD: &str = "org.sagebionetworks.UNDEFINED_NULL_NOTSET";

pub const DEFAULT_ROW_ID_COLUMN: &str = "ROW_ID";
pub const DEFAULT_ROW_VERSION_COLUMN: &str = "ROW_VERSION";

pub const JSON_EXTRACT: &str = "JSON_EXTRACT";
