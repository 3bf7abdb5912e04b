mod column;
mod list_types;
mod schema;

pub use column::{ColumnModel, ColumnType, FacetType, JsonSubColumnModel};
pub use schema::Schema;
