pub mod constants;
pub mod errors;
mod examples;
pub mod facets;
pub mod filters;
mod options;
mod processor;
pub mod rewrite;
pub mod schema;
#[cfg(test)]
mod tests;

pub use errors::{Error, Result};
pub use examples::{ExampleQueries, ExampleQuery};
pub use options::Options;
pub use processor::TableSqlProcessor;
pub use tablequery_parser::{parse_query, ParseError};
