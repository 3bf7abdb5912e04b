mod expr;
mod predicate;
mod query;
mod utils;

pub use expr::{column_reference, value_expression};
pub use predicate::{
    boolean_factor, boolean_primary, boolean_term, boolean_test, in_predicate_value, predicate,
    row_value_constructor, search_condition,
};
pub use query::{
    derived_column, from_clause, group_by_clause, grouping_column_reference, order_by_clause,
    pagination, query_specification, select_list, sort_key, sort_specification,
    sort_specification_list, table_expression, table_name, where_clause,
};
pub use utils::{column_name, complete, Psr};
