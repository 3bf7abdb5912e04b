//! Facet selections and the search conditions they render to.

mod column;
mod request;
mod utils;

pub use column::{
    append_column_expression, append_value, create_facet_search_condition,
    create_list_column_enumeration_search_condition, create_range_search_condition,
    create_single_value_column_enumeration_search_condition, FacetRequestColumnModel,
};
pub use request::{FacetColumnRangeRequest, FacetColumnRequest, FacetColumnValuesRequest};
pub use utils::{
    append_facet_search_condition_to_query_specification,
    append_query_filters_to_query_specification, append_search_condition_to_query_specification,
    concat_facet_search_condition_strings, concat_search_conditions,
};
