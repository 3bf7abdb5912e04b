//! Query rewrites: counting, row id projection, pagination and sorting.
//!
//! Every rewrite returns a new tree, or mutates one the caller explicitly hands over, and never
//! touches anything else.

mod count;
mod elements;
mod pagination;
mod row_ids;
mod sorting;

pub use count::{create_count_sql, create_select_from_group_by, create_select_without_as};
pub use elements::*;
pub use pagination::{convert_to_paginated_query, limit_max_rows_per_page, override_pagination};
pub use row_ids::build_sql_select_row_id_and_versions;
pub use sorting::{
    convert_query_to_sorted, convert_to_sorted_query, create_sort_key, get_sort_items,
    remove_order_by_clause, toggle_sort, SortDirection, SortItem,
};
