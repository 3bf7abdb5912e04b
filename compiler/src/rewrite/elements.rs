//! Builders which create syntax tree fragments from SQL text.
//!
//! Rewrites never assemble nodes by hand. They render a fragment as text and parse it back, so the
//! parser is the only place trees are constructed.

use tablequery_parser::{
    ast::{
        BetweenPredicate, BooleanPredicate, ComparisonPredicate, DerivedColumn, ElementKind,
        InPredicate, LikePredicate, NullPredicate, Predicate, SearchCondition, SortSpecification,
        ValueExpression, WhereClause,
    },
    Parse,
};

use crate::errors::{msg, Error, Result};

pub fn create<T: Parse>(sql: &str) -> Result<T> {
    Ok(T::parse(sql)?)
}

pub fn create_all<T: Parse>(sqls: &[&str]) -> Result<Vec<T>> {
    sqls.iter().map(|sql| create(sql)).collect()
}

pub fn create_value_expression(sql: &str) -> Result<ValueExpression> {
    create(sql)
}

pub fn create_value_expressions(sqls: &[&str]) -> Result<Vec<ValueExpression>> {
    create_all(sqls)
}

pub fn create_derived_column(sql: &str) -> Result<DerivedColumn> {
    create(sql)
}

pub fn create_derived_columns(sqls: &[&str]) -> Result<Vec<DerivedColumn>> {
    create_all(sqls)
}

pub fn create_search_condition(sql: &str) -> Result<SearchCondition> {
    create(sql)
}

pub fn create_sort_specification(sql: &str) -> Result<SortSpecification> {
    create(sql)
}

pub fn create_sort_specifications(sqls: &[&str]) -> Result<Vec<SortSpecification>> {
    create_all(sqls)
}

/// Parse a predicate and dig out the first node of kind `T` within it.
fn create_from_predicate<T: ElementKind + Clone>(sql: &str, kind: &str) -> Result<T> {
    use tablequery_parser::ast::Element;
    let predicate = Predicate::parse(sql)?;
    predicate
        .first_element_of_type::<T>()
        .cloned()
        .ok_or_else(|| Error::invalid_argument(msg::fragment_is_not_a(kind, sql)))
}

pub fn create_comparison_predicate(sql: &str) -> Result<ComparisonPredicate> {
    create_from_predicate(sql, "comparison predicate")
}

pub fn create_between_predicate(sql: &str) -> Result<BetweenPredicate> {
    create_from_predicate(sql, "between predicate")
}

pub fn create_in_predicate(sql: &str) -> Result<InPredicate> {
    create_from_predicate(sql, "in predicate")
}

pub fn create_like_predicate(sql: &str) -> Result<LikePredicate> {
    create_from_predicate(sql, "like predicate")
}

pub fn create_null_predicate(sql: &str) -> Result<NullPredicate> {
    create_from_predicate(sql, "null predicate")
}

pub fn create_boolean_predicate(sql: &str) -> Result<BooleanPredicate> {
    create_from_predicate(sql, "boolean predicate")
}

/// Quote a name as a SQL identifier, doubling any embedded double quotes.
pub fn wrap_in_double_quotes(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Parse a column name as written, so that `max(foo)` stays a function call. Invalid SQL is an
/// invalid argument rather than a parse failure because the name came from the caller.
pub fn create_non_quoted_derived_column(column_name: &str) -> Result<DerivedColumn> {
    DerivedColumn::parse(column_name).map_err(|e| Error::invalid_argument(e.to_string()))
}

pub fn create_double_quoted_derived_column(column_name: &str) -> Result<DerivedColumn> {
    create(&wrap_in_double_quotes(column_name))
}

/// Append ` WHERE ...` combining an existing WHERE clause with an extra condition. Both sides are
/// parenthesized only when both are present. Nothing is appended when neither is.
pub fn append_combined_where_clause(
    builder: &mut String,
    search_condition: Option<&str>,
    original_where_clause: Option<&WhereClause>,
) {
    let original = original_where_clause.map(|w| w.search_condition.to_string());
    match (original, search_condition) {
        (None, None) => {}
        (Some(original), None) => {
            builder.push_str(" WHERE ");
            builder.push_str(&original);
        }
        (None, Some(condition)) => {
            builder.push_str(" WHERE ");
            builder.push_str(condition);
        }
        (Some(original), Some(condition)) => {
            builder.push_str(&format!(" WHERE ({original}) AND ({condition})"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablequery_parser::ast::{ColumnName, ComparisonOperator, Element};

    #[test]
    fn test_create_value_expressions() {
        let values = create_value_expressions(&["foo", "'bar'", "1.5"]).unwrap();
        assert_eq!(
            values.iter().map(|v| v.to_sql()).collect::<Vec<_>>(),
            vec!["foo", "'bar'", "1.5"]
        );
        assert!(create_value_expressions(&["foo", "from"]).is_err());
    }

    #[test]
    fn test_create_derived_columns() {
        let columns = create_derived_columns(&["foo as f", "count(*)"]).unwrap();
        assert_eq!(columns[0].alias, Some(ColumnName::bare("f")));
        assert_eq!(columns[1].to_sql(), "COUNT(*)");
    }

    #[test]
    fn test_create_typed_predicates() {
        let comparison = create_comparison_predicate("foo >= 12").unwrap();
        assert_eq!(comparison.operator, ComparisonOperator::GreaterThanOrEqual);
        let in_predicate = create_in_predicate("bar not in (1, 2)").unwrap();
        assert!(in_predicate.not);
        assert_eq!(in_predicate.value.values.len(), 2);
        assert_eq!(
            create_between_predicate("a between 1 and 2").map(|p| p.to_sql()),
            Ok("a BETWEEN 1 AND 2".to_string())
        );
        assert_eq!(
            create_like_predicate("a like 'x%'").map(|p| p.to_sql()),
            Ok("a LIKE 'x%'".to_string())
        );
        assert!(create_null_predicate("a is null").is_ok());
        assert!(create_boolean_predicate("a is true").is_ok());
    }

    #[test]
    fn test_create_typed_predicate_of_wrong_kind() {
        assert_eq!(
            create_in_predicate("foo = 1"),
            Err(Error::InvalidArgument(
                "`foo = 1` does not contain a in predicate.".to_string()
            ))
        );
    }

    #[test]
    fn test_wrap_in_double_quotes() {
        assert_eq!(wrap_in_double_quotes("First Name"), r#""First Name""#);
        assert_eq!(wrap_in_double_quotes(r#""quoted"Column"#), r#""""quoted""Column""#);
    }

    #[test]
    fn test_derived_columns_from_names() {
        assert_eq!(
            create_non_quoted_derived_column("max(foo)").map(|c| c.to_sql()),
            Ok("MAX(foo)".to_string())
        );
        assert!(matches!(
            create_non_quoted_derived_column("not a column"),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(
            create_double_quoted_derived_column("has space").map(|c| c.to_sql()),
            Ok(r#""has space""#.to_string())
        );
    }

    #[test]
    fn test_append_combined_where_clause() {
        let where_clause = WhereClause::parse("WHERE a = 1 OR b = 2").unwrap();

        let mut builder = String::new();
        append_combined_where_clause(&mut builder, None, None);
        assert_eq!(builder, "");

        let mut builder = String::new();
        append_combined_where_clause(&mut builder, Some("c = 3"), None);
        assert_eq!(builder, " WHERE c = 3");

        let mut builder = String::new();
        append_combined_where_clause(&mut builder, None, Some(&where_clause));
        assert_eq!(builder, " WHERE a = 1 OR b = 2");

        let mut builder = String::new();
        append_combined_where_clause(&mut builder, Some("c = 3"), Some(&where_clause));
        assert_eq!(builder, " WHERE (a = 1 OR b = 2) AND (c = 3)");
    }
}
