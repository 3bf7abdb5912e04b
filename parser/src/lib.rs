//! Parser and syntax tree for the SQL subset accepted by table queries.
//!
//! ```
//! use tablequery_parser::{ast::Element, parse_query};
//!
//! let query = parse_query("select foo, bar from syn123 where foo = 1 limit 567 offset 234").unwrap();
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT foo, bar FROM syn123 WHERE foo = 1 LIMIT 567 OFFSET 234"
//! );
//! ```

mod error;
mod parser;

pub mod ast;
pub mod tokens;

use chumsky::Parser;

pub use error::ParseError;

use ast::*;
use parser::*;

/// Syntax tree nodes which can be parsed directly from SQL text. The whole input must be
/// consumed.
pub trait Parse: Sized {
    fn parse(input: &str) -> Result<Self, ParseError>;
}

fn run<T: 'static>(production: impl Psr<T>, input: &str) -> Result<T, ParseError> {
    complete(production)
        .parse(input)
        .map_err(|errors| ParseError::from_errors(input, errors))
}

macro_rules! productions {
    ($($node:ty => $production:expr,)*) => {
        $(
            impl Parse for $node {
                fn parse(input: &str) -> Result<Self, ParseError> {
                    run($production, input)
                }
            }
        )*
    };
}

productions!(
    QuerySpecification => query_specification(),
    SelectList => select_list(),
    DerivedColumn => derived_column(),
    TableExpression => table_expression(),
    TableName => table_name(),
    WhereClause => where_clause(),
    FromClause => from_clause(),
    SearchCondition => search_condition(),
    BooleanTerm => boolean_term(),
    BooleanFactor => boolean_factor(),
    BooleanTest => boolean_test(),
    BooleanPrimary => boolean_primary(),
    Predicate => predicate(),
    RowValueConstructor => row_value_constructor(),
    InPredicateValue => in_predicate_value(),
    ValueExpression => value_expression(),
    ColumnReference => column_reference(),
    ColumnName => column_name(),
    GroupByClause => group_by_clause(),
    GroupingColumnReference => grouping_column_reference(),
    OrderByClause => order_by_clause(),
    SortSpecificationList => sort_specification_list(),
    SortSpecification => sort_specification(),
    SortKey => sort_key(),
    Pagination => pagination(),
);

pub fn parse_query(input: &str) -> Result<QuerySpecification, ParseError> {
    QuerySpecification::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse, render, and check the canonical SQL. Rendering must itself re-parse to the same
    /// tree.
    fn assert_canonical(input: &str, expected: &str) {
        let query = parse_query(input).unwrap();
        assert_eq!(query.to_sql(), expected);
        assert_eq!(parse_query(expected).unwrap(), query);
    }

    #[test]
    fn test_canonical_sql() {
        assert_canonical(
            "select foo, bar from syn123 where foo = 1 order by bar limit 567 offset 234",
            "SELECT foo, bar FROM syn123 WHERE foo = 1 ORDER BY bar LIMIT 567 OFFSET 234",
        );
        assert_canonical(
            "select max(foo) from syn123",
            "SELECT MAX(foo) FROM syn123",
        );
        assert_canonical(
            "select * from syn123 where bar < 1.0 order by foo, bar limit 2 offset 5",
            "SELECT * FROM syn123 WHERE bar < 1.0 ORDER BY foo, bar LIMIT 2 OFFSET 5",
        );
        assert_canonical(
            r#"select "has space", 'it''s' from syn123.3"#,
            r#"SELECT "has space", 'it''s' FROM syn123.3"#,
        );
        assert_canonical(
            "select foo as a, count(*) from syn123 group by a order by bar desc, foo asc",
            "SELECT foo AS a, COUNT(*) FROM syn123 GROUP BY a ORDER BY bar DESC, foo ASC",
        );
    }

    #[test]
    fn test_canonical_predicates() {
        assert_canonical(
            "select * from syn1 where (a = 1 or b in (1,2)) and not c like 'x%' escape '\\'",
            "SELECT * FROM syn1 WHERE (a = 1 OR b IN (1, 2)) AND NOT c LIKE 'x%' ESCAPE '\\'",
        );
        assert_canonical(
            "select * from syn1 where tags has ('a', 'b') and d is not null and e between 1 and 5",
            "SELECT * FROM syn1 WHERE tags HAS ('a', 'b') AND d IS NOT NULL AND e BETWEEN 1 AND 5",
        );
        assert_canonical(
            "select * from syn1 where text_matches('foo bar') or isnan(x)",
            "SELECT * FROM syn1 WHERE TEXT_MATCHES('foo bar') OR ISNAN(x)",
        );
        assert_canonical(
            "select * from syn1 where (a, b) = (1, 2)",
            "SELECT * FROM syn1 WHERE (a, b) = (1, 2)",
        );
    }

    #[test]
    fn test_parse_whitespace_and_case() {
        assert_canonical(
            "  SeLeCt\n foo\tFROM syn9  ",
            "SELECT foo FROM syn9",
        );
    }

    #[test]
    fn test_parse_errors() {
        let error = parse_query("select from syn123").unwrap_err();
        assert_eq!(error.line, 1);
        assert!(parse_query("select foo").is_err());
        assert!(parse_query("select foo from syn123 where").is_err());
        assert!(parse_query("select foo from syn123 limit -1").is_err());
        assert!(parse_query("select foo from syn123 extra").is_err());
        let error = parse_query("select foo\nfrom syn123 where 'open").unwrap_err();
        assert_eq!(error.line, 2);
    }

    #[test]
    fn test_parse_fragments() {
        assert_eq!(
            ColumnName::parse(r#""First Name""#),
            Ok(ColumnName::quoted("First Name"))
        );
        assert_eq!(
            Pagination::parse("LIMIT 10 OFFSET 20"),
            Ok(Pagination::new(Some(10), Some(20)))
        );
        assert_eq!(
            SearchCondition::parse("a = 1").map(|c| c.to_sql()),
            Ok("a = 1".to_string())
        );
        assert!(ValueExpression::parse("foo bar").is_err());
    }

    #[test]
    fn test_elements() {
        let query = parse_query("select foo, count(*) from syn1 where bar = 2 order by baz").unwrap();
        let columns: Vec<String> = query
            .elements()
            .filter_map(ColumnName::from_element)
            .map(|c| c.value.clone())
            .collect();
        assert_eq!(columns, vec!["foo", "bar", "baz"]);
        assert_eq!(
            query.first_element_of_type::<SortKey>().map(|k| k.to_sql()),
            Some("baz".to_string())
        );
        assert!(query.first_element_of_type::<GroupByClause>().is_none());
    }

    #[test]
    fn test_has_any_aggregate_elements() {
        let aggregate = |sql: &str| parse_query(sql).unwrap().has_any_aggregate_elements();
        assert!(!aggregate("select foo from syn1"));
        assert!(aggregate("select count(*) from syn1"));
        assert!(aggregate("select distinct foo from syn1"));
        assert!(aggregate("select foo from syn1 group by foo"));
        assert!(!aggregate("select all foo from syn1"));
    }

    #[test]
    fn test_equivalent_ignores_quoting() {
        let a = ColumnReference::parse(r#""foo""#).unwrap();
        let b = ColumnReference::parse("foo").unwrap();
        assert!(a.equivalent(&b));
        assert_ne!(a.to_sql(), b.to_sql());
    }

    #[test]
    fn test_replace_clauses() {
        let mut query = parse_query("select * from syn1 where a = 1 order by a limit 3").unwrap();
        let table = &mut query.table_expression;
        let old = table.replace_pagination(None);
        assert_eq!(old, Some(Pagination::new(Some(3), None)));
        table.replace_order_by(None);
        let where_clause = table.replace_where(None);
        assert_eq!(where_clause.map(|w| w.to_sql()), Some("WHERE a = 1".to_string()));
        assert_eq!(query.to_sql(), "SELECT * FROM syn1");
    }
}
