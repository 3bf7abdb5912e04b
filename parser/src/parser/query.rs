use chumsky::prelude::*;

use crate::ast::*;
use crate::tokens::*;

use super::expr::{column_reference, value_expression};
use super::predicate::search_condition;
use super::utils::*;

pub fn query_specification() -> impl Psr<QuerySpecification> {
    keyword(KW_SELECT)
        .ignore_then(set_quantifier().or_not())
        .then(select_list())
        .then(table_expression())
        .map(
            |((set_quantifier, select_list), table_expression)| QuerySpecification {
                set_quantifier,
                select_list,
                table_expression,
            },
        )
        .boxed()
}

pub fn set_quantifier() -> impl Psr<SetQuantifier> {
    keyword(KW_DISTINCT)
        .to(SetQuantifier::Distinct)
        .or(keyword(KW_ALL).to(SetQuantifier::All))
}

pub fn select_list() -> impl Psr<SelectList> {
    punct(ASTERISK).to(SelectList::Star).or(derived_column()
        .separated_by(punct(COMMA))
        .at_least(1)
        .map(SelectList::Columns))
}

pub fn derived_column() -> impl Psr<DerivedColumn> {
    value_expression()
        .then(keyword(KW_AS).ignore_then(column_name()).or_not())
        .map(|(value_expression, alias)| DerivedColumn {
            value_expression,
            alias,
        })
}

pub fn table_expression() -> impl Psr<TableExpression> {
    from_clause()
        .then(where_clause().or_not())
        .then(group_by_clause().or_not())
        .then(order_by_clause().or_not())
        .then(pagination().or_not())
        .map(
            |((((from_clause, where_clause), group_by_clause), order_by_clause), pagination)| {
                TableExpression {
                    from_clause,
                    where_clause,
                    group_by_clause,
                    order_by_clause,
                    pagination,
                }
            },
        )
}

pub fn from_clause() -> impl Psr<FromClause> {
    keyword(KW_FROM)
        .ignore_then(table_name())
        .map(|table_name| FromClause { table_name })
}

pub fn table_name() -> impl Psr<TableName> {
    lexeme(
        regular_identifier()
            .then(just(PERIOD).ignore_then(unsigned_integer()).or_not())
            .map(|(id, version)| TableName { id, version }),
    )
}

pub fn where_clause() -> impl Psr<WhereClause> {
    keyword(KW_WHERE)
        .ignore_then(search_condition())
        .map(|search_condition| WhereClause { search_condition })
}

pub fn group_by_clause() -> impl Psr<GroupByClause> {
    keyword(KW_GROUP)
        .then(keyword(KW_BY))
        .ignore_then(
            grouping_column_reference()
                .separated_by(punct(COMMA))
                .at_least(1),
        )
        .map(|columns| GroupByClause { columns })
}

pub fn grouping_column_reference() -> impl Psr<GroupingColumnReference> {
    column_reference().map(|column| GroupingColumnReference { column })
}

pub fn order_by_clause() -> impl Psr<OrderByClause> {
    keyword(KW_ORDER)
        .then(keyword(KW_BY))
        .ignore_then(sort_specification_list())
        .map(|sort_specifications| OrderByClause {
            sort_specifications,
        })
}

pub fn sort_specification_list() -> impl Psr<SortSpecificationList> {
    sort_specification()
        .separated_by(punct(COMMA))
        .at_least(1)
        .map(|items| SortSpecificationList { items })
}

pub fn sort_specification() -> impl Psr<SortSpecification> {
    sort_key()
        .then(ordering_specification().or_not())
        .map(|(sort_key, ordering)| SortSpecification { sort_key, ordering })
}

pub fn sort_key() -> impl Psr<SortKey> {
    value_expression().map(|value| SortKey { value })
}

fn ordering_specification() -> impl Psr<OrderingSpecification> {
    keyword(KW_ASC)
        .to(OrderingSpecification::Asc)
        .or(keyword(KW_DESC).to(OrderingSpecification::Desc))
}

pub fn pagination() -> impl Psr<Pagination> {
    let limit = keyword(KW_LIMIT).ignore_then(lexeme(unsigned_integer()));
    let offset = keyword(KW_OFFSET).ignore_then(lexeme(unsigned_integer()));
    limit
        .then(offset.clone().or_not())
        .map(|(limit, offset)| Pagination::new(Some(limit), offset))
        .or(offset.map(|offset| Pagination::new(None, Some(offset))))
}
