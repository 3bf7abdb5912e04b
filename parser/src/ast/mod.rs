//! Syntax tree for the table query SQL subset.
//!
//! Every node renders back to canonical SQL through `Display` (see [`Element::to_sql`]) and can be
//! walked depth-first through [`Element::elements`].

mod display;
mod element;

use std::mem;

pub use element::{Element, ElementKind, ElementRef, Elements};

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpecification {
    pub set_quantifier: Option<SetQuantifier>,
    pub select_list: SelectList,
    pub table_expression: TableExpression,
}

impl QuerySpecification {
    pub fn table_name(&self) -> &TableName {
        &self.table_expression.from_clause.table_name
    }

    /// Swap in a new select list, returning the old one.
    pub fn replace_select_list(&mut self, select_list: SelectList) -> SelectList {
        mem::replace(&mut self.select_list, select_list)
    }

    pub fn replace_set_quantifier(
        &mut self,
        set_quantifier: Option<SetQuantifier>,
    ) -> Option<SetQuantifier> {
        mem::replace(&mut self.set_quantifier, set_quantifier)
    }

    pub fn is_select_star(&self) -> bool {
        matches!(self.select_list, SelectList::Star)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    Distinct,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectList {
    Star,
    Columns(Vec<DerivedColumn>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    pub value_expression: ValueExpression,
    pub alias: Option<ColumnName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableExpression {
    pub from_clause: FromClause,
    pub where_clause: Option<WhereClause>,
    pub group_by_clause: Option<GroupByClause>,
    pub order_by_clause: Option<OrderByClause>,
    pub pagination: Option<Pagination>,
}

impl TableExpression {
    pub fn new(table_name: TableName) -> Self {
        TableExpression {
            from_clause: FromClause { table_name },
            where_clause: None,
            group_by_clause: None,
            order_by_clause: None,
            pagination: None,
        }
    }

    pub fn replace_where(&mut self, where_clause: Option<WhereClause>) -> Option<WhereClause> {
        mem::replace(&mut self.where_clause, where_clause)
    }

    pub fn replace_group_by(
        &mut self,
        group_by_clause: Option<GroupByClause>,
    ) -> Option<GroupByClause> {
        mem::replace(&mut self.group_by_clause, group_by_clause)
    }

    pub fn replace_order_by(
        &mut self,
        order_by_clause: Option<OrderByClause>,
    ) -> Option<OrderByClause> {
        mem::replace(&mut self.order_by_clause, order_by_clause)
    }

    pub fn replace_pagination(&mut self, pagination: Option<Pagination>) -> Option<Pagination> {
        mem::replace(&mut self.pagination, pagination)
    }

    pub fn with_where(mut self, where_clause: Option<WhereClause>) -> Self {
        self.where_clause = where_clause;
        self
    }

    pub fn with_group_by(mut self, group_by_clause: Option<GroupByClause>) -> Self {
        self.group_by_clause = group_by_clause;
        self
    }

    pub fn with_order_by(mut self, order_by_clause: Option<OrderByClause>) -> Self {
        self.order_by_clause = order_by_clause;
        self
    }

    pub fn with_pagination(mut self, pagination: Option<Pagination>) -> Self {
        self.pagination = pagination;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table_name: TableName,
}

/// A table id such as `syn123`, optionally pinned to a version as in `syn123.4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub id: String,
    pub version: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub search_condition: SearchCondition,
}

/// Disjunction of terms.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCondition {
    pub terms: Vec<BooleanTerm>,
}

/// Conjunction of factors.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanTerm {
    pub factors: Vec<BooleanFactor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanFactor {
    pub not: bool,
    pub test: BooleanTest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanTest {
    pub primary: BooleanPrimary,
    pub truth_test: Option<TruthTest>,
}

/// `IS [NOT] TRUE|FALSE|UNKNOWN` applied to a whole boolean primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTest {
    pub not: bool,
    pub value: TruthValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthValue {
    True,
    False,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BooleanPrimary {
    Predicate(Predicate),
    Nested(SearchCondition),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison(ComparisonPredicate),
    Between(BetweenPredicate),
    In(InPredicate),
    Like(LikePredicate),
    Null(NullPredicate),
    Boolean(BooleanPredicate),
    ArrayHas(ArrayHasPredicate),
    TextMatches(TextMatchesPredicate),
    BooleanFunction(FunctionCall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPredicate {
    pub left: RowValueConstructor,
    pub operator: ComparisonOperator,
    pub right: RowValueConstructor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetweenPredicate {
    pub left: RowValueConstructor,
    pub not: bool,
    pub lower: RowValueConstructor,
    pub upper: RowValueConstructor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InPredicate {
    pub left: RowValueConstructor,
    pub not: bool,
    pub value: InPredicateValue,
}

/// Parenthesized, comma-separated value list used by `IN`, `HAS` and `HAS_LIKE`.
#[derive(Debug, Clone, PartialEq)]
pub struct InPredicateValue {
    pub values: Vec<ValueExpression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LikePredicate {
    pub left: RowValueConstructor,
    pub not: bool,
    pub pattern: ValueExpression,
    pub escape: Option<EscapeCharacter>,
}

/// Unescaped content of the string literal following `ESCAPE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeCharacter(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct NullPredicate {
    pub left: RowValueConstructor,
    pub not: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanPredicate {
    pub left: RowValueConstructor,
    pub not: bool,
    pub value: bool,
}

/// `HAS (...)` or `HAS_LIKE (...)` against a list column.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayHasPredicate {
    pub left: RowValueConstructor,
    pub not: bool,
    pub like: bool,
    pub value: InPredicateValue,
    pub escape: Option<EscapeCharacter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatchesPredicate {
    pub search_expression: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowValueConstructor {
    Value(ValueExpression),
    /// Always at least two entries.
    List(Vec<ValueExpression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpression {
    Primary(ValueExpressionPrimary),
    Negation(Box<ValueExpression>),
    Arithmetic(Box<ArithmeticExpression>),
}

impl ValueExpression {
    pub fn column(name: ColumnName) -> Self {
        ValueExpression::Primary(ValueExpressionPrimary::ColumnReference(ColumnReference {
            qualifier: None,
            name,
        }))
    }

    pub fn arithmetic(
        left: ValueExpression,
        operator: ArithmeticOperator,
        right: ValueExpression,
    ) -> Self {
        ValueExpression::Arithmetic(Box::new(ArithmeticExpression {
            left,
            operator,
            right,
        }))
    }

    /// The column this expression refers to, when it is nothing but a column reference.
    pub fn as_column_reference(&self) -> Option<&ColumnReference> {
        match self {
            ValueExpression::Primary(ValueExpressionPrimary::ColumnReference(c)) => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpression {
    pub left: ValueExpression,
    pub operator: ArithmeticOperator,
    pub right: ValueExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Modulo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpressionPrimary {
    Literal(Literal),
    ColumnReference(ColumnReference),
    SetFunction(SetFunction),
    Function(FunctionCall),
    MultiValueFunction(MultiValueFunction),
    Cast(CastSpecification),
    Parenthesized(Box<ValueExpression>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Kept exactly as written so that `1.0` does not become `1`.
    Numeric(String),
    /// Unescaped content.
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReference {
    pub qualifier: Option<ColumnName>,
    pub name: ColumnName,
}

impl ColumnReference {
    /// The referenced name with quotes removed, e.g. `foo` for both `foo` and `"foo"`.
    pub fn to_sql_without_quotes(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{}.{}", q.value, self.name.value),
            None => self.name.value.clone(),
        }
    }
}

/// A bare or double-quoted identifier. Two names are equal when their text is equal, regardless
/// of how they were quoted.
#[derive(Debug, Clone, Eq)]
pub struct ColumnName {
    pub value: String,
    pub quoted: bool,
}

impl ColumnName {
    pub fn bare(value: impl Into<String>) -> Self {
        ColumnName {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        ColumnName {
            value: value.into(),
            quoted: true,
        }
    }

    pub fn to_sql_without_quotes(&self) -> String {
        self.value.clone()
    }
}

impl PartialEq for ColumnName {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Count,
    Avg,
    Sum,
    Min,
    Max,
    GroupConcat,
}

impl AggregateFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        use AggregateFunction::*;
        [Count, Avg, Sum, Min, Max, GroupConcat]
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::GroupConcat => "GROUP_CONCAT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetFunction {
    pub function: AggregateFunction,
    pub arguments: SetFunctionArguments,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetFunctionArguments {
    /// Only valid for `COUNT`.
    Star,
    Values {
        quantifier: Option<SetQuantifier>,
        values: Vec<ValueExpression>,
    },
}

/// Call of a non-aggregate function. The name is stored upper case.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<ValueExpression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiValueFunctionName {
    Unnest,
}

/// A function which expands a list column into one row per element.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiValueFunction {
    pub function: MultiValueFunctionName,
    pub column: ColumnReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastSpecification {
    pub value: Box<ValueExpression>,
    /// Upper case type name, e.g. `INTEGER`.
    pub target: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause {
    pub columns: Vec<GroupingColumnReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingColumnReference {
    pub column: ColumnReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub sort_specifications: SortSpecificationList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpecificationList {
    pub items: Vec<SortSpecification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpecification {
    pub sort_key: SortKey,
    pub ordering: Option<OrderingSpecification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub value: ValueExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingSpecification {
    Asc,
    Desc,
}

/// `LIMIT` and `OFFSET`. A `None` limit means unbounded and is not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Pagination { limit, offset }
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}
