use std::fmt::Display;

use super::*;

/// Common behavior of every syntax tree node.
pub trait Element: Display {
    fn as_element(&self) -> ElementRef<'_>;

    /// Canonical SQL for this node.
    fn to_sql(&self) -> String {
        self.to_string()
    }

    /// This node followed by all of its descendants, depth-first and in source order.
    fn elements(&self) -> Elements<'_> {
        Elements {
            stack: vec![self.as_element()],
        }
    }

    fn first_element_of_type<T: ElementKind>(&self) -> Option<&T> {
        self.elements().find_map(T::from_element)
    }

    /// True when anything at or below this node aggregates rows: a set function such as
    /// `COUNT(*)`, a `SELECT DISTINCT`, or a `GROUP BY`.
    fn has_any_aggregate_elements(&self) -> bool {
        self.elements().any(|e| match e {
            ElementRef::SetFunction(_) => true,
            ElementRef::QuerySpecification(q) => {
                q.set_quantifier == Some(SetQuantifier::Distinct)
                    || q.table_expression.group_by_clause.is_some()
            }
            _ => false,
        })
    }

    /// Structural equality ignoring how identifiers were quoted.
    fn equivalent(&self, other: &Self) -> bool
    where
        Self: PartialEq + Sized,
    {
        self == other
    }
}

/// Node types which can be recovered from an [`ElementRef`].
pub trait ElementKind: Element + Sized {
    fn from_element(element: ElementRef<'_>) -> Option<&Self>;
}

/// Depth-first iterator over a syntax tree.
pub struct Elements<'a> {
    stack: Vec<ElementRef<'a>>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children().into_iter().rev());
        Some(next)
    }
}

macro_rules! element_kinds {
    ($($kind:ident),* $(,)?) => {
        /// A borrowed reference to any node of the syntax tree.
        #[derive(Debug, Clone, Copy)]
        pub enum ElementRef<'a> {
            $($kind(&'a $kind),)*
        }

        $(
            impl Element for $kind {
                fn as_element(&self) -> ElementRef<'_> {
                    ElementRef::$kind(self)
                }
            }

            impl ElementKind for $kind {
                fn from_element(element: ElementRef<'_>) -> Option<&Self> {
                    match element {
                        ElementRef::$kind(e) => Some(e),
                        _ => None,
                    }
                }
            }
        )*
    };
}

element_kinds!(
    QuerySpecification,
    SelectList,
    DerivedColumn,
    TableExpression,
    FromClause,
    TableName,
    WhereClause,
    SearchCondition,
    BooleanTerm,
    BooleanFactor,
    BooleanTest,
    BooleanPrimary,
    Predicate,
    ComparisonPredicate,
    BetweenPredicate,
    InPredicate,
    InPredicateValue,
    LikePredicate,
    EscapeCharacter,
    NullPredicate,
    BooleanPredicate,
    ArrayHasPredicate,
    TextMatchesPredicate,
    RowValueConstructor,
    ValueExpression,
    ArithmeticExpression,
    ValueExpressionPrimary,
    Literal,
    ColumnReference,
    ColumnName,
    SetFunction,
    FunctionCall,
    MultiValueFunction,
    CastSpecification,
    GroupByClause,
    GroupingColumnReference,
    OrderByClause,
    SortSpecificationList,
    SortSpecification,
    SortKey,
    Pagination,
);

fn refs<'a, T: Element>(items: &'a [T]) -> Vec<ElementRef<'a>> {
    items.iter().map(|i| i.as_element()).collect()
}

fn some<'a, T: Element>(item: &'a Option<T>) -> Option<ElementRef<'a>> {
    item.as_ref().map(|i| i.as_element())
}

impl<'a> ElementRef<'a> {
    /// Direct children in source order.
    pub fn children(self) -> Vec<ElementRef<'a>> {
        use ElementRef as E;
        match self {
            E::QuerySpecification(q) => vec![
                q.select_list.as_element(),
                q.table_expression.as_element(),
            ],
            E::SelectList(SelectList::Star) => vec![],
            E::SelectList(SelectList::Columns(columns)) => refs(columns),
            E::DerivedColumn(d) => [Some(d.value_expression.as_element()), some(&d.alias)]
                .into_iter()
                .flatten()
                .collect(),
            E::TableExpression(t) => [
                Some(t.from_clause.as_element()),
                some(&t.where_clause),
                some(&t.group_by_clause),
                some(&t.order_by_clause),
                some(&t.pagination),
            ]
            .into_iter()
            .flatten()
            .collect(),
            E::FromClause(f) => vec![f.table_name.as_element()],
            E::TableName(_) => vec![],
            E::WhereClause(w) => vec![w.search_condition.as_element()],
            E::SearchCondition(s) => refs(&s.terms),
            E::BooleanTerm(t) => refs(&t.factors),
            E::BooleanFactor(f) => vec![f.test.as_element()],
            E::BooleanTest(t) => vec![t.primary.as_element()],
            E::BooleanPrimary(BooleanPrimary::Predicate(p)) => vec![p.as_element()],
            E::BooleanPrimary(BooleanPrimary::Nested(c)) => vec![c.as_element()],
            E::Predicate(p) => vec![match p {
                Predicate::Comparison(p) => p.as_element(),
                Predicate::Between(p) => p.as_element(),
                Predicate::In(p) => p.as_element(),
                Predicate::Like(p) => p.as_element(),
                Predicate::Null(p) => p.as_element(),
                Predicate::Boolean(p) => p.as_element(),
                Predicate::ArrayHas(p) => p.as_element(),
                Predicate::TextMatches(p) => p.as_element(),
                Predicate::BooleanFunction(p) => p.as_element(),
            }],
            E::ComparisonPredicate(p) => vec![p.left.as_element(), p.right.as_element()],
            E::BetweenPredicate(p) => vec![
                p.left.as_element(),
                p.lower.as_element(),
                p.upper.as_element(),
            ],
            E::InPredicate(p) => vec![p.left.as_element(), p.value.as_element()],
            E::InPredicateValue(v) => refs(&v.values),
            E::LikePredicate(p) => [
                Some(p.left.as_element()),
                Some(p.pattern.as_element()),
                some(&p.escape),
            ]
            .into_iter()
            .flatten()
            .collect(),
            E::EscapeCharacter(_) => vec![],
            E::NullPredicate(p) => vec![p.left.as_element()],
            E::BooleanPredicate(p) => vec![p.left.as_element()],
            E::ArrayHasPredicate(p) => [
                Some(p.left.as_element()),
                Some(p.value.as_element()),
                some(&p.escape),
            ]
            .into_iter()
            .flatten()
            .collect(),
            E::TextMatchesPredicate(_) => vec![],
            E::RowValueConstructor(RowValueConstructor::Value(v)) => vec![v.as_element()],
            E::RowValueConstructor(RowValueConstructor::List(values)) => refs(values),
            E::ValueExpression(ValueExpression::Primary(p)) => vec![p.as_element()],
            E::ValueExpression(ValueExpression::Negation(e)) => vec![e.as_element()],
            E::ValueExpression(ValueExpression::Arithmetic(a)) => vec![a.as_element()],
            E::ArithmeticExpression(a) => vec![a.left.as_element(), a.right.as_element()],
            E::ValueExpressionPrimary(p) => vec![match p {
                ValueExpressionPrimary::Literal(l) => l.as_element(),
                ValueExpressionPrimary::ColumnReference(c) => c.as_element(),
                ValueExpressionPrimary::SetFunction(s) => s.as_element(),
                ValueExpressionPrimary::Function(c) => c.as_element(),
                ValueExpressionPrimary::MultiValueFunction(m) => m.as_element(),
                ValueExpressionPrimary::Cast(c) => c.as_element(),
                ValueExpressionPrimary::Parenthesized(e) => e.as_element(),
            }],
            E::Literal(_) => vec![],
            E::ColumnReference(c) => [some(&c.qualifier), Some(c.name.as_element())]
                .into_iter()
                .flatten()
                .collect(),
            E::ColumnName(_) => vec![],
            E::SetFunction(s) => match &s.arguments {
                SetFunctionArguments::Star => vec![],
                SetFunctionArguments::Values { values, .. } => refs(values),
            },
            E::FunctionCall(c) => refs(&c.arguments),
            E::MultiValueFunction(m) => vec![m.column.as_element()],
            E::CastSpecification(c) => vec![c.value.as_element()],
            E::GroupByClause(g) => refs(&g.columns),
            E::GroupingColumnReference(g) => vec![g.column.as_element()],
            E::OrderByClause(o) => vec![o.sort_specifications.as_element()],
            E::SortSpecificationList(l) => refs(&l.items),
            E::SortSpecification(s) => vec![s.sort_key.as_element()],
            E::SortKey(k) => vec![k.value.as_element()],
            E::Pagination(_) => vec![],
        }
    }
}
