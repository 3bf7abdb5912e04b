use std::fmt::{self, Display, Formatter};

use super::*;
use crate::tokens::*;

fn comma_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn not_prefix(not: bool) -> &'static str {
    if not {
        " NOT"
    } else {
        ""
    }
}

pub(crate) fn escape_quotes(value: &str, quote: char) -> String {
    let doubled: String = [quote, quote].iter().collect();
    value.replace(quote, &doubled)
}

impl Display for QuerySpecification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(KW_SELECT)?;
        if let Some(q) = self.set_quantifier {
            write!(f, " {q}")?;
        }
        write!(f, " {} {}", self.select_list, self.table_expression)
    }
}

impl Display for SetQuantifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetQuantifier::Distinct => KW_DISTINCT,
            SetQuantifier::All => KW_ALL,
        })
    }
}

impl Display for SelectList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SelectList::Star => write!(f, "{ASTERISK}"),
            SelectList::Columns(columns) => comma_list(f, columns),
        }
    }
}

impl Display for DerivedColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value_expression)?;
        if let Some(alias) = &self.alias {
            write!(f, " {KW_AS} {alias}")?;
        }
        Ok(())
    }
}

impl Display for TableExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from_clause)?;
        if let Some(w) = &self.where_clause {
            write!(f, " {w}")?;
        }
        if let Some(g) = &self.group_by_clause {
            write!(f, " {g}")?;
        }
        if let Some(o) = &self.order_by_clause {
            write!(f, " {o}")?;
        }
        match &self.pagination {
            Some(p) if !p.is_empty() => write!(f, " {p}"),
            _ => Ok(()),
        }
    }
}

impl Display for FromClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_FROM} {}", self.table_name)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)?;
        if let Some(version) = self.version {
            write!(f, "{PERIOD}{version}")?;
        }
        Ok(())
    }
}

impl Display for WhereClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_WHERE} {}", self.search_condition)
    }
}

impl Display for SearchCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " {KW_OR} ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl Display for BooleanTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, " {KW_AND} ")?;
            }
            write!(f, "{factor}")?;
        }
        Ok(())
    }
}

impl Display for BooleanFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.not {
            write!(f, "{KW_NOT} ")?;
        }
        write!(f, "{}", self.test)
    }
}

impl Display for BooleanTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(t) = &self.truth_test {
            write!(f, " {t}")?;
        }
        Ok(())
    }
}

impl Display for TruthTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = match self.value {
            TruthValue::True => KW_TRUE,
            TruthValue::False => KW_FALSE,
            TruthValue::Unknown => KW_UNKNOWN,
        };
        write!(f, "{KW_IS}{} {value}", not_prefix(self.not))
    }
}

impl Display for BooleanPrimary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BooleanPrimary::Predicate(p) => write!(f, "{p}"),
            BooleanPrimary::Nested(c) => write!(f, "{PAREN_L}{c}{PAREN_R}"),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison(p) => write!(f, "{p}"),
            Predicate::Between(p) => write!(f, "{p}"),
            Predicate::In(p) => write!(f, "{p}"),
            Predicate::Like(p) => write!(f, "{p}"),
            Predicate::Null(p) => write!(f, "{p}"),
            Predicate::Boolean(p) => write!(f, "{p}"),
            Predicate::ArrayHas(p) => write!(f, "{p}"),
            Predicate::TextMatches(p) => write!(f, "{p}"),
            Predicate::BooleanFunction(p) => write!(f, "{p}"),
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComparisonOperator::Equal => COMPARE_EQ,
            ComparisonOperator::NotEqual => COMPARE_NEQ,
            ComparisonOperator::LessThan => COMPARE_LT,
            ComparisonOperator::GreaterThan => COMPARE_GT,
            ComparisonOperator::LessThanOrEqual => COMPARE_LTE,
            ComparisonOperator::GreaterThanOrEqual => COMPARE_GTE,
        })
    }
}

impl Display for ComparisonPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl Display for BetweenPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {KW_BETWEEN} {} {KW_AND} {}",
            self.left,
            not_prefix(self.not),
            self.lower,
            self.upper
        )
    }
}

impl Display for InPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {KW_IN} {}", self.left, not_prefix(self.not), self.value)
    }
}

impl Display for InPredicateValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{PAREN_L}")?;
        comma_list(f, &self.values)?;
        write!(f, "{PAREN_R}")
    }
}

impl Display for LikePredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {KW_LIKE} {}",
            self.left,
            not_prefix(self.not),
            self.pattern
        )?;
        if let Some(e) = &self.escape {
            write!(f, " {KW_ESCAPE} {e}")?;
        }
        Ok(())
    }
}

impl Display for EscapeCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let q = STRING_QUOTE;
        write!(f, "{q}{}{q}", escape_quotes(&self.0, q))
    }
}

impl Display for NullPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {KW_IS}{} {KW_NULL}", self.left, not_prefix(self.not))
    }
}

impl Display for BooleanPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = if self.value { KW_TRUE } else { KW_FALSE };
        write!(f, "{} {KW_IS}{} {value}", self.left, not_prefix(self.not))
    }
}

impl Display for ArrayHasPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword = if self.like { KW_HAS_LIKE } else { KW_HAS };
        write!(
            f,
            "{}{} {keyword} {}",
            self.left,
            not_prefix(self.not),
            self.value
        )?;
        if let Some(e) = &self.escape {
            write!(f, " {KW_ESCAPE} {e}")?;
        }
        Ok(())
    }
}

impl Display for TextMatchesPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let q = STRING_QUOTE;
        write!(
            f,
            "{KW_TEXT_MATCHES}{PAREN_L}{q}{}{q}{PAREN_R}",
            escape_quotes(&self.search_expression, q)
        )
    }
}

impl Display for RowValueConstructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RowValueConstructor::Value(v) => write!(f, "{v}"),
            RowValueConstructor::List(values) => {
                write!(f, "{PAREN_L}")?;
                comma_list(f, values)?;
                write!(f, "{PAREN_R}")
            }
        }
    }
}

impl Display for ValueExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpression::Primary(p) => write!(f, "{p}"),
            ValueExpression::Negation(e) => write!(f, "{MINUS}{e}"),
            ValueExpression::Arithmetic(a) => write!(f, "{a}"),
        }
    }
}

impl Display for ArithmeticExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl Display for ArithmeticOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticOperator::Add => write!(f, "{PLUS}"),
            ArithmeticOperator::Subtract => write!(f, "{MINUS}"),
            ArithmeticOperator::Multiply => write!(f, "{ASTERISK}"),
            ArithmeticOperator::Divide => write!(f, "{SOLIDUS}"),
            ArithmeticOperator::IntegerDivide => f.write_str(KW_DIV),
            ArithmeticOperator::Modulo => write!(f, "{PERCENT}"),
        }
    }
}

impl Display for ValueExpressionPrimary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpressionPrimary::Literal(l) => write!(f, "{l}"),
            ValueExpressionPrimary::ColumnReference(c) => write!(f, "{c}"),
            ValueExpressionPrimary::SetFunction(s) => write!(f, "{s}"),
            ValueExpressionPrimary::Function(c) => write!(f, "{c}"),
            ValueExpressionPrimary::MultiValueFunction(m) => write!(f, "{m}"),
            ValueExpressionPrimary::Cast(c) => write!(f, "{c}"),
            ValueExpressionPrimary::Parenthesized(e) => write!(f, "{PAREN_L}{e}{PAREN_R}"),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Numeric(n) => f.write_str(n),
            Literal::String(s) => {
                let q = STRING_QUOTE;
                write!(f, "{q}{}{q}", escape_quotes(s, q))
            }
        }
    }
}

impl Display for ColumnReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(q) = &self.qualifier {
            write!(f, "{q}{PERIOD}")?;
        }
        write!(f, "{}", self.name)
    }
}

impl Display for ColumnName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.quoted {
            let q = IDENTIFIER_QUOTE;
            write!(f, "{q}{}{q}", escape_quotes(&self.value, q))
        } else {
            f.write_str(&self.value)
        }
    }
}

impl Display for SetFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PAREN_L}", self.function.name())?;
        match &self.arguments {
            SetFunctionArguments::Star => write!(f, "{ASTERISK}")?,
            SetFunctionArguments::Values { quantifier, values } => {
                if let Some(q) = quantifier {
                    write!(f, "{q} ")?;
                }
                comma_list(f, values)?;
            }
        }
        write!(f, "{PAREN_R}")
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PAREN_L}", self.name)?;
        comma_list(f, &self.arguments)?;
        write!(f, "{PAREN_R}")
    }
}

impl Display for MultiValueFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self.function {
            MultiValueFunctionName::Unnest => KW_UNNEST,
        };
        write!(f, "{name}{PAREN_L}{}{PAREN_R}", self.column)
    }
}

impl Display for CastSpecification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{KW_CAST}{PAREN_L}{} {KW_AS} {}{PAREN_R}",
            self.value, self.target
        )
    }
}

impl Display for GroupByClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_GROUP} {KW_BY} ")?;
        comma_list(f, &self.columns)
    }
}

impl Display for GroupingColumnReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)
    }
}

impl Display for OrderByClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_ORDER} {KW_BY} {}", self.sort_specifications)
    }
}

impl Display for SortSpecificationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        comma_list(f, &self.items)
    }
}

impl Display for SortSpecification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sort_key)?;
        if let Some(o) = self.ordering {
            write!(f, " {o}")?;
        }
        Ok(())
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for OrderingSpecification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderingSpecification::Asc => KW_ASC,
            OrderingSpecification::Desc => KW_DESC,
        })
    }
}

impl Display for Pagination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(limit) = self.limit {
            write!(f, "{KW_LIMIT} {limit}")?;
            sep = " ";
        }
        if let Some(offset) = self.offset {
            write!(f, "{sep}{KW_OFFSET} {offset}")?;
        }
        Ok(())
    }
}
