use chumsky::prelude::*;

use crate::ast::*;
use crate::tokens::*;

use super::query::set_quantifier;
use super::utils::*;

pub fn value_expression() -> impl Psr<ValueExpression> {
    recursive(|expr| {
        let primary = value_expression_primary(expr).map(ValueExpression::Primary);
        let factor = punct(MINUS)
            .repeated()
            .then(primary)
            .foldr(|_, e| ValueExpression::Negation(Box::new(e)));
        let term = factor
            .clone()
            .then(multiplicative_operator().then(factor).repeated())
            .foldl(|left, (op, right)| ValueExpression::arithmetic(left, op, right));
        term.clone()
            .then(additive_operator().then(term).repeated())
            .foldl(|left, (op, right)| ValueExpression::arithmetic(left, op, right))
    })
    .boxed()
}

fn multiplicative_operator() -> impl Psr<ArithmeticOperator> {
    choice((
        punct(ASTERISK).to(ArithmeticOperator::Multiply),
        punct(SOLIDUS).to(ArithmeticOperator::Divide),
        punct(PERCENT).to(ArithmeticOperator::Modulo),
        keyword(KW_DIV).to(ArithmeticOperator::IntegerDivide),
    ))
}

fn additive_operator() -> impl Psr<ArithmeticOperator> {
    punct(PLUS)
        .to(ArithmeticOperator::Add)
        .or(punct(MINUS).to(ArithmeticOperator::Subtract))
}

fn value_expression_primary(expr: impl Psr<ValueExpression>) -> impl Psr<ValueExpressionPrimary> {
    choice((
        set_function(expr.clone()).map(ValueExpressionPrimary::SetFunction),
        cast_specification(expr.clone()).map(ValueExpressionPrimary::Cast),
        multi_value_function().map(ValueExpressionPrimary::MultiValueFunction),
        function_call(expr.clone()).map(ValueExpressionPrimary::Function),
        literal().map(ValueExpressionPrimary::Literal),
        column_reference().map(ValueExpressionPrimary::ColumnReference),
        expr.delimited_by(punct(PAREN_L), punct(PAREN_R))
            .map(|e| ValueExpressionPrimary::Parenthesized(Box::new(e))),
    ))
}

pub fn literal() -> impl Psr<Literal> {
    lexeme(unsigned_numeric())
        .map(Literal::Numeric)
        .or(string_literal().map(Literal::String))
}

pub fn column_reference() -> impl Psr<ColumnReference> {
    column_name()
        .then(punct(PERIOD).ignore_then(column_name()).or_not())
        .map(|(first, second)| match second {
            Some(name) => ColumnReference {
                qualifier: Some(first),
                name,
            },
            None => ColumnReference {
                qualifier: None,
                name: first,
            },
        })
}

fn set_function(expr: impl Psr<ValueExpression>) -> impl Psr<SetFunction> {
    let count_star = keyword(KW_COUNT)
        .then(punct(PAREN_L))
        .then(punct(ASTERISK))
        .then(punct(PAREN_R))
        .to(SetFunction {
            function: AggregateFunction::Count,
            arguments: SetFunctionArguments::Star,
        });
    let with_values = named(AggregateFunction::from_name)
        .then_ignore(punct(PAREN_L))
        .then(set_quantifier().or_not())
        .then(expr.separated_by(punct(COMMA)).at_least(1))
        .then_ignore(punct(PAREN_R))
        .map(|((function, quantifier), values)| SetFunction {
            function,
            arguments: SetFunctionArguments::Values { quantifier, values },
        });
    count_star.or(with_values)
}

pub fn function_call(expr: impl Psr<ValueExpression>) -> impl Psr<FunctionCall> {
    named(scalar_function_name)
        .then(
            expr.separated_by(punct(COMMA))
                .delimited_by(punct(PAREN_L), punct(PAREN_R)),
        )
        .map(|(name, arguments)| FunctionCall {
            name: name.to_string(),
            arguments,
        })
}

fn multi_value_function() -> impl Psr<MultiValueFunction> {
    keyword(KW_UNNEST)
        .ignore_then(column_reference().delimited_by(punct(PAREN_L), punct(PAREN_R)))
        .map(|column| MultiValueFunction {
            function: MultiValueFunctionName::Unnest,
            column,
        })
}

fn cast_specification(expr: impl Psr<ValueExpression>) -> impl Psr<CastSpecification> {
    keyword(KW_CAST)
        .ignore_then(
            expr.then_ignore(keyword(KW_AS))
                .then(lexeme(regular_identifier()))
                .delimited_by(punct(PAREN_L), punct(PAREN_R)),
        )
        .map(|(value, target)| CastSpecification {
            value: Box::new(value),
            target: target.to_ascii_uppercase(),
        })
}
