use std::iter::once;

use chumsky::prelude::*;

use crate::ast::*;
use crate::tokens::*;

use super::expr::{function_call, value_expression};
use super::utils::*;

pub fn search_condition() -> impl Psr<SearchCondition> {
    recursive(|condition| {
        boolean_term_with(condition)
            .separated_by(keyword(KW_OR))
            .at_least(1)
            .map(|terms| SearchCondition { terms })
    })
    .boxed()
}

pub fn boolean_term() -> impl Psr<BooleanTerm> {
    boolean_term_with(search_condition())
}

pub fn boolean_factor() -> impl Psr<BooleanFactor> {
    boolean_factor_with(search_condition())
}

pub fn boolean_test() -> impl Psr<BooleanTest> {
    boolean_test_with(search_condition())
}

pub fn boolean_primary() -> impl Psr<BooleanPrimary> {
    boolean_primary_with(search_condition())
}

fn boolean_term_with(condition: impl Psr<SearchCondition>) -> impl Psr<BooleanTerm> {
    boolean_factor_with(condition)
        .separated_by(keyword(KW_AND))
        .at_least(1)
        .map(|factors| BooleanTerm { factors })
}

fn boolean_factor_with(condition: impl Psr<SearchCondition>) -> impl Psr<BooleanFactor> {
    negation()
        .then(boolean_test_with(condition))
        .map(|(not, test)| BooleanFactor { not, test })
}

fn boolean_test_with(condition: impl Psr<SearchCondition>) -> impl Psr<BooleanTest> {
    boolean_primary_with(condition)
        .then(truth_test().or_not())
        .map(|(primary, truth_test)| BooleanTest {
            primary,
            truth_test,
        })
}

fn boolean_primary_with(condition: impl Psr<SearchCondition>) -> impl Psr<BooleanPrimary> {
    predicate().map(BooleanPrimary::Predicate).or(condition
        .delimited_by(punct(PAREN_L), punct(PAREN_R))
        .map(BooleanPrimary::Nested))
}

fn truth_test() -> impl Psr<TruthTest> {
    keyword(KW_IS)
        .ignore_then(negation())
        .then(choice((
            keyword(KW_TRUE).to(TruthValue::True),
            keyword(KW_FALSE).to(TruthValue::False),
            keyword(KW_UNKNOWN).to(TruthValue::Unknown),
        )))
        .map(|(not, value)| TruthTest { not, value })
}

fn negation() -> impl Psr<bool> {
    keyword(KW_NOT).or_not().map(|n| n.is_some())
}

pub fn row_value_constructor() -> impl Psr<RowValueConstructor> {
    let expr = value_expression();
    let list = expr
        .clone()
        .then(punct(COMMA).ignore_then(expr.clone()).repeated().at_least(1))
        .delimited_by(punct(PAREN_L), punct(PAREN_R))
        .map(|(first, rest)| RowValueConstructor::List(once(first).chain(rest).collect()));
    list.or(expr.map(RowValueConstructor::Value))
}

pub fn in_predicate_value() -> impl Psr<InPredicateValue> {
    value_expression()
        .separated_by(punct(COMMA))
        .at_least(1)
        .delimited_by(punct(PAREN_L), punct(PAREN_R))
        .map(|values| InPredicateValue { values })
}

fn escape_character() -> impl Psr<EscapeCharacter> {
    keyword(KW_ESCAPE)
        .ignore_then(string_literal())
        .map(EscapeCharacter)
}

/// Everything in a predicate after its left-hand side.
#[derive(Clone)]
enum PredicateTail {
    Comparison(ComparisonOperator, RowValueConstructor),
    Between(bool, RowValueConstructor, RowValueConstructor),
    In(bool, InPredicateValue),
    Like(bool, ValueExpression, Option<EscapeCharacter>),
    Null(bool),
    Boolean(bool, bool),
    ArrayHas(bool, bool, InPredicateValue, Option<EscapeCharacter>),
}

impl PredicateTail {
    fn complete(self, left: RowValueConstructor) -> Predicate {
        match self {
            PredicateTail::Comparison(operator, right) => {
                Predicate::Comparison(ComparisonPredicate {
                    left,
                    operator,
                    right,
                })
            }
            PredicateTail::Between(not, lower, upper) => Predicate::Between(BetweenPredicate {
                left,
                not,
                lower,
                upper,
            }),
            PredicateTail::In(not, value) => Predicate::In(InPredicate { left, not, value }),
            PredicateTail::Like(not, pattern, escape) => Predicate::Like(LikePredicate {
                left,
                not,
                pattern,
                escape,
            }),
            PredicateTail::Null(not) => Predicate::Null(NullPredicate { left, not }),
            PredicateTail::Boolean(not, value) => {
                Predicate::Boolean(BooleanPredicate { left, not, value })
            }
            PredicateTail::ArrayHas(not, like, value, escape) => {
                Predicate::ArrayHas(ArrayHasPredicate {
                    left,
                    not,
                    like,
                    value,
                    escape,
                })
            }
        }
    }
}

fn comparison_operator() -> impl Psr<ComparisonOperator> {
    // Two-character operators first so that `<=` is not read as `<`.
    lexeme(choice((
        exactly(COMPARE_NEQ).to(ComparisonOperator::NotEqual),
        exactly(COMPARE_NEQ_ALT).to(ComparisonOperator::NotEqual),
        exactly(COMPARE_LTE).to(ComparisonOperator::LessThanOrEqual),
        exactly(COMPARE_GTE).to(ComparisonOperator::GreaterThanOrEqual),
        exactly(COMPARE_EQ).to(ComparisonOperator::Equal),
        exactly(COMPARE_LT).to(ComparisonOperator::LessThan),
        exactly(COMPARE_GT).to(ComparisonOperator::GreaterThan),
    )))
}

fn predicate_tail() -> impl Psr<PredicateTail> {
    let rvc = row_value_constructor();
    let comparison = comparison_operator()
        .then(rvc.clone())
        .map(|(op, right)| PredicateTail::Comparison(op, right));
    let between = negation()
        .then_ignore(keyword(KW_BETWEEN))
        .then(rvc.clone())
        .then_ignore(keyword(KW_AND))
        .then(rvc)
        .map(|((not, lower), upper)| PredicateTail::Between(not, lower, upper));
    let in_list = negation()
        .then_ignore(keyword(KW_IN))
        .then(in_predicate_value())
        .map(|(not, value)| PredicateTail::In(not, value));
    let like = negation()
        .then_ignore(keyword(KW_LIKE))
        .then(value_expression())
        .then(escape_character().or_not())
        .map(|((not, pattern), escape)| PredicateTail::Like(not, pattern, escape));
    let is = keyword(KW_IS)
        .ignore_then(negation())
        .then(choice((
            keyword(KW_NULL).to(None),
            keyword(KW_TRUE).to(Some(true)),
            keyword(KW_FALSE).to(Some(false)),
        )))
        .map(|(not, value)| match value {
            None => PredicateTail::Null(not),
            Some(value) => PredicateTail::Boolean(not, value),
        });
    let has = negation()
        .then(choice((
            keyword(KW_HAS).to(false),
            keyword(KW_HAS_LIKE).to(true),
        )))
        .then(in_predicate_value())
        .then(escape_character().or_not())
        .map(|(((not, like), value), escape)| PredicateTail::ArrayHas(not, like, value, escape));
    choice((comparison, between, in_list, like, is, has))
}

fn text_matches() -> impl Psr<TextMatchesPredicate> {
    keyword(KW_TEXT_MATCHES)
        .ignore_then(string_literal().delimited_by(punct(PAREN_L), punct(PAREN_R)))
        .map(|search_expression| TextMatchesPredicate { search_expression })
}

fn boolean_function() -> impl Psr<FunctionCall> {
    function_call(value_expression()).try_map(|call, span| {
        if is_boolean_function(&call.name) {
            Ok(call)
        } else {
            Err(Simple::custom(
                span,
                format!("{} is not a boolean function", call.name),
            ))
        }
    })
}

pub fn predicate() -> impl Psr<Predicate> {
    choice((
        text_matches().map(Predicate::TextMatches),
        row_value_constructor()
            .then(predicate_tail())
            .map(|(left, tail)| tail.complete(left)),
        boolean_function().map(Predicate::BooleanFunction),
    ))
    .boxed()
}
