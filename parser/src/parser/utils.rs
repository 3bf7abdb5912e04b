use chumsky::{prelude::*, text::*};

use crate::ast::ColumnName;
use crate::tokens::*;

/// `Psr` is an abbreviation for "Parser". This is abbreviated because it is used in many places,
/// and we don't want it to conflict with Chumsky's `Parser` trait.
///
/// Ideally this would be a type alias, but that needs [trait aliases][1].
///
/// [1]: https://github.com/rust-lang/rust/issues/41517
pub trait Psr<T>: Parser<char, T, Error = Simple<char>> + Clone + 'static {}
impl<S, T> Psr<T> for S where S: Parser<char, T, Error = Simple<char>> + Clone + 'static {}

/// Run `p` and then skip any whitespace after it.
pub fn lexeme<T: 'static>(p: impl Psr<T>) -> impl Psr<T> {
    p.then_ignore(whitespace())
}

pub fn exactly(s: &str) -> impl Psr<String> {
    just(s.chars().collect::<Vec<char>>()).collect::<String>()
}

pub fn punct(c: char) -> impl Psr<char> {
    lexeme(just(c))
}

/// A keyword, matched case-insensitively and only at a word boundary.
pub fn keyword(word: &'static str) -> impl Psr<()> {
    lexeme(ident::<char, Simple<char>>().try_map(move |found: String, span| {
        if found.eq_ignore_ascii_case(word) {
            Ok(())
        } else {
            Err(Simple::custom(span, format!("Expected {word}")))
        }
    }))
}

/// A name which is looked up in a closed set, e.g. a function name.
pub fn named<T: 'static>(lookup: fn(&str) -> Option<T>) -> impl Psr<T> {
    lexeme(ident::<char, Simple<char>>().try_map(move |found: String, span| {
        lookup(&found).ok_or_else(|| Simple::custom(span, format!("Unknown name {found}")))
    }))
}

pub fn regular_identifier() -> impl Psr<String> {
    ident::<char, Simple<char>>().try_map(|found: String, span| {
        if is_reserved_word(&found) {
            Err(Simple::custom(
                span,
                format!("Encountered reserved word {found}"),
            ))
        } else {
            Ok(found)
        }
    })
}

/// Text between `quote` characters. A doubled quote inside stands for one quote character.
pub fn quoted(quote: char) -> impl Psr<String> {
    filter(move |c: &char| *c != quote)
        .or(just(vec![quote, quote]).to(quote))
        .repeated()
        .delimited_by(just(quote), just(quote))
        .collect::<String>()
}

pub fn string_literal() -> impl Psr<String> {
    lexeme(quoted(STRING_QUOTE))
}

pub fn column_name() -> impl Psr<ColumnName> {
    lexeme(
        regular_identifier()
            .map(ColumnName::bare)
            .or(quoted(IDENTIFIER_QUOTE).map(ColumnName::quoted)),
    )
}

/// Digits with an optional fraction and exponent, kept exactly as written.
pub fn unsigned_numeric() -> impl Psr<String> {
    let exponent = just('e')
        .or(just('E'))
        .chain::<char, _, _>(just(PLUS).or(just(MINUS)).or_not())
        .chain::<char, _, _>(digits(10));
    digits(10)
        .chain::<char, _, _>(just(PERIOD).chain(digits(10)).or_not().flatten())
        .chain::<char, _, _>(exponent.or_not().flatten())
        .collect::<String>()
}

pub fn unsigned_integer() -> impl Psr<u64> {
    digits(10).try_map(|v: String, span| {
        v.parse::<u64>()
            .map_err(|_| Simple::custom(span, format!("Invalid integer {v}")))
    })
}

/// Wrap a production so that it must consume the whole input, ignoring surrounding whitespace.
pub fn complete<T: 'static>(p: impl Psr<T>) -> impl Psr<T> {
    whitespace().ignore_then(p).then_ignore(end())
}
