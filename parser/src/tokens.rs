//! Keywords, punctuation, and the closed function sets of the table query language.

pub const KW_ALL: &str = "ALL";
pub const KW_AND: &str = "AND";
pub const KW_AS: &str = "AS";
pub const KW_ASC: &str = "ASC";
pub const KW_BETWEEN: &str = "BETWEEN";
pub const KW_BY: &str = "BY";
pub const KW_CAST: &str = "CAST";
pub const KW_COUNT: &str = "COUNT";
pub const KW_DESC: &str = "DESC";
pub const KW_DISTINCT: &str = "DISTINCT";
pub const KW_DIV: &str = "DIV";
pub const KW_ESCAPE: &str = "ESCAPE";
pub const KW_FALSE: &str = "FALSE";
pub const KW_FROM: &str = "FROM";
pub const KW_GROUP: &str = "GROUP";
pub const KW_HAS: &str = "HAS";
pub const KW_HAS_LIKE: &str = "HAS_LIKE";
pub const KW_IN: &str = "IN";
pub const KW_IS: &str = "IS";
pub const KW_LIKE: &str = "LIKE";
pub const KW_LIMIT: &str = "LIMIT";
pub const KW_NOT: &str = "NOT";
pub const KW_NULL: &str = "NULL";
pub const KW_OFFSET: &str = "OFFSET";
pub const KW_OR: &str = "OR";
pub const KW_ORDER: &str = "ORDER";
pub const KW_SELECT: &str = "SELECT";
pub const KW_TEXT_MATCHES: &str = "TEXT_MATCHES";
pub const KW_TRUE: &str = "TRUE";
pub const KW_UNKNOWN: &str = "UNKNOWN";
pub const KW_UNNEST: &str = "UNNEST";
pub const KW_WHERE: &str = "WHERE";

/// Words which can never be used as a bare identifier. Quote them to use them as column names.
pub const RESERVED_WORDS: &[&str] = &[
    KW_ALL,
    KW_AND,
    KW_AS,
    KW_ASC,
    KW_BETWEEN,
    KW_BY,
    KW_CAST,
    KW_DESC,
    KW_DISTINCT,
    KW_DIV,
    KW_ESCAPE,
    KW_FALSE,
    KW_FROM,
    KW_GROUP,
    KW_HAS,
    KW_HAS_LIKE,
    KW_IN,
    KW_IS,
    KW_LIKE,
    KW_LIMIT,
    KW_NOT,
    KW_NULL,
    KW_OFFSET,
    KW_OR,
    KW_ORDER,
    KW_SELECT,
    KW_TEXT_MATCHES,
    KW_TRUE,
    KW_UNKNOWN,
    KW_UNNEST,
    KW_WHERE,
];

pub const PAREN_L: char = '(';
pub const PAREN_R: char = ')';
pub const COMMA: char = ',';
pub const PERIOD: char = '.';
pub const ASTERISK: char = '*';
pub const SOLIDUS: char = '/';
pub const PERCENT: char = '%';
pub const PLUS: char = '+';
pub const MINUS: char = '-';

pub const COMPARE_EQ: &str = "=";
pub const COMPARE_NEQ: &str = "<>";
pub const COMPARE_NEQ_ALT: &str = "!=";
pub const COMPARE_LT: &str = "<";
pub const COMPARE_GT: &str = ">";
pub const COMPARE_LTE: &str = "<=";
pub const COMPARE_GTE: &str = ">=";

pub const STRING_QUOTE: char = '\'';
pub const IDENTIFIER_QUOTE: char = '"';

/// Scalar functions which may be called by name. Names are matched case-insensitively and
/// rendered in upper case.
pub const SCALAR_FUNCTIONS: &[&str] = &[
    "ABS",
    "CEIL",
    "COALESCE",
    "CONCAT",
    "CURRENT_TIMESTAMP",
    "DAYOFMONTH",
    "DAYOFWEEK",
    "DAYOFYEAR",
    "FLOOR",
    "FROM_UNIXTIME",
    "HOUR",
    "IFNULL",
    "ISINFINITY",
    "ISNAN",
    "JSON_EXTRACT",
    "LENGTH",
    "LOWER",
    "MINUTE",
    "MONTH",
    "NOW",
    "REPLACE",
    "ROUND",
    "SECOND",
    "TRIM",
    "UNIX_TIMESTAMP",
    "UPPER",
    "WEEK",
    "YEAR",
];

/// Scalar functions which evaluate to a boolean and can therefore stand alone as a predicate.
pub const BOOLEAN_FUNCTIONS: &[&str] = &["ISINFINITY", "ISNAN"];

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

pub fn scalar_function_name(word: &str) -> Option<&'static str> {
    SCALAR_FUNCTIONS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(word))
        .copied()
}

pub fn is_boolean_function(name: &str) -> bool {
    BOOLEAN_FUNCTIONS.iter().any(|f| f.eq_ignore_ascii_case(name))
}
