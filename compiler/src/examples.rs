//! Example queries for documentation, grouped by category.

use serde::Deserialize;

use crate::errors::{msg, Error, Result};

const BUNDLED_EXAMPLES: &str = include_str!("../resources/examples.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExampleQuery {
    pub category: String,
    pub description: String,
    pub sql: String,
}

#[derive(Debug, Deserialize)]
struct ExampleFile {
    #[serde(default, rename = "example")]
    examples: Vec<ExampleQuery>,
}

/// A read-only table of example queries. Loaded once by whoever needs it and passed around from
/// there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleQueries {
    examples: Vec<ExampleQuery>,
}

impl ExampleQueries {
    /// Read `[[example]]` tables, each with a `category`, `description` and `sql`.
    pub fn load(source: &str) -> Result<Self> {
        let file: ExampleFile = toml::from_str(source)
            .map_err(|e| Error::Config(msg::invalid_examples_toml(&e.to_string())))?;
        Ok(ExampleQueries {
            examples: file.examples,
        })
    }

    /// The examples shipped with this crate.
    pub fn bundled() -> Result<Self> {
        Self::load(BUNDLED_EXAMPLES)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExampleQuery> {
        self.examples.iter()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ExampleQuery> {
        self.examples.iter().filter(move |e| e.category == category)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for example in &self.examples {
            if !categories.contains(&example.category.as_str()) {
                categories.push(&example.category);
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablequery_parser::parse_query;

    #[test]
    fn test_bundled_examples_parse() {
        let examples = ExampleQueries::bundled().unwrap();
        assert!(!examples.is_empty());
        for example in examples.iter() {
            assert!(
                parse_query(&example.sql).is_ok(),
                "example `{}` does not parse: {}",
                example.description,
                example.sql
            );
        }
    }

    #[test]
    fn test_load() {
        let examples = ExampleQueries::load(
            r#"
            [[example]]
            category = "Basics"
            description = "Everything"
            sql = "select * from syn123"

            [[example]]
            category = "Sorting"
            description = "Sorted"
            sql = "select * from syn123 order by foo"

            [[example]]
            category = "Basics"
            description = "Some columns"
            sql = "select foo from syn123"
            "#,
        )
        .unwrap();
        assert_eq!(examples.len(), 3);
        assert_eq!(examples.categories(), vec!["Basics", "Sorting"]);
        assert_eq!(
            examples
                .by_category("Basics")
                .map(|e| e.description.as_str())
                .collect::<Vec<_>>(),
            vec!["Everything", "Some columns"]
        );
    }

    #[test]
    fn test_load_empty_and_invalid() {
        assert_eq!(ExampleQueries::load(""), Ok(ExampleQueries::default()));
        assert!(matches!(
            ExampleQueries::load("[[example]]\ncategory = 1"),
            Err(Error::Config(_))
        ));
    }
}
