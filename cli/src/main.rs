use clap::{Args, Parser, Subcommand};
use std::{
    io::{self, Read},
    process::ExitCode,
};
use tablequery::{ExampleQueries, Options, TableSqlProcessor};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Table query rewriter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of a query
    Format(QueryArgs),
    /// Print a query counting the rows the given query matches
    Count(QueryArgs),
    /// Print a query selecting the row ids and versions the given query matches
    RowIds {
        #[command(flatten)]
        query: QueryArgs,
        /// Maximum number of rows to select
        #[arg(long, default_value_t = 1000)]
        max_limit: u64,
    },
    /// Narrow a query to one page of its results
    Paginate {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long)]
        offset: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Sort a query by the given columns, ahead of its existing sorts
    Sort {
        #[command(flatten)]
        query: QueryArgs,
        /// JSON array of `{"column": ..., "direction": "ASC" | "DESC"}`
        #[arg(long)]
        items: String,
    },
    /// Sort a query by a column, flipping the direction if it is already sorted by it
    ToggleSort {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long)]
        column: String,
    },
    /// Narrow a `SELECT *` query to the selected facet values
    Facets {
        #[command(flatten)]
        query: QueryArgs,
        /// JSON array of facet column requests
        #[arg(long)]
        selected: String,
    },
    /// Add query filters to the WHERE clause of a query
    Filters {
        #[command(flatten)]
        query: QueryArgs,
        /// JSON array of query filters
        #[arg(long)]
        filters: String,
    },
    /// List the bundled example queries
    Examples {
        /// Only list examples in this category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// Path to the table schema JSON file
    #[arg(short, long)]
    schema: Option<String>,
    /// Path to a TOML file of options
    #[arg(short, long)]
    config: Option<String>,
    /// The SQL to rewrite. If empty, stdin will be used.
    sql: Option<String>,
}

impl QueryArgs {
    fn processor(&self) -> Result<TableSqlProcessor, String> {
        let schema_json = match &self.schema {
            Some(path) => read_file(path)?,
            None => "[]".to_string(),
        };
        let options = match &self.config {
            Some(path) => Options::from_toml(&read_file(path)?).map_err(|e| e.to_string())?,
            None => Options::default(),
        };
        TableSqlProcessor::new(&schema_json, options).map_err(|e| e.to_string())
    }

    fn sql(&self) -> Result<String, String> {
        match &self.sql {
            Some(sql) => Ok(sql.clone()),
            None => get_stdin(),
        }
    }
}

fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Unable to read {path}: {e}"))
}

fn get_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Unable to read stdin: {e}"))?;
    Ok(buffer)
}

fn parse_json<T: serde::de::DeserializeOwned>(name: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {name}: {e}"))
}

/// Runs a rewrite. `None` means the query has no such rewrite, e.g. counting an aggregate.
fn rewrite<F>(args: &QueryArgs, f: F) -> Result<Option<String>, String>
where
    F: FnOnce(&TableSqlProcessor, &str) -> tablequery::Result<Option<String>>,
{
    let processor = args.processor()?;
    let sql = args.sql()?;
    f(&processor, &sql).map_err(|e| e.to_string())
}

fn list_examples(category: Option<&str>) -> Result<Option<String>, String> {
    let examples = ExampleQueries::bundled().map_err(|e| e.to_string())?;
    let mut lines = Vec::new();
    for name in examples.categories() {
        if category.is_some_and(|c| !c.eq_ignore_ascii_case(name)) {
            continue;
        }
        lines.push(format!("# {name}"));
        for example in examples.by_category(name) {
            lines.push(format!("-- {}", example.description));
            lines.push(example.sql.clone());
        }
        lines.push(String::new());
    }
    Ok(Some(lines.join("\n")))
}

fn run(command: Command) -> Result<Option<String>, String> {
    match command {
        Command::Format(args) => rewrite(&args, |p, sql| p.format(sql).map(Some)),
        Command::Count(args) => rewrite(&args, |p, sql| p.count_sql(sql)),
        Command::RowIds { query, max_limit } => {
            rewrite(&query, |p, sql| p.row_ids_sql(sql, max_limit))
        }
        Command::Paginate {
            query,
            offset,
            limit,
        } => rewrite(&query, |p, sql| p.paginate(sql, offset, limit).map(Some)),
        Command::Sort { query, items } => {
            let items: Vec<tablequery::rewrite::SortItem> = parse_json("sort items", &items)?;
            rewrite(&query, |p, sql| p.sort(sql, &items).map(Some))
        }
        Command::ToggleSort { query, column } => {
            rewrite(&query, |p, sql| p.toggle_sort(sql, &column).map(Some))
        }
        Command::Facets { query, selected } => {
            let selected: Vec<tablequery::facets::FacetColumnRequest> =
                parse_json("facet requests", &selected)?;
            rewrite(&query, |p, sql| {
                p.generate_sql_with_facets(sql, &selected).map(Some)
            })
        }
        Command::Filters { query, filters } => {
            let filters: Vec<tablequery::filters::QueryFilter> =
                parse_json("query filters", &filters)?;
            rewrite(&query, |p, sql| p.apply_query_filters(sql, &filters).map(Some))
        }
        Command::Examples { category } => list_examples(category.as_deref()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args = Cli::parse();
    tracing::debug!(command = ?args.command, "running");
    match run(args.command) {
        Ok(Some(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("The query aggregates, so it has no such rewrite.");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
