mod logging;
mod render;
mod store;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use estrella_core::{ColumnSelection, Error as CoreError, SchemaRegistry, compose_join, render_select};
use estrella_ingest::{
    IngestError, InsertionEngine, IsoContinentTable, RecordReader, SqlStore, StoreError,
    split_statements,
};
use render::render_table;
use store::PgStore;

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

#[derive(Parser, Debug)]
#[command(name = "estrella", version, about = "CSV-to-star-schema loader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the star schema from a SQL script.
    Init(InitArgs),
    /// Normalize a demographic CSV into the schema.
    Load(LoadArgs),
    /// Read back a table, optionally joined with its parents.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct ConnArgs {
    /// Database connection string.
    #[arg(long, env = "DATABASE_URL", value_name = "CONNECTION_STRING")]
    conn: String,
}

#[derive(Args, Debug)]
struct InitArgs {
    #[command(flatten)]
    conn: ConnArgs,
    /// SQL script with the table definitions.
    #[arg(long, default_value = "assets/schema.sql")]
    schema: PathBuf,
}

#[derive(Args, Debug)]
struct LoadArgs {
    #[command(flatten)]
    conn: ConnArgs,
    /// Source CSV file.
    #[arg(value_name = "CSV")]
    csv: PathBuf,
    /// Optional path for the JSON load report.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[command(flatten)]
    conn: ConnArgs,
    /// Root table name.
    #[arg(value_name = "TABLE")]
    table: String,
    /// Tables to join, in order; each must be referenced as `id_<table>`.
    #[arg(long = "join", value_name = "TABLE")]
    joins: Vec<String>,
    /// Column selection: a range like `1..4` or a comma list of
    /// indices/names. Defaults to all columns.
    #[arg(long)]
    columns: Option<String>,
    /// Raw filter fragments appended after FROM, in order.
    #[arg(long = "filter", value_name = "FRAGMENT")]
    filters: Vec<String>,
    /// Row limit appended as the last filter.
    #[arg(long, default_value_t = 15)]
    limit: u32,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Init(args) => run_init(args).await,
        Command::Load(args) => run_load(args).await,
        Command::Show(args) => run_show(args).await,
    }
}

async fn run_init(args: InitArgs) -> Result<(), CliError> {
    let script = std::fs::read_to_string(&args.schema)?;
    let statements = split_statements(&script);
    if statements.is_empty() {
        return Err(CliError::InvalidArg(format!(
            "no statements in {}",
            args.schema.display()
        )));
    }

    let store = PgStore::connect(&args.conn.conn).await?;
    let count = statements.len();
    for statement in statements {
        store.execute_batch(&statement).await?;
    }
    info!(statements = count, script = %args.schema.display(), "schema created");
    Ok(())
}

async fn run_load(args: LoadArgs) -> Result<(), CliError> {
    let store = PgStore::connect(&args.conn.conn).await?;
    let lookup = IsoContinentTable;
    let mut registry = SchemaRegistry::new()?;

    let records = RecordReader::from_path(&args.csv)?;
    let engine = InsertionEngine::new(&store, &lookup);
    let report = engine.run(&mut registry, records).await?;

    if let Some(path) = &args.report {
        report.write_json(path)?;
    }
    info!(
        csv = %args.csv.display(),
        rows = report.rows_read,
        statements = report.statements_total,
        "load finished"
    );
    Ok(())
}

async fn run_show(args: ShowArgs) -> Result<(), CliError> {
    let registry = SchemaRegistry::new()?;
    let root = registry
        .table_by_name(&args.table)
        .ok_or_else(|| CliError::InvalidArg(format!("unknown table '{}'", args.table)))?;

    let joined = args
        .joins
        .iter()
        .map(|name| {
            registry
                .table_by_name(name)
                .ok_or_else(|| CliError::InvalidArg(format!("unknown table '{name}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let join = compose_join(root, &joined);
    let selection = match &args.columns {
        Some(spec) => parse_selection(spec)?,
        None => ColumnSelection::All,
    };
    let columns = join.select_columns(&selection)?;

    let mut filters = args.filters.clone();
    filters.push(format!("limit {}", args.limit));
    let sql = render_select(&join.from_clause, &columns.join(","), &filters);

    let store = PgStore::connect(&args.conn.conn).await?;
    let rows = store.fetch_rows(&sql).await?;

    let headers: Vec<String> = columns
        .iter()
        .map(|column| column.replace('"', ""))
        .collect();
    print!("{}", render_table(&headers, &rows));
    Ok(())
}

/// `1..4` / `2..` select a contiguous range; a comma list selects explicit
/// indices or names.
fn parse_selection(spec: &str) -> Result<ColumnSelection, CliError> {
    if let Some((start, end)) = spec.split_once("..") {
        let start: usize = start
            .parse()
            .map_err(|_| CliError::InvalidArg(format!("bad range start '{start}'")))?;
        let end = if end.is_empty() {
            None
        } else {
            Some(
                end.parse()
                    .map_err(|_| CliError::InvalidArg(format!("bad range end '{end}'")))?,
            )
        };
        return Ok(ColumnSelection::Range { start, end });
    }

    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.iter().all(|part| part.parse::<usize>().is_ok()) {
        let indices = parts
            .iter()
            .filter_map(|part| part.parse().ok())
            .collect();
        return Ok(ColumnSelection::Indices(indices));
    }
    Ok(ColumnSelection::Names(
        parts.into_iter().map(str::to_string).collect(),
    ))
}
