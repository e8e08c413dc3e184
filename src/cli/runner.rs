//! CLI runner - executes commands

use crate::cache::ResultCache;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::driver::{Arg, Driver, Rows};
use crate::dsn::DEFAULT_CACHE_TTL;
use crate::error::{Error, Result, ResultExt};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Query { query, args } => self.query(query, args).await,
            Commands::FlushCache { dir } => self.flush_cache(dir),
        }
    }

    async fn query(&self, query: &str, args: &[String]) -> Result<()> {
        let dsn = self
            .cli
            .dsn
            .as_deref()
            .ok_or_else(|| Error::config("--dsn is required to run a query"))?;

        let start = Instant::now();
        let driver = Driver::new();
        let conn = driver.open(dsn)?;
        let stmt = conn.prepare(query)?;

        let args: Vec<Arg> = args.iter().map(String::as_str).map(parse_arg).collect();
        let rows = stmt.query(&args).await?;
        let count = rows.len();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let written = match self.cli.format {
            OutputFormat::Csv => write_csv(&mut out, rows),
            OutputFormat::Json => write_json(&mut out, rows),
        };
        written
            .and_then(|()| out.flush().map_err(Error::from))
            .context("Failed to write rows")?;

        conn.close()?;
        info!(
            rows = count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "query done"
        );
        Ok(())
    }

    fn flush_cache(&self, dir: &Path) -> Result<()> {
        let cache = ResultCache::open(dir, DEFAULT_CACHE_TTL)?;
        let removed = cache
            .flush_all()
            .with_context(|| format!("Failed to flush {}", dir.display()))?;
        println!("Removed {removed} cache entries from {}", dir.display());
        Ok(())
    }
}

/// Bind integers as numbers, anything else as text
fn parse_arg(value: &str) -> Arg {
    value
        .parse::<i64>()
        .map_or_else(|_| Arg::Text(value.to_string()), Arg::Int)
}

fn write_csv(out: &mut impl Write, rows: Rows) -> Result<()> {
    writeln!(out, "{}", csv_line(rows.columns()))?;
    for row in rows {
        writeln!(out, "{}", csv_line(row.values()))?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, rows: Rows) -> Result<()> {
    for row in rows {
        let object: Map<String, Value> = row
            .columns()
            .iter()
            .zip(row.values())
            .map(|(column, value)| (column.clone(), Value::String(value.clone())))
            .collect();
        writeln!(out, "{}", Value::Object(object))?;
    }
    Ok(())
}

fn csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| {
            if cell.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", cell.replace('"', "\"\""))
            } else {
                cell.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
