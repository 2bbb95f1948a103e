//! Grid pool seeding tool.
//!
//! Reads a JSON array of `{cells, words_across, words_down}` records,
//! validates each through the domain grid rules, and inserts the ones the
//! pool does not already contain (deduplicated by content hash).

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Deserialize;

use backend::adapters::grids_sea;
use backend::config::db::{DbOwner, DbProfile};
use backend::domain::grid::GridContent;
use backend::infra::db::connect_db;
use backend::repos;

#[derive(Parser)]
#[command(name = "seed-grids")]
#[command(about = "Load grid definitions into the FiveBy grid pool")]
struct Args {
    /// Path to a JSON array of {cells, words_across, words_down} records
    file: PathBuf,

    /// Validate and report without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Stop after processing this many records
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct GridRecord {
    cells: String,
    words_across: Vec<String>,
    words_down: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("backend=info,sqlx=warn,sea_orm=warn")
        .init();

    let args = Args::parse();

    let raw = match std::fs::read_to_string(&args.file) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("cannot read {}: {e}", args.file.display());
            process::exit(1);
        }
    };
    let records: Vec<GridRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{} is not a JSON array of grid records: {e}", args.file.display());
            process::exit(1);
        }
    };

    let conn = match connect_db(DbProfile::Prod, DbOwner::App).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("database connection failed: {e}");
            process::exit(1);
        }
    };

    let take = args.limit.unwrap_or(records.len());
    let mut inserted = 0usize;
    let mut skipped = 0usize;
    let mut invalid = 0usize;

    for (position, record) in records.into_iter().take(take).enumerate() {
        let content = GridContent {
            cells: record.cells,
            words_across: record.words_across,
            words_down: record.words_down,
        };
        if let Err(e) = content.validate() {
            eprintln!("record {position}: invalid grid: {e}");
            invalid += 1;
            continue;
        }

        if args.dry_run {
            let exists = match grids_sea::find_by_content_hash(&conn, &content.content_hash()).await
            {
                Ok(found) => found.is_some(),
                Err(e) => {
                    eprintln!("record {position}: lookup failed: {e}");
                    process::exit(1);
                }
            };
            if exists {
                skipped += 1;
            } else {
                inserted += 1;
            }
            continue;
        }

        match repos::grids::add_grid(&conn, &content).await {
            Ok(Some(_)) => inserted += 1,
            Ok(None) => skipped += 1,
            Err(e) => {
                eprintln!("record {position}: insert failed: {e}");
                process::exit(1);
            }
        }
    }

    let mode = if args.dry_run { " (dry run)" } else { "" };
    println!("inserted {inserted}, skipped {skipped} duplicates, {invalid} invalid{mode}");
    if invalid > 0 {
        process::exit(2);
    }
}
