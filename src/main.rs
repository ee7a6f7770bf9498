use std::io::{self, BufRead, IsTerminal, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use lexitable::types::{EMPTY_FIELD_PLACEHOLDER, Field, Occurrence};
use lexitable::{
    FormatParser, HashStrategy, HashTable, LineEvent, Lookup, ParseState, Store, TableConfig,
};

#[derive(Parser)]
#[command(
    name = "lexitable",
    about = "Load a delimited dictionary file into a chained hash table and answer key queries",
    version
)]
struct Cli {
    /// Input data file; standard input when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Persist the loaded table here after building ('-' for standard output).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of hash-table slots.
    #[arg(short, long)]
    slots: NonZeroUsize,

    /// Hash strategy: poly31, djb2, xxh64 (or the legacy selectors 1, 2, 3).
    #[arg(short = 'H', long, default_value = "poly31")]
    hash: HashStrategy,

    /// Duplicate keys overwrite instead of accumulating occurrences.
    #[arg(long)]
    no_merge: bool,

    /// Print query results as JSON objects, one per line.
    #[arg(long)]
    json: bool,

    /// Log the slot distribution after loading.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    // ─── init logging ───────────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let config = TableConfig {
        slots: cli.slots,
        strategy: cli.hash,
        merge_duplicates: !cli.no_merge,
    };

    // ─── build the table ────────────────────────────────────────────────────
    let store = match &cli.input {
        Some(path) => {
            Store::open(path, config).with_context(|| format!("loading {}", path.display()))?
        }
        None if io::stdin().is_terminal() => load_interactive(config)?,
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            Store::from_reader(&mut input, config).context("loading standard input")?
        }
    };

    if cli.stats {
        log_stats(store.table());
    }

    // ─── persist ────────────────────────────────────────────────────────────
    if let Some(path) = &cli.output {
        if path.as_os_str() == "-" {
            store
                .write_to(&mut io::stdout().lock())
                .context("writing table to standard output")?;
        } else {
            store
                .save(path)
                .with_context(|| format!("saving {}", path.display()))?;
            info!(path = %path.display(), "table saved");
        }
    }

    // ─── query loop ─────────────────────────────────────────────────────────
    run_queries(&store, cli.json, io::stdin().is_terminal())
}

/// Drive the parser by hand so each header step gets its own prompt, the way
/// the tool behaves when a person types the dataset in. Header mistakes are
/// reported and re-prompted instead of aborting the session.
fn load_interactive(config: TableConfig) -> Result<Store> {
    let mut parser = FormatParser::new();
    let mut table = HashTable::new(config);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        prompt_for(parser.state())?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            parser.finish()?;
            break;
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        match parser.feed(trimmed) {
            Ok(LineEvent::Row { key, occurrence }) => table.insert(key, occurrence),
            Ok(LineEvent::Finished) => break,
            Ok(LineEvent::Consumed | LineEvent::SkippedRow) => {}
            Err(err) => eprintln!("{err}"),
        }
    }

    println!("end of input: {} distinct keys", table.len());
    let metadata = parser
        .into_metadata()
        .expect("header complete after successful interactive load");
    Ok(Store::from_parts(metadata, table))
}

fn prompt_for(state: ParseState) -> io::Result<()> {
    let text = match state {
        ParseState::AwaitSeparator => "separator to use (a single character): ",
        ParseState::AwaitFieldCount { .. } => "number of fields per record: ",
        ParseState::AwaitFieldNames { .. } => "field names, separated by the separator: ",
        ParseState::ReadData => "data row (blank line to finish): ",
        ParseState::Done => return Ok(()),
    };
    let mut out = io::stdout();
    write!(out, "{text}")?;
    out.flush()
}

fn run_queries(store: &Store, json: bool, prompt: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        if prompt {
            print!("key to look up (blank line to quit): ");
            io::stdout().flush()?;
        }
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let key = line.trim();
        if key.is_empty() {
            break;
        }
        debug!(key, "query");
        let lookup = store.search(key);
        if json {
            print_json(store, key, &lookup)?;
        } else {
            print_text(store, key, &lookup);
        }
    }
    Ok(())
}

fn print_text(store: &Store, key: &str, lookup: &Lookup<'_>) {
    let Some(record) = lookup.record else {
        println!("\"{key}\": not found (comparisons: {})", lookup.comparisons);
        return;
    };
    println!("\"{key}\": found (comparisons: {})", lookup.comparisons);
    for (i, occurrence) in record.occurrences.iter().enumerate() {
        println!("occurrence {}:", i + 1);
        for (name, value) in store.metadata().value_names().iter().zip(occurrence) {
            let shown = if value.is_empty() {
                EMPTY_FIELD_PLACEHOLDER
            } else {
                value.as_str()
            };
            println!("  {name}: {shown}");
        }
    }
}

#[derive(Serialize)]
struct QueryReply<'a> {
    key: &'a str,
    found: bool,
    comparisons: usize,
    fields: &'a [Field],
    occurrences: &'a [Occurrence],
}

fn print_json(store: &Store, key: &str, lookup: &Lookup<'_>) -> Result<()> {
    let reply = QueryReply {
        key,
        found: lookup.found(),
        comparisons: lookup.comparisons,
        fields: store.metadata().value_names(),
        occurrences: lookup.occurrences(),
    };
    println!("{}", serde_json::to_string(&reply)?);
    Ok(())
}

fn log_stats(table: &HashTable) {
    let stats = table.stats();
    info!(
        distinct_keys = stats.distinct_keys,
        occupied_slots = stats.occupied_slots,
        max_chain = stats.max_chain,
        "slot distribution"
    );
    for (slot, len) in table.chain_lengths().iter().enumerate() {
        info!("slot {slot}: {len} records");
    }
}
