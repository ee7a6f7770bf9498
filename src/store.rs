use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::StoreError;
use crate::format::parser::{FormatParser, LineEvent};
use crate::format::writer;
use crate::metadata::Metadata;
use crate::table::{HashTable, Lookup, TableConfig};

// ─── Store ──────────────────────────────────────────────────────────────────

/// A fully loaded dataset: the schema discovered from the header plus the
/// hash table built from the data rows.
///
/// The store exclusively owns the table and everything under it; dropping the
/// store releases the whole structure.
#[derive(Debug)]
pub struct Store {
    metadata: Metadata,
    table: HashTable,
}

impl Store {
    /// Build a store by pumping `reader` line by line through the format
    /// parser into a fresh table.
    ///
    /// Reading stops at the first blank data line, leaving the rest of the
    /// stream untouched for the caller — an interactive session continues
    /// with queries on the same stream. Lines are stripped of trailing
    /// `\r`/`\n` before parsing.
    pub fn from_reader<R: BufRead>(reader: &mut R, config: TableConfig) -> Result<Self, StoreError> {
        let mut parser = FormatParser::new();
        let mut table = HashTable::new(config);
        let mut skipped = 0usize;
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                parser.finish()?;
                break;
            }
            let trimmed = line.trim_end_matches(['\r', '\n']);
            match parser.feed(trimmed)? {
                LineEvent::Row { key, occurrence } => table.insert(key, occurrence),
                LineEvent::SkippedRow => skipped += 1,
                LineEvent::Consumed => {}
                LineEvent::Finished => break,
            }
        }

        let metadata = parser
            .into_metadata()
            .expect("finish() succeeded, so the header was fully parsed");
        info!(
            distinct_keys = table.len(),
            slots = table.slot_count(),
            strategy = %table.strategy(),
            skipped_rows = skipped,
            "table loaded"
        );
        Ok(Self { metadata, table })
    }

    /// Assemble a store from parts built elsewhere (e.g. an interactive
    /// loader driving the parser itself).
    pub fn from_parts(metadata: Metadata, table: HashTable) -> Self {
        Self { metadata, table }
    }

    /// Open and load `path`.
    pub fn open(path: impl AsRef<Path>, config: TableConfig) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::from_reader(&mut reader, config)
    }

    /// Persist to `path` in the input format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Serializer entry point for any destination.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writer::write_table(out, &self.metadata, &self.table)
    }

    #[inline]
    pub fn search(&self, key: &str) -> Lookup<'_> {
        self.table.search(key)
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[inline]
    pub fn table(&self) -> &HashTable {
        &self.table
    }
}
