use std::io::{self, Write};

use crate::metadata::Metadata;
use crate::table::HashTable;
use crate::types::Field;

// ─── Writer ─────────────────────────────────────────────────────────────────

/// Write the table back out in the same self-describing format it was read
/// from: separator line, field-count line, separator-joined field names, then
/// one row per (key, occurrence) pair.
///
/// Row order is slot 0..n, head-first within each chain, occurrences in
/// insertion order. The key is repeated on every row so the output parses
/// back to the same set of (key, occurrence) pairs.
pub fn write_table<W: Write>(
    out: &mut W,
    metadata: &Metadata,
    table: &HashTable,
) -> io::Result<()> {
    writeln!(out, "{}", metadata.separator)?;
    writeln!(out, "{}", metadata.field_count)?;
    write_joined(out, &metadata.field_names, metadata.separator)?;

    for record in table.records() {
        for occurrence in &record.occurrences {
            write!(out, "{}", record.key)?;
            for value in occurrence {
                write!(out, "{}{}", metadata.separator, value)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_joined<W: Write>(out: &mut W, fields: &[Field], separator: char) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(out, "{separator}")?;
        }
        write!(out, "{field}")?;
    }
    writeln!(out)
}

/// In-memory render, mostly for tests and the round-trip law.
pub fn to_string(metadata: &Metadata, table: &HashTable) -> String {
    let mut buf = Vec::new();
    write_table(&mut buf, metadata, table).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("serializer emits UTF-8")
}
