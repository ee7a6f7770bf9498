use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::collections::HashSet;
use std::hash::BuildHasherDefault;

// ─── Shared aliases ─────────────────────────────────────────────────────────

/// One text value of a row. Field lengths are unconstrained; most real
/// datasets keep them short, which is what `SmolStr` is built for.
pub type Field = SmolStr;

/// The non-key values of one data row, in file order. Always exactly
/// `field_count - 1` entries; short rows are padded with empty fields at
/// parse time.
pub type Occurrence = Vec<Field>;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FastHashSet<T> = HashSet<T, BuildHasherDefault<FxHasher>>;

// ─── Format constants ───────────────────────────────────────────────────────

/// Lines starting with this character (and longer than one character) are
/// comments in every parser state. A lone `#` is a valid separator line.
pub const COMMENT_CHAR: char = '#';

/// What the query printer shows in place of an empty field value.
pub const EMPTY_FIELD_PLACEHOLDER: &str = "X";
