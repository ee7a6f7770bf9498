use crate::types::{Field, Occurrence};

// ─── Metadata ───────────────────────────────────────────────────────────────

/// File-level schema discovered from the three header lines: the separator
/// character, the field count (key included), and the field names.
///
/// Produced once by the parser and read-only afterwards; every table built
/// from a file carries the metadata that described it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub separator: char,
    /// Number of fields per row, key included. Always ≥ 1.
    pub field_count: usize,
    /// `field_count` names; index 0 names the key.
    pub field_names: Vec<Field>,
}

impl Metadata {
    /// Build from the parsed header values. `names_line` is split on
    /// `separator`; missing trailing names are padded with empty fields,
    /// surplus tokens are dropped.
    pub fn from_header(separator: char, field_count: usize, names_line: &str) -> Self {
        let mut tokens = names_line.split(separator);
        let field_names = (0..field_count)
            .map(|_| Field::from(tokens.next().unwrap_or("")))
            .collect();
        Self {
            separator,
            field_count,
            field_names,
        }
    }

    #[inline]
    pub fn key_name(&self) -> &str {
        self.field_names[0].as_str()
    }

    /// Names of the non-key fields, aligned with occurrence values.
    #[inline]
    pub fn value_names(&self) -> &[Field] {
        &self.field_names[1..]
    }

    /// Split a data line into its key and `field_count - 1` values.
    ///
    /// Missing trailing values default to empty fields; surplus tokens are
    /// ignored. Returns `None` when the key token is missing or empty — the
    /// caller treats that as a skippable row, never a fatal error.
    pub fn split_row(&self, line: &str) -> Option<(Field, Occurrence)> {
        let mut tokens = line.split(self.separator);
        let key = tokens.next().filter(|t| !t.is_empty())?;
        let values = (0..self.field_count - 1)
            .map(|_| Field::from(tokens.next().unwrap_or("")))
            .collect();
        Some((Field::from(key), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> Metadata {
        Metadata::from_header(',', 3, "word,type,def")
    }

    #[test]
    fn test_from_header_pads_missing_names() {
        let m = Metadata::from_header(';', 4, "word;type");
        assert_eq!(m.field_names, vec!["word", "type", "", ""]);
        assert_eq!(m.key_name(), "word");
        assert_eq!(m.value_names(), ["type", "", ""]);
    }

    #[test]
    fn test_split_row_full() {
        let (key, occ) = meta().split_row("cat,n,animal").unwrap();
        assert_eq!(key, "cat");
        assert_eq!(occ, vec!["n", "animal"]);
    }

    #[test]
    fn test_split_row_pads_short_rows() {
        let (key, occ) = meta().split_row("cat,n").unwrap();
        assert_eq!(key, "cat");
        assert_eq!(occ, vec!["n", ""]);

        let (_, occ) = meta().split_row("cat").unwrap();
        assert_eq!(occ, vec!["", ""]);
    }

    #[test]
    fn test_split_row_keeps_interior_empties() {
        let (_, occ) = meta().split_row("cat,,animal").unwrap();
        assert_eq!(occ, vec!["", "animal"]);
    }

    #[test]
    fn test_split_row_ignores_surplus_tokens() {
        let (_, occ) = meta().split_row("cat,n,animal,extra,more").unwrap();
        assert_eq!(occ, vec!["n", "animal"]);
    }

    #[test]
    fn test_split_row_rejects_empty_key() {
        assert!(meta().split_row(",x,y").is_none());
    }

    #[test]
    fn test_split_row_key_only_schema() {
        let m = Metadata::from_header(',', 1, "word");
        let (key, occ) = m.split_row("cat").unwrap();
        assert_eq!(key, "cat");
        assert!(occ.is_empty());
    }
}
