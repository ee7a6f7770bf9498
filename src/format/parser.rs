use tracing::warn;

use crate::error::FormatError;
use crate::metadata::Metadata;
use crate::types::{COMMENT_CHAR, Field, Occurrence};

// ─── ParseState ─────────────────────────────────────────────────────────────

/// Where the parser is in the header → data progression. Header values
/// collected so far ride along in the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    AwaitSeparator,
    AwaitFieldCount {
        separator: char,
    },
    AwaitFieldNames {
        separator: char,
        field_count: usize,
    },
    ReadData,
    Done,
}

impl ParseState {
    /// What the state is waiting for, for diagnostics.
    fn expected(self) -> &'static str {
        match self {
            ParseState::AwaitSeparator => "the separator line",
            ParseState::AwaitFieldCount { .. } => "the field-count line",
            ParseState::AwaitFieldNames { .. } => "the field-names line",
            ParseState::ReadData | ParseState::Done => "data rows",
        }
    }
}

// ─── LineEvent ──────────────────────────────────────────────────────────────

/// What feeding one line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Comment skipped or header progress made.
    Consumed,
    /// A well-formed data row, ready for the table.
    Row { key: Field, occurrence: Occurrence },
    /// A data row without a key token; logged and dropped.
    SkippedRow,
    /// Blank data line: the input is complete.
    Finished,
}

// ─── FormatParser ───────────────────────────────────────────────────────────

/// Line-at-a-time parser for the self-describing delimited format.
///
/// The parser owns no I/O: the caller owns the line source and decides what
/// to do with each [`LineEvent`], which keeps the state machine testable
/// against synthetic line sequences. Lines must already be stripped of their
/// trailing newline.
#[derive(Debug)]
pub struct FormatParser {
    state: ParseState,
    metadata: Option<Metadata>,
    line_no: usize,
}

impl Default for FormatParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitSeparator,
            metadata: None,
            line_no: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// The discovered schema. `Some` from the moment the field-names line has
    /// been consumed.
    #[inline]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn into_metadata(self) -> Option<Metadata> {
        self.metadata
    }

    /// Consume one line and report what it was.
    ///
    /// Header violations are fatal; a data row with a missing key is skipped
    /// with a warning and parsing continues.
    pub fn feed(&mut self, line: &str) -> Result<LineEvent, FormatError> {
        self.line_no += 1;

        // Comments are skipped in every state. A lone `#` is not a comment.
        if line.len() > 1 && line.starts_with(COMMENT_CHAR) {
            return Ok(LineEvent::Consumed);
        }

        match self.state {
            ParseState::AwaitSeparator => self.on_separator(line),
            ParseState::AwaitFieldCount { separator } => self.on_field_count(line, separator),
            ParseState::AwaitFieldNames {
                separator,
                field_count,
            } => self.on_field_names(line, separator, field_count),
            ParseState::ReadData => self.on_data(line),
            ParseState::Done => Err(FormatError::UnexpectedLine(line.to_string())),
        }
    }

    /// Signal end of input. Legal once the header is complete; inside the
    /// header it is a fatal format error rather than a half-built table.
    pub fn finish(&mut self) -> Result<(), FormatError> {
        match self.state {
            ParseState::ReadData | ParseState::Done => {
                self.state = ParseState::Done;
                Ok(())
            }
            state => Err(FormatError::TruncatedHeader {
                expected: state.expected(),
            }),
        }
    }

    // ─── One transition per state ───────────────────────────────────────────

    fn on_separator(&mut self, line: &str) -> Result<LineEvent, FormatError> {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(separator), None) => {
                self.state = ParseState::AwaitFieldCount { separator };
                Ok(LineEvent::Consumed)
            }
            _ => Err(FormatError::BadSeparator(line.to_string())),
        }
    }

    fn on_field_count(&mut self, line: &str, separator: char) -> Result<LineEvent, FormatError> {
        match line.trim().parse::<usize>() {
            Ok(field_count) if field_count >= 1 => {
                self.state = ParseState::AwaitFieldNames {
                    separator,
                    field_count,
                };
                Ok(LineEvent::Consumed)
            }
            _ => Err(FormatError::BadFieldCount(line.to_string())),
        }
    }

    fn on_field_names(
        &mut self,
        line: &str,
        separator: char,
        field_count: usize,
    ) -> Result<LineEvent, FormatError> {
        self.metadata = Some(Metadata::from_header(separator, field_count, line));
        self.state = ParseState::ReadData;
        Ok(LineEvent::Consumed)
    }

    fn on_data(&mut self, line: &str) -> Result<LineEvent, FormatError> {
        if line.is_empty() {
            self.state = ParseState::Done;
            return Ok(LineEvent::Finished);
        }
        // ReadData is only reachable with metadata in place.
        let metadata = self.metadata.as_ref().expect("metadata set before ReadData");
        match metadata.split_row(line) {
            Some((key, occurrence)) => Ok(LineEvent::Row { key, occurrence }),
            None => {
                warn!(line = self.line_no, content = line, "data row without a key token; skipped");
                Ok(LineEvent::SkippedRow)
            }
        }
    }
}
