use super::field::FieldValue;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// Width of every line in a PDB file.
pub const LINE_WIDTH: usize = 80;
/// Width of the record name occupying the first columns of a line.
pub const NAME_WIDTH: usize = 6;
/// Width of everything after the record name.
pub const BODY_WIDTH: usize = LINE_WIDTH - NAME_WIDTH;

/// The part of a record a length check was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPart {
    Text,
    Name,
    Body,
}

impl fmt::Display for RecordPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordPart::Text => write!(f, "record text"),
            RecordPart::Name => write!(f, "record name"),
            RecordPart::Body => write!(f, "record body"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("PDB records need plain ASCII text without line breaks, got {0:?}")]
    InputType(String),
    #[error("{part} '{value}' is longer than {max} characters")]
    Length {
        part: RecordPart,
        max: usize,
        value: String,
    },
}

/// Pads `text` with spaces to `width` columns, cutting anything beyond it.
///
/// The input is never modified; a borrowed view is returned when the text
/// already has the requested width.
pub fn padded_view(text: &str, width: usize) -> Cow<'_, str> {
    match text.chars().count().cmp(&width) {
        Ordering::Equal => Cow::Borrowed(text),
        Ordering::Less => Cow::Owned(format!("{:<width$}", text)),
        Ordering::Greater => Cow::Owned(text.chars().take(width).collect()),
    }
}

fn validate_text(value: &str) -> Result<(), RecordError> {
    if value.chars().any(|c| !c.is_ascii() || c.is_ascii_control()) {
        return Err(RecordError::InputType(value.to_string()));
    }
    Ok(())
}

fn check_length(part: RecordPart, value: &str, max: usize) -> Result<(), RecordError> {
    if value.len() > max {
        return Err(RecordError::Length {
            part,
            max,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// A single line of a PDB file.
///
/// A record stores at most 80 columns of ASCII text with trailing whitespace
/// removed, but is always read as if it were padded to exactly 80 columns.
/// Slicing a record through [`Record::field`] strips the slice and coerces it
/// to a [`FieldValue`]; [`Record::raw`] returns the stripped slice unchanged.
///
/// Two records are equal when their stored text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    text: String,
}

impl Record {
    /// Creates a record from a line of text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InputType`] if the text contains characters that
    /// cannot occupy a column (non-ASCII, control characters, line breaks) and
    /// [`RecordError::Length`] if it is longer than 80 characters.
    pub fn new(text: &str) -> Result<Self, RecordError> {
        validate_text(text)?;
        check_length(RecordPart::Text, text, LINE_WIDTH)?;
        Ok(Self {
            text: text.trim_end().to_string(),
        })
    }

    /// Creates a record from raw bytes, which must be valid UTF-8 text.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| RecordError::InputType(String::from_utf8_lossy(bytes).into_owned()))?;
        Self::new(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the whole line. The old text is kept if validation fails.
    pub fn set_text(&mut self, text: &str) -> Result<(), RecordError> {
        *self = Self::new(text)?;
        Ok(())
    }

    /// The record name (columns 1-6) without surrounding whitespace.
    pub fn name(&self) -> &str {
        self.clip(0..NAME_WIDTH).trim()
    }

    /// Replaces the record name, keeping the body in place.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Length`] for names longer than 6 characters; the
    /// record is left unchanged.
    pub fn set_name(&mut self, name: &str) -> Result<(), RecordError> {
        validate_text(name)?;
        check_length(RecordPart::Name, name, NAME_WIDTH)?;
        let text = format!("{:<width$}{}", name, self.body(), width = NAME_WIDTH);
        self.text = text.trim_end().to_string();
        Ok(())
    }

    /// Everything after the record name, as stored.
    pub fn body(&self) -> &str {
        self.clip(NAME_WIDTH..LINE_WIDTH)
    }

    /// Replaces the body, keeping the record name in place.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Length`] for bodies longer than 74 characters; the
    /// record is left unchanged.
    pub fn set_body(&mut self, body: &str) -> Result<(), RecordError> {
        validate_text(body)?;
        check_length(RecordPart::Body, body, BODY_WIDTH)?;
        let text = format!(
            "{:<width$}{}",
            self.clip(0..NAME_WIDTH),
            body,
            width = NAME_WIDTH
        );
        self.text = text.trim_end().to_string();
        Ok(())
    }

    /// The line padded to exactly 80 columns.
    pub fn padded(&self) -> Cow<'_, str> {
        padded_view(&self.text, LINE_WIDTH)
    }

    /// Decodes the columns `range` (0-based, end-exclusive) into a typed value.
    pub fn field(&self, range: Range<usize>) -> FieldValue {
        FieldValue::coerce(self.clip(range))
    }

    /// Decodes the single column `index`.
    ///
    /// A digit comes back as [`FieldValue::Integer`], a blank as
    /// [`FieldValue::Null`] and anything else as one-character text.
    pub fn column(&self, index: usize) -> FieldValue {
        self.field(index..index + 1)
    }

    /// The stripped text of the columns `range` without numeric coercion.
    pub fn raw(&self, range: Range<usize>) -> &str {
        self.clip(range).trim()
    }

    /// The character at column `index`, or `None` if the column is blank.
    pub fn raw_column(&self, index: usize) -> Option<char> {
        self.raw(index..index + 1).chars().next()
    }

    /// Like [`Record::raw`], but blank slices become `None`.
    pub fn raw_opt(&self, range: Range<usize>) -> Option<&str> {
        Some(self.raw(range)).filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.text.contains(pattern)
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    // Columns past the stored text read as padding, so clipping to the stored
    // length and then trimming is the same as slicing the padded view.
    fn clip(&self, range: Range<usize>) -> &str {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        &self.text[start..end]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl AsRef<str> for Record {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for Record {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Record {
    type Error = RecordError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for Record {
    type Error = RecordError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}
