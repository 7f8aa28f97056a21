//! Key/value metadata tags and their report rendering.
//!
//! Containers, streams, chapters and programs all carry free-form tags
//! (`title`, `encoder`, `language`, ...). [`Metadata`] keeps them in
//! insertion order so that reports are deterministic, and [`dump_metadata`]
//! renders them as an indented `Metadata:` block.

use std::fmt::{Result as FmtResult, Write};

/// Key under which the stream language is stored. It is rendered inline in
/// the stream header, never inside the metadata block.
pub const LANGUAGE_KEY: &str = "language";

/// Longest run of characters printed between two control characters.
const MAX_CHUNK_CHARS: usize = 255;

/// An insertion-ordered collection of metadata tags.
///
/// # Example
///
/// ```
/// use probe_report::Metadata;
///
/// let mut tags = Metadata::new();
/// tags.insert("title", "Big Buck Bunny");
/// tags.insert("language", "eng");
///
/// assert_eq!(tags.get("TITLE"), Some("Big Buck Bunny"));
/// assert_eq!(tags.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    ///
    /// Keys compare ignoring ASCII case, as in [`get`](Metadata::get). An
    /// existing matching entry keeps its position and takes the new key and
    /// value; otherwise the entry is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&key))
        {
            Some(entry) => *entry = (key, value),
            None => self.entries.push((key, value)),
        }
    }

    /// Look up the first entry whose key matches `key`, ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Write `metadata` as an indented `Metadata:` block.
///
/// Nothing is written when the collection is empty or holds nothing but a
/// `language` tag. Every other entry becomes
/// `"<indent>  <key padded to 16>: <value>"`. Inside a value, a line feed
/// starts a continuation line with a blank key column, a carriage return
/// becomes a single space, and backspace, vertical tab and form feed are
/// dropped.
///
/// # Example
///
/// ```
/// use probe_report::{Metadata, dump_metadata};
///
/// let tags: Metadata = [("encoder", "Lavf60.3.100")].into_iter().collect();
/// let mut out = String::new();
/// dump_metadata(&mut out, &tags, "  ").unwrap();
///
/// assert_eq!(out, "  Metadata:\n    encoder         : Lavf60.3.100\n");
/// ```
pub fn dump_metadata<W: Write>(out: &mut W, metadata: &Metadata, indent: &str) -> FmtResult {
    if metadata.is_empty() || (metadata.len() == 1 && metadata.get(LANGUAGE_KEY).is_some()) {
        return Ok(());
    }

    writeln!(out, "{indent}Metadata:")?;
    for (key, value) in metadata.iter().filter(|(key, _)| *key != LANGUAGE_KEY) {
        write!(out, "{indent}  {key:<16}: ")?;
        write_value(out, value, indent)?;
        writeln!(out)?;
    }
    Ok(())
}

fn is_break_character(character: char) -> bool {
    matches!(character, '\x08' | '\n' | '\x0b' | '\x0c' | '\r')
}

fn write_value<W: Write>(out: &mut W, value: &str, indent: &str) -> FmtResult {
    let mut rest = value;
    while !rest.is_empty() {
        let end = rest.find(is_break_character).unwrap_or(rest.len());
        let chunk = &rest[..end];
        match chunk.char_indices().nth(MAX_CHUNK_CHARS) {
            Some((cut, _)) => out.write_str(&chunk[..cut])?,
            None => out.write_str(chunk)?,
        }

        let mut tail = rest[end..].chars();
        match tail.next() {
            Some('\r') => out.write_char(' ')?,
            Some('\n') => write!(out, "\n{indent}  {:<16}: ", "")?,
            _ => {}
        }
        rest = tail.as_str();
    }
    Ok(())
}
