//! String and binary values
//!
//! Both kinds have two representations behind one contract: a bounded
//! in-memory buffer for ordinary values and a chunked large-object form
//! for unbounded content. Comparison is ordinal over the logical
//! sequence regardless of representation, and concatenation streams
//! chunks instead of materializing one contiguous buffer once the inline
//! bound is crossed.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Byte bound for the inline representations. Concatenations growing
/// past this switch to the chunked form.
pub const INLINE_LIMIT: usize = 8 * 1024;

#[derive(Clone, Debug)]
pub enum StringValue {
    Null,
    /// Bounded in-memory character sequence.
    Chars(String),
    /// Large-object-backed character sequence.
    Clob(TextChunks),
}

#[derive(Clone, Debug)]
pub struct TextChunks {
    chunks: Arc<Vec<Arc<str>>>,
    byte_len: usize,
}

impl TextChunks {
    fn from_chunks(chunks: Vec<Arc<str>>) -> TextChunks {
        let byte_len = chunks.iter().map(|c| c.len()).sum();
        TextChunks {
            chunks: Arc::new(chunks),
            byte_len,
        }
    }

    pub fn chunks(&self) -> &[Arc<str>] {
        &self.chunks
    }
}

impl StringValue {
    /// Picks the representation by size: small content stays inline,
    /// anything past the inline bound is stored as a large object.
    pub fn new(content: impl Into<String>) -> StringValue {
        let content = content.into();
        if content.len() <= INLINE_LIMIT {
            StringValue::Chars(content)
        } else {
            StringValue::Clob(TextChunks::from_chunks(vec![Arc::from(content.as_str())]))
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StringValue::Null)
    }

    pub fn is_large(&self) -> bool {
        matches!(self, StringValue::Clob(_))
    }

    pub fn byte_len(&self) -> Option<usize> {
        match self {
            StringValue::Null => None,
            StringValue::Chars(s) => Some(s.len()),
            StringValue::Clob(c) => Some(c.byte_len),
        }
    }

    pub fn char_len(&self) -> Option<usize> {
        match self {
            StringValue::Null => None,
            StringValue::Chars(s) => Some(s.chars().count()),
            StringValue::Clob(c) => Some(c.chunks.iter().map(|chunk| chunk.chars().count()).sum()),
        }
    }

    /// The logical character sequence, independent of representation.
    pub fn chars(&self) -> Box<dyn Iterator<Item = char> + '_> {
        match self {
            StringValue::Null => Box::new(std::iter::empty()),
            StringValue::Chars(s) => Box::new(s.chars()),
            StringValue::Clob(c) => Box::new(c.chunks.iter().flat_map(|chunk| chunk.chars())),
        }
    }

    /// Ordinal comparison; `None` when either side is null.
    pub fn compare(&self, other: &StringValue) -> Option<Ordering> {
        if self.is_null() || other.is_null() {
            return None;
        }
        Some(self.chars().cmp(other.chars()))
    }

    /// Concatenation across representations. The combined content is
    /// re-chunked, not copied into one buffer, once it crosses the
    /// inline bound.
    pub fn concat(&self, other: &StringValue) -> StringValue {
        let (a_len, b_len) = match (self.byte_len(), other.byte_len()) {
            (Some(a), Some(b)) => (a, b),
            _ => return StringValue::Null,
        };
        if a_len + b_len <= INLINE_LIMIT {
            let mut out = String::with_capacity(a_len + b_len);
            out.extend(self.chars());
            out.extend(other.chars());
            return StringValue::Chars(out);
        }
        let mut chunks: Vec<Arc<str>> = Vec::new();
        for side in [self, other] {
            match side {
                StringValue::Null => {}
                StringValue::Chars(s) => {
                    if !s.is_empty() {
                        chunks.push(Arc::from(s.as_str()));
                    }
                }
                StringValue::Clob(c) => chunks.extend(c.chunks.iter().cloned()),
            }
        }
        StringValue::Clob(TextChunks::from_chunks(chunks))
    }

    /// Materialized text of a non-null value.
    pub fn to_text(&self) -> Option<String> {
        match self {
            StringValue::Null => None,
            StringValue::Chars(s) => Some(s.clone()),
            StringValue::Clob(c) => {
                let mut out = String::with_capacity(c.byte_len);
                for chunk in c.chunks.iter() {
                    out.push_str(chunk);
                }
                Some(out)
            }
        }
    }
}

impl PartialEq for StringValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StringValue::Null, StringValue::Null) => true,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringValue::Null => write!(f, "NULL"),
            StringValue::Chars(s) => write!(f, "{}", s),
            StringValue::Clob(c) => {
                for chunk in c.chunks.iter() {
                    write!(f, "{}", chunk)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        StringValue::new(value)
    }
}

#[derive(Clone, Debug)]
pub enum BinaryValue {
    Null,
    /// Bounded in-memory byte sequence.
    Bytes(Vec<u8>),
    /// Large-object-backed byte sequence.
    Blob(ByteChunks),
}

#[derive(Clone, Debug)]
pub struct ByteChunks {
    chunks: Arc<Vec<Arc<[u8]>>>,
    len: usize,
}

impl ByteChunks {
    fn from_chunks(chunks: Vec<Arc<[u8]>>) -> ByteChunks {
        let len = chunks.iter().map(|c| c.len()).sum();
        ByteChunks {
            chunks: Arc::new(chunks),
            len,
        }
    }

    pub fn chunks(&self) -> &[Arc<[u8]>] {
        &self.chunks
    }
}

impl BinaryValue {
    pub fn new(content: impl Into<Vec<u8>>) -> BinaryValue {
        let content = content.into();
        if content.len() <= INLINE_LIMIT {
            BinaryValue::Bytes(content)
        } else {
            BinaryValue::Blob(ByteChunks::from_chunks(vec![Arc::from(content.as_slice())]))
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BinaryValue::Null)
    }

    pub fn is_large(&self) -> bool {
        matches!(self, BinaryValue::Blob(_))
    }

    pub fn len(&self) -> Option<usize> {
        match self {
            BinaryValue::Null => None,
            BinaryValue::Bytes(b) => Some(b.len()),
            BinaryValue::Blob(c) => Some(c.len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn bytes(&self) -> Box<dyn Iterator<Item = u8> + '_> {
        match self {
            BinaryValue::Null => Box::new(std::iter::empty()),
            BinaryValue::Bytes(b) => Box::new(b.iter().copied()),
            BinaryValue::Blob(c) => Box::new(c.chunks.iter().flat_map(|chunk| chunk.iter().copied())),
        }
    }

    pub fn compare(&self, other: &BinaryValue) -> Option<Ordering> {
        if self.is_null() || other.is_null() {
            return None;
        }
        Some(self.bytes().cmp(other.bytes()))
    }

    pub fn concat(&self, other: &BinaryValue) -> BinaryValue {
        let (a_len, b_len) = match (self.len(), other.len()) {
            (Some(a), Some(b)) => (a, b),
            _ => return BinaryValue::Null,
        };
        if a_len + b_len <= INLINE_LIMIT {
            let mut out = Vec::with_capacity(a_len + b_len);
            out.extend(self.bytes());
            out.extend(other.bytes());
            return BinaryValue::Bytes(out);
        }
        let mut chunks: Vec<Arc<[u8]>> = Vec::new();
        for side in [self, other] {
            match side {
                BinaryValue::Null => {}
                BinaryValue::Bytes(b) => {
                    if !b.is_empty() {
                        chunks.push(Arc::from(b.as_slice()));
                    }
                }
                BinaryValue::Blob(c) => chunks.extend(c.chunks.iter().cloned()),
            }
        }
        BinaryValue::Blob(ByteChunks::from_chunks(chunks))
    }

    /// Canonical lowercase hex form of a non-null value.
    pub fn to_text(&self) -> Option<String> {
        match self {
            BinaryValue::Null => None,
            BinaryValue::Bytes(b) => Some(hex::encode(b)),
            BinaryValue::Blob(c) => {
                let mut out = String::with_capacity(c.len * 2);
                for chunk in c.chunks.iter() {
                    out.push_str(&hex::encode(chunk));
                }
                Some(out)
            }
        }
    }

    pub fn parse(text: &str) -> Result<BinaryValue> {
        hex::decode(text.trim())
            .map(BinaryValue::new)
            .map_err(|_| Error::InvalidValue(format!("invalid binary literal {:?}", text)))
    }
}

impl PartialEq for BinaryValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BinaryValue::Null, BinaryValue::Null) => true,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}
