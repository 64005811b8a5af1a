//! Error types for Luco parsing, access, and serialization.
//!
//! Every fallible operation in this crate reports through [`Error`], and the
//! `try_`-prefixed API surface returns [`Result`]. The panicking accessors
//! (`at`, `as_integer`, `+`, …) raise the same errors via `panic!` at the API
//! boundary; internal code paths always propagate `Result`.
//!
//! ## Error categories
//!
//! - **Parsing errors**: structural mistakes in Luco text, located by line
//!   and column with a rendered snippet of the offending line
//! - **Mis-queries**: a missing key ([`Error::KeyNotFound`]) or an access
//!   that disagrees with the node's kind ([`Error::WrongType`]) — local,
//!   branchable, and never mutate the tree
//! - **Filesystem errors**: failures opening or writing files, carrying the
//!   underlying OS message
//!
//! ## Examples
//!
//! ```rust
//! use luco::{parse, Error};
//!
//! let err = parse("{invalid}").unwrap_err();
//! assert!(matches!(err, Error::Parsing { .. }));
//! // The message carries line:col and a caret pointing at the cursor.
//! assert!(err.to_string().contains("1:"));
//! ```

use std::fmt::Write as _;
use thiserror::Error;

/// All errors produced by the Luco library.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An object key or array index was not found.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A file could not be opened, read, or written.
    #[error("filesystem error: {0}")]
    Filesystem(String),

    /// Structural error in Luco text, with location and a rendered snippet.
    #[error("parsing error at {line}:{col}: {msg}\n{snippet}")]
    Parsing {
        line: usize,
        col: usize,
        msg: String,
        snippet: String,
    },

    /// A lexeme classified as one kind could not be converted to it.
    #[error("parsing error, wrong type: {0}")]
    ParsingWrongType(String),

    /// An operation that requires a particular node or scalar kind was
    /// applied to a different one.
    #[error("wrong type: {0}")]
    WrongType(String),

    /// An array position outside the valid range.
    #[error("wrong index: {0}")]
    WrongIndex(String),
}

impl Error {
    /// Creates a [`Error::KeyNotFound`] for an object key.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(format!("key '{key}' not found"))
    }

    /// Creates a [`Error::KeyNotFound`] for an array index.
    pub fn index_not_found(index: usize) -> Self {
        Error::KeyNotFound(format!("index '{index}' not found"))
    }

    /// Creates a [`Error::Parsing`] located at `line:col`, rendering a
    /// snippet with the offending line and a caret at the cursor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::Error;
    ///
    /// let err = Error::parsing(3, 7, "key == value", "unexpected '='");
    /// assert!(err.to_string().contains("3:7"));
    /// assert!(err.to_string().contains("key == value"));
    /// ```
    pub fn parsing(line: usize, col: usize, source_line: &str, msg: impl Into<String>) -> Self {
        Error::Parsing {
            line,
            col,
            msg: msg.into(),
            snippet: render_snippet(line, col, source_line),
        }
    }

    /// Creates a [`Error::WrongType`] with a display message.
    pub fn wrong_type(msg: impl Into<String>) -> Self {
        Error::WrongType(msg.into())
    }

    /// Creates a [`Error::WrongIndex`] for an out-of-range array position.
    pub fn wrong_index(index: usize, len: usize) -> Self {
        Error::WrongIndex(format!("index '{index}' out of range for length {len}"))
    }

    /// Creates a [`Error::Filesystem`] carrying the underlying OS message.
    pub fn filesystem(msg: impl Into<String>) -> Self {
        Error::Filesystem(msg.into())
    }
}

/// Renders the offending line with a gutter and a caret under the cursor.
fn render_snippet(line: usize, col: usize, source_line: &str) -> String {
    let text = source_line.trim_end_matches('\n');
    let gutter = line.to_string();
    let mut out = String::new();
    let _ = writeln!(out, "  {gutter} | {text}");
    let _ = write!(
        out,
        "  {:gw$} | {:>cw$}",
        "",
        "^",
        gw = gutter.len(),
        cw = col.max(1)
    );
    out
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
