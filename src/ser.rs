//! Serialization of Luco trees to Luco and JSON text.
//!
//! The serializer walks a [`Node`] and renders one entry per line. For Luco
//! output the root object is braceless; nested objects render as
//! `key {` … `}` and arrays as `{` … `}` with one element per line. Strings
//! always emit quoted, with structural characters doubled so that the
//! output reparses to a structurally-equal tree. JSON output is
//! conventional.
//!
//! Serialization itself cannot fail; only the file sink can, reported as
//! [`Error::Filesystem`](crate::Error::Filesystem).
//!
//! ## Examples
//!
//! ```rust
//! use luco::{luco, parse};
//!
//! let doc = luco!({
//!     "name": "cat",
//!     "sizes": [1, 2],
//! });
//!
//! let text = doc.to_luco();
//! assert_eq!(text, "name = \"cat\"\nsizes {\n    1\n    2\n}\n");
//! assert_eq!(parse(&text).unwrap(), doc);
//!
//! let json = doc.to_json();
//! assert_eq!(json, "{\n    \"name\": \"cat\",\n    \"sizes\": [\n        1,\n        2\n    ]\n}");
//! ```

use crate::error::{Error, Result};
use crate::node::Node;
use crate::options::Indent;
use crate::parser::SPECIALS;
use crate::scalar::Scalar;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Walks a node tree and renders it into an owned buffer.
struct Serializer {
    out: String,
    indent: Indent,
}

impl Serializer {
    fn new(indent: Indent) -> Self {
        Serializer {
            out: String::new(),
            indent,
        }
    }

    fn into_inner(self) -> String {
        self.out
    }

    /// Luco rendition. `level` is the current nesting depth; the root object
    /// emits its entries without surrounding braces.
    fn luco(&mut self, node: &Node, level: usize) {
        match node {
            Node::Object(map) => {
                let root = level == 0;
                if !root {
                    self.out.push_str("{\n");
                }
                let inner = if root { 0 } else { level };
                for (key, child) in map.iter() {
                    self.out.push_str(&self.indent.render(inner));
                    self.push_key(key);
                    if child.is_value() {
                        self.out.push_str(" = ");
                    } else {
                        self.out.push(' ');
                    }
                    self.luco(child, inner + 1);
                    self.out.push('\n');
                }
                if !root {
                    self.out.push_str(&self.indent.render(level - 1));
                    self.out.push('}');
                }
            }
            Node::Array(arr) => {
                self.out.push_str("{\n");
                for element in arr.iter() {
                    self.out.push_str(&self.indent.render(level));
                    self.luco(element, level + 1);
                    self.out.push('\n');
                }
                self.out.push_str(&self.indent.render(level.saturating_sub(1)));
                self.out.push('}');
            }
            Node::Value(value) => self.push_scalar_luco(value),
        }
    }

    fn push_key(&mut self, key: &str) {
        let plain = !key.is_empty()
            && !key
                .chars()
                .any(|c| c.is_whitespace() || c == '#' || SPECIALS.contains(&c));
        if plain {
            self.out.push_str(key);
        } else {
            self.push_quoted(key);
        }
    }

    fn push_scalar_luco(&mut self, value: &Scalar) {
        match value {
            Scalar::String(s) => self.push_quoted(s),
            other => self.out.push_str(&other.stringify()),
        }
    }

    /// Quoted form with every structural character doubled, the grammar's
    /// escape form. The parser collapses doubled structural characters
    /// inside quoted text, so all six must be doubled on the way out.
    ///
    /// Text starting with a double quote switches to single-quote style:
    /// otherwise the opening quote and the doubled first character would
    /// pair up as an escape.
    fn push_quoted(&mut self, text: &str) {
        let quote = if text.starts_with('"') { '\'' } else { '"' };
        self.out.push(quote);
        for c in text.chars() {
            self.out.push(c);
            if SPECIALS.contains(&c) {
                self.out.push(c);
            }
        }
        self.out.push(quote);
    }

    /// JSON rendition.
    fn json(&mut self, node: &Node, level: usize) {
        match node {
            Node::Object(map) => {
                self.out.push_str("{\n");
                let mut remaining = map.len();
                for (key, child) in map.iter() {
                    self.out.push_str(&self.indent.render(level + 1));
                    self.push_json_string(key);
                    self.out.push_str(": ");
                    self.json(child, level + 1);
                    remaining -= 1;
                    if remaining != 0 {
                        self.out.push(',');
                    }
                    self.out.push('\n');
                }
                self.out.push_str(&self.indent.render(level));
                self.out.push('}');
            }
            Node::Array(arr) => {
                self.out.push_str("[\n");
                let mut remaining = arr.len();
                for element in arr.iter() {
                    self.out.push_str(&self.indent.render(level + 1));
                    self.json(element, level + 1);
                    remaining -= 1;
                    if remaining != 0 {
                        self.out.push(',');
                    }
                    self.out.push('\n');
                }
                self.out.push_str(&self.indent.render(level));
                self.out.push(']');
            }
            Node::Value(value) => match value {
                Scalar::String(s) => self.push_json_string(s),
                other => self.out.push_str(&other.stringify()),
            },
        }
    }

    fn push_json_string(&mut self, text: &str) {
        self.out.push('"');
        for c in text.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    self.out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

impl Node {
    /// Renders the tree as Luco text with the default indentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::luco;
    ///
    /// let doc = luco!({"age": 5});
    /// assert_eq!(doc.to_luco(), "age = 5\n");
    /// ```
    #[must_use]
    pub fn to_luco(&self) -> String {
        self.to_luco_with(&Indent::default())
    }

    /// Renders the tree as Luco text with the given indentation.
    #[must_use]
    pub fn to_luco_with(&self, indent: &Indent) -> String {
        let mut ser = Serializer::new(*indent);
        ser.luco(self, 0);
        ser.into_inner()
    }

    /// Renders the tree as JSON text with the default indentation.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_json_with(&Indent::default())
    }

    /// Renders the tree as JSON text with the given indentation.
    #[must_use]
    pub fn to_json_with(&self, indent: &Indent) -> String {
        let mut ser = Serializer::new(*indent);
        ser.json(self, 0);
        ser.into_inner()
    }

    /// Writes the tree as Luco text to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// [`Error::Filesystem`] when the file cannot be created or written,
    /// carrying the underlying OS message.
    pub fn dump_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.dump_to_file_with(path, &Indent::default())
    }

    /// Writes the tree as Luco text to a file with the given indentation.
    ///
    /// # Errors
    ///
    /// [`Error::Filesystem`] when the file cannot be created or written.
    pub fn dump_to_file_with(&self, path: impl AsRef<Path>, indent: &Indent) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| {
            Error::filesystem(format!("couldn't open '{}', {}", path.display(), e))
        })?;
        file.write_all(self.to_luco_with(indent).as_bytes())
            .map_err(|e| Error::filesystem(format!("couldn't write '{}', {}", path.display(), e)))
    }
}
