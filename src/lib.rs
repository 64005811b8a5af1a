//! # luco
//!
//! Parser and document model for the Luco configuration language.
//!
//! ## What is Luco?
//!
//! Luco is a human-friendly, JSON-like configuration format: bracketed
//! objects and arrays, optional quoting for keys and string values, inferred
//! scalar types, and line comments with a nestable block form.
//!
//! ```text
//! name = "cat"
//! age = 5
//! smol = true
//!
//! # a line comment
//! #{ a block comment, { nestable } by brace depth }
//!
//! features {
//!     "whiskers"
//!     "tail"
//! }
//!
//! dimensions {
//!     height = 24.5
//!     unit = cm
//! }
//! ```
//!
//! Scalars are typed by shape: digits make an integer, digits with a single
//! dot a double, `true`/`false`/`on`/`off` a boolean, `null` a null, and
//! everything else a string. Quoting a value always makes it a string.
//! Structural characters (`{ = } " ' \`) are written twice to mean one
//! literal occurrence.
//!
//! ## Quick Start
//!
//! ```rust
//! use luco::parse;
//!
//! let doc = parse("name = \"cat\"\nage = 5\nsmol = true\n").unwrap();
//!
//! assert_eq!(doc.at("name").as_str(), "cat");
//! assert_eq!(doc.at("age").as_integer(), 5);
//! assert!(doc.at("smol").as_boolean());
//! ```
//!
//! ## Building and mutating trees
//!
//! ```rust
//! use luco::{luco, Node};
//!
//! let mut doc = luco!({
//!     "server": {"port": 8080, "tls": false},
//!     "hosts": ["alpha", "beta"],
//! });
//!
//! doc.at_mut("server").at_mut("port").set(9090);
//! doc.at_mut("hosts").push_back("gamma").unwrap();
//!
//! let overrides = luco!({"server": {"tls": true}});
//! assert!((doc.clone() + overrides).contains("hosts"));
//! ```
//!
//! ## Serialization
//!
//! Trees render back to Luco (`Node::to_luco`) or JSON (`Node::to_json`),
//! with configurable indentation; serializer output always reparses to a
//! structurally-equal tree.
//!
//! ```rust
//! use luco::{luco, parse};
//!
//! let doc = luco!({"key": "val\"ue"});
//! assert_eq!(parse(&doc.to_luco()).unwrap(), doc);
//! ```
//!
//! ## Error handling
//!
//! Every fallible operation has a `try_`-prefixed form returning
//! [`Result`]; the unprefixed accessors panic with the same message and
//! exist for terse chained access. Parse errors carry line, column, and a
//! rendered snippet of the offending line.

pub mod array;
pub mod error;
pub mod infer;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod scalar;
pub mod ser;

pub use array::Array;
pub use error::{Error, Result};
pub use infer::infer;
pub use map::Map;
pub use node::{Node, NodeKind};
pub use options::Indent;
pub use parser::{parse, parse_file};
pub use scalar::{Scalar, ScalarKind};

/// Renders a tree as Luco text with the default indentation.
///
/// Equivalent to [`Node::to_luco`].
///
/// # Examples
///
/// ```rust
/// use luco::{luco, to_string};
///
/// let doc = luco!({"age": 5});
/// assert_eq!(to_string(&doc), "age = 5\n");
/// ```
#[must_use]
pub fn to_string(node: &Node) -> String {
    node.to_luco()
}

/// Renders a tree as JSON text with the default indentation.
///
/// Equivalent to [`Node::to_json`].
#[must_use]
pub fn to_json_string(node: &Node) -> String {
    node.to_json()
}
