//! Leaf values of a Luco document.
//!
//! This module provides [`Scalar`], the tagged union over every leaf kind a
//! Luco document can hold, and [`ScalarKind`], its discriminant.
//!
//! ## Core Types
//!
//! - [`Scalar`]: one of string, integer, double, boolean, null, or empty
//! - [`ScalarKind`]: the kind tag, usable for dispatch without a payload
//!
//! ## Usage Patterns
//!
//! ### Creating scalars
//!
//! ```rust
//! use luco::Scalar;
//!
//! let s = Scalar::from("hello");
//! let n = Scalar::from(42);
//! let d = Scalar::from(2.5);
//! let b = Scalar::from(true);
//! let null = Scalar::from(());
//!
//! assert!(s.is_string());
//! assert!(n.is_integer() && n.is_number());
//! assert!(d.is_double() && d.is_number());
//! assert!(b.is_boolean());
//! assert!(null.is_null());
//! ```
//!
//! ### Extracting values
//!
//! ```rust
//! use luco::Scalar;
//!
//! let n = Scalar::from(42);
//! assert_eq!(n.try_as_integer().unwrap(), 42);
//! assert_eq!(n.try_as_number().unwrap(), 42.0);
//! assert!(n.try_as_string().is_err());
//! ```

use crate::error::{Error, Result};
use std::fmt;

/// The kind of a [`Scalar`].
///
/// `Empty` denotes "not yet set" and is only ever produced by construction
/// or reset; parsing never yields it. `Null` is a present, explicit null.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Double,
    Boolean,
    Null,
    Empty,
}

impl ScalarKind {
    /// Returns the kind name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Double => "double",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Null => "null",
            ScalarKind::Empty => "none",
        }
    }
}

/// A Luco leaf value.
///
/// The payload lives in the variant, so kind and payload can never disagree.
/// Construction goes through `From` for every scalar-convertible Rust type;
/// `()` stands in for an explicit null.
///
/// # Examples
///
/// ```rust
/// use luco::{Scalar, ScalarKind};
///
/// let mut value = Scalar::default();
/// assert_eq!(value.kind(), ScalarKind::Empty);
///
/// value.set(3.5);
/// assert_eq!(value.kind(), ScalarKind::Double);
/// assert_eq!(value.stringify(), "3.5");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
    #[default]
    Empty,
}

impl Scalar {
    /// Returns the kind tag of this scalar.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Double(_) => ScalarKind::Double,
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Null => ScalarKind::Null,
            Scalar::Empty => ScalarKind::Empty,
        }
    }

    /// Returns the kind name used in diagnostics, one of
    /// `"string"`, `"integer"`, `"double"`, `"boolean"`, `"null"`, `"none"`.
    #[inline]
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns `true` if this scalar holds a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Scalar::String(_))
    }

    /// Returns `true` if this scalar holds an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Scalar::Integer(_))
    }

    /// Returns `true` if this scalar holds a double.
    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Scalar::Double(_))
    }

    /// Returns `true` if this scalar holds a number (integer or double).
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Scalar::Integer(_) | Scalar::Double(_))
    }

    /// Returns `true` if this scalar holds a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Scalar::Boolean(_))
    }

    /// Returns `true` if this scalar is an explicit null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Returns `true` if this scalar has not been set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Scalar::Empty)
    }

    /// Borrows the string payload.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is not a string.
    pub fn try_as_str(&self) -> Result<&str> {
        match self {
            Scalar::String(s) => Ok(s),
            other => Err(other.cast_error("string")),
        }
    }

    /// Clones the string payload.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is not a string.
    pub fn try_as_string(&self) -> Result<String> {
        self.try_as_str().map(str::to_owned)
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is not an integer.
    pub fn try_as_integer(&self) -> Result<i64> {
        match self {
            Scalar::Integer(i) => Ok(*i),
            other => Err(other.cast_error("integer")),
        }
    }

    /// Returns the double payload.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is not a double.
    pub fn try_as_double(&self) -> Result<f64> {
        match self {
            Scalar::Double(d) => Ok(*d),
            other => Err(other.cast_error("double")),
        }
    }

    /// Returns the numeric payload, promoting an integer to `f64`.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is neither integer nor double.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::Scalar;
    ///
    /// assert_eq!(Scalar::from(3).try_as_number().unwrap(), 3.0);
    /// assert_eq!(Scalar::from(3.5).try_as_number().unwrap(), 3.5);
    /// assert!(Scalar::from(true).try_as_number().is_err());
    /// ```
    pub fn try_as_number(&self) -> Result<f64> {
        match self {
            Scalar::Integer(i) => Ok(*i as f64),
            Scalar::Double(d) => Ok(*d),
            other => Err(other.cast_error("number")),
        }
    }

    /// Returns the boolean payload.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is not a boolean.
    pub fn try_as_boolean(&self) -> Result<bool> {
        match self {
            Scalar::Boolean(b) => Ok(*b),
            other => Err(other.cast_error("boolean")),
        }
    }

    /// Succeeds iff the scalar is an explicit null.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the scalar is not null.
    pub fn try_as_null(&self) -> Result<()> {
        match self {
            Scalar::Null => Ok(()),
            other => Err(other.cast_error("null")),
        }
    }

    /// Borrows the string payload.
    ///
    /// # Panics
    ///
    /// Panics if the scalar is not a string; see [`Scalar::try_as_str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self.try_as_str() {
            Ok(s) => s,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the integer payload, panicking on kind mismatch.
    #[must_use]
    pub fn as_integer(&self) -> i64 {
        match self.try_as_integer() {
            Ok(i) => i,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the double payload, panicking on kind mismatch.
    #[must_use]
    pub fn as_double(&self) -> f64 {
        match self.try_as_double() {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the numeric payload as `f64`, panicking on kind mismatch.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self.try_as_number() {
            Ok(n) => n,
            Err(e) => panic!("{e}"),
        }
    }

    /// Returns the boolean payload, panicking on kind mismatch.
    #[must_use]
    pub fn as_boolean(&self) -> bool {
        match self.try_as_boolean() {
            Ok(b) => b,
            Err(e) => panic!("{e}"),
        }
    }

    /// Replaces payload and kind with `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::Scalar;
    ///
    /// let mut value = Scalar::from("text");
    /// value.set(7);
    /// assert!(value.is_integer());
    /// ```
    pub fn set(&mut self, value: impl Into<Scalar>) {
        *self = value.into();
    }

    /// Returns the canonical textual form of the scalar.
    ///
    /// Doubles render with six fractional digits, then trailing zeros are
    /// stripped; at least one digit is kept after the decimal point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::Scalar;
    ///
    /// assert_eq!(Scalar::from(5.0).stringify(), "5.0");
    /// assert_eq!(Scalar::from(1.25).stringify(), "1.25");
    /// assert_eq!(Scalar::from(42).stringify(), "42");
    /// assert_eq!(Scalar::from(true).stringify(), "true");
    /// assert_eq!(Scalar::from(()).stringify(), "null");
    /// ```
    #[must_use]
    pub fn stringify(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Double(d) => stringify_double(*d),
            Scalar::Boolean(true) => "true".to_string(),
            Scalar::Boolean(false) => "false".to_string(),
            Scalar::Null => "null".to_string(),
            Scalar::Empty => String::new(),
        }
    }

    fn cast_error(&self, wanted: &str) -> Error {
        Error::wrong_type(format!(
            "trying to cast the value '{}' which is a '{}' to '{}'",
            self.stringify(),
            self.kind_name(),
            wanted
        ))
    }
}

/// Fixed-precision rendering with trailing-zero stripping.
fn stringify_double(d: f64) -> String {
    if !d.is_finite() {
        // Not representable in the grammar; fall back to Display.
        return d.to_string();
    }
    let mut s = format!("{d:.6}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<i8> for Scalar {
    fn from(value: i8) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<i16> for Scalar {
    fn from(value: i16) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<u16> for Scalar {
    fn from(value: u16) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Double(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Double(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// `()` is the null marker: `Scalar::from(())` is an explicit Luco null.
impl From<()> for Scalar {
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}
