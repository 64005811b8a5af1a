//! The Luco document tree.
//!
//! This module provides [`Node`], the three-way tagged union at the heart of
//! the document model: every node is exactly one of an object (ordered
//! key→node mapping), an array (node sequence), or a scalar value.
//!
//! ## Usage Patterns
//!
//! ### Building trees
//!
//! ```rust
//! use luco::{luco, Node};
//!
//! let mut doc = Node::default();               // empty object
//! doc.insert("name", "cat").unwrap();
//! doc.insert("sizes", vec![1, 2, 3]).unwrap();
//!
//! let same = luco!({
//!     "name": "cat",
//!     "sizes": [1, 2, 3],
//! });
//! assert_eq!(doc, same);
//! ```
//!
//! ### Navigating and mutating
//!
//! ```rust
//! use luco::Node;
//!
//! let mut doc = Node::default();
//! doc.insert("k", vec![1, 2, 3]).unwrap();
//! assert_eq!(doc.at("k").at_index(1).as_integer(), 2);
//!
//! // Reshape the child in place; siblings are untouched.
//! doc.at_mut("k").set(false);
//! assert!(doc.at("k").is_boolean());
//! ```
//!
//! ### Composition
//!
//! ```rust
//! use luco::luco;
//!
//! let merged = luco!({"a": 1}) + luco!({"b": 2});
//! assert!(merged.contains("a") && merged.contains("b"));
//! ```

use crate::array::Array;
use crate::error::{Error, Result};
use crate::map::Map;
use crate::scalar::{Scalar, ScalarKind};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};

/// The kind of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    Value,
}

impl NodeKind {
    /// Returns the kind name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::Value => "value",
        }
    }
}

/// A Luco document node: object, array, or scalar value.
///
/// Containers own their children; dropping a node drops its whole subtree,
/// and `Clone` is a deep copy, so two independently-obtained nodes never
/// alias. The default node is an empty object.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Object(Map),
    Array(Array),
    Value(Scalar),
}

impl Default for Node {
    fn default() -> Self {
        Node::Object(Map::new())
    }
}

impl Node {
    /// Creates an empty node of the given kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::{Node, NodeKind};
    ///
    /// let arr = Node::empty(NodeKind::Array);
    /// assert!(arr.is_array());
    /// ```
    #[must_use]
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Object => Node::Object(Map::new()),
            NodeKind::Array => Node::Array(Array::new()),
            NodeKind::Value => Node::Value(Scalar::Empty),
        }
    }

    /// Returns the kind tag of this node.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::Value(_) => NodeKind::Value,
        }
    }

    /// Returns the kind name, one of `"object"`, `"array"`, `"value"`.
    #[inline]
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the scalar kind when this node is a value, and
    /// [`ScalarKind::Empty`] otherwise.
    #[inline]
    #[must_use]
    pub const fn scalar_kind(&self) -> ScalarKind {
        match self {
            Node::Value(v) => v.kind(),
            _ => ScalarKind::Empty,
        }
    }

    /// Returns `true` if the node is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// Returns `true` if the node is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Returns `true` if the node is a scalar value.
    #[inline]
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }

    /// Returns `true` if the node is a string scalar.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_string())
    }

    /// Returns `true` if the node is an integer scalar.
    #[inline]
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_integer())
    }

    /// Returns `true` if the node is a double scalar.
    #[inline]
    #[must_use]
    pub fn is_double(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_double())
    }

    /// Returns `true` if the node is a numeric scalar (integer or double).
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_number())
    }

    /// Returns `true` if the node is a boolean scalar.
    #[inline]
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_boolean())
    }

    /// Returns `true` if the node is an explicit null scalar.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_null())
    }

    /// Returns `true` if the node is an object containing `key`.
    ///
    /// Non-objects contain nothing.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Node::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Borrows the child node at `key`.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] when the node is not an object;
    /// [`Error::KeyNotFound`] when the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::{luco, Error};
    ///
    /// let doc = luco!({"a": 1});
    /// assert_eq!(doc.try_at("a").unwrap().as_integer(), 1);
    /// assert!(matches!(doc.try_at("b"), Err(Error::KeyNotFound(_))));
    /// ```
    pub fn try_at(&self, key: &str) -> Result<&Node> {
        self.try_as_object()?
            .get(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Mutably borrows the child node at `key`.
    ///
    /// # Errors
    ///
    /// Same as [`Node::try_at`].
    pub fn try_at_mut(&mut self, key: &str) -> Result<&mut Node> {
        self.try_as_object_mut()?
            .get_mut(key)
            .ok_or_else(|| Error::key_not_found(key))
    }

    /// Borrows the element node at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] when the node is not an array;
    /// [`Error::KeyNotFound`] when the index is out of range.
    pub fn try_at_index(&self, index: usize) -> Result<&Node> {
        self.try_as_array()?
            .get(index)
            .ok_or_else(|| Error::index_not_found(index))
    }

    /// Mutably borrows the element node at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Node::try_at_index`].
    pub fn try_at_index_mut(&mut self, index: usize) -> Result<&mut Node> {
        self.try_as_array_mut()?
            .get_mut(index)
            .ok_or_else(|| Error::index_not_found(index))
    }

    /// Borrows the child at `key`, panicking when absent or when the node is
    /// not an object. See [`Node::try_at`] for the checked form.
    #[must_use]
    pub fn at(&self, key: &str) -> &Node {
        match self.try_at(key) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }

    /// Mutable, panicking twin of [`Node::try_at_mut`].
    #[must_use]
    pub fn at_mut(&mut self, key: &str) -> &mut Node {
        match self.try_at_mut(key) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }

    /// Borrows the element at `index`, panicking when out of range or when
    /// the node is not an array. See [`Node::try_at_index`].
    #[must_use]
    pub fn at_index(&self, index: usize) -> &Node {
        match self.try_at_index(index) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }

    /// Mutable, panicking twin of [`Node::try_at_index_mut`].
    #[must_use]
    pub fn at_index_mut(&mut self, index: usize) -> &mut Node {
        match self.try_at_index_mut(index) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }

    /// Borrows the object map.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the node is not an object.
    pub fn try_as_object(&self) -> Result<&Map> {
        match self {
            Node::Object(map) => Ok(map),
            other => Err(other.cast_error("object")),
        }
    }

    /// Mutably borrows the object map.
    pub fn try_as_object_mut(&mut self) -> Result<&mut Map> {
        match self {
            Node::Object(map) => Ok(map),
            other => Err(other.cast_error("object")),
        }
    }

    /// Borrows the array.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the node is not an array.
    pub fn try_as_array(&self) -> Result<&Array> {
        match self {
            Node::Array(arr) => Ok(arr),
            other => Err(other.cast_error("array")),
        }
    }

    /// Mutably borrows the array.
    pub fn try_as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Node::Array(arr) => Ok(arr),
            other => Err(other.cast_error("array")),
        }
    }

    /// Borrows the scalar value.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the node is not a value.
    pub fn try_as_value(&self) -> Result<&Scalar> {
        match self {
            Node::Value(v) => Ok(v),
            other => Err(other.cast_error("value")),
        }
    }

    /// Mutably borrows the scalar value.
    pub fn try_as_value_mut(&mut self) -> Result<&mut Scalar> {
        match self {
            Node::Value(v) => Ok(v),
            other => Err(other.cast_error("value")),
        }
    }

    /// Panicking twin of [`Node::try_as_object`].
    #[must_use]
    pub fn as_object(&self) -> &Map {
        match self.try_as_object() {
            Ok(map) => map,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panicking twin of [`Node::try_as_array`].
    #[must_use]
    pub fn as_array(&self) -> &Array {
        match self.try_as_array() {
            Ok(arr) => arr,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panicking twin of [`Node::try_as_value`].
    #[must_use]
    pub fn as_value(&self) -> &Scalar {
        match self.try_as_value() {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Borrows the string payload of a string scalar node.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the node is not a value or the scalar is not
    /// a string.
    pub fn try_as_str(&self) -> Result<&str> {
        self.try_as_value()?.try_as_str()
    }

    /// Clones the string payload of a string scalar node.
    pub fn try_as_string(&self) -> Result<String> {
        self.try_as_value()?.try_as_string()
    }

    /// Returns the integer payload of an integer scalar node.
    pub fn try_as_integer(&self) -> Result<i64> {
        self.try_as_value()?.try_as_integer()
    }

    /// Returns the double payload of a double scalar node.
    pub fn try_as_double(&self) -> Result<f64> {
        self.try_as_value()?.try_as_double()
    }

    /// Returns the numeric payload, promoting integers to `f64`.
    pub fn try_as_number(&self) -> Result<f64> {
        self.try_as_value()?.try_as_number()
    }

    /// Returns the boolean payload of a boolean scalar node.
    pub fn try_as_boolean(&self) -> Result<bool> {
        self.try_as_value()?.try_as_boolean()
    }

    /// Succeeds iff the node is an explicit null scalar.
    pub fn try_as_null(&self) -> Result<()> {
        self.try_as_value()?.try_as_null()
    }

    /// Panicking twin of [`Node::try_as_str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self.try_as_str() {
            Ok(s) => s,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panicking twin of [`Node::try_as_integer`].
    #[must_use]
    pub fn as_integer(&self) -> i64 {
        match self.try_as_integer() {
            Ok(i) => i,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panicking twin of [`Node::try_as_double`].
    #[must_use]
    pub fn as_double(&self) -> f64 {
        match self.try_as_double() {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panicking twin of [`Node::try_as_number`].
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self.try_as_number() {
            Ok(n) => n,
            Err(e) => panic!("{e}"),
        }
    }

    /// Panicking twin of [`Node::try_as_boolean`].
    #[must_use]
    pub fn as_boolean(&self) -> bool {
        match self.try_as_boolean() {
            Ok(b) => b,
            Err(e) => panic!("{e}"),
        }
    }

    /// Reshapes this node to match `value`: a scalar-convertible makes it a
    /// value, a sequence an array, a key-value container an object, and a
    /// node replaces it wholesale.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::Node;
    ///
    /// let mut node = Node::default();
    /// node.set(vec![1, 2, 3]);
    /// assert!(node.is_array());
    /// node.set("text");
    /// assert!(node.is_string());
    /// ```
    pub fn set(&mut self, value: impl Into<Node>) {
        *self = value.into();
    }

    /// Inserts `value` under `key`, overwriting any existing entry, and
    /// returns the inserted child.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the node is not an object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::Node;
    ///
    /// let mut doc = Node::default();
    /// doc.insert("k", vec![1, 2, 3]).unwrap();
    /// assert_eq!(doc.at("k").at_index(1).as_integer(), 2);
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Result<&mut Node> {
        let key = key.into();
        let map = self.try_as_object_mut()?;
        map.insert(key.clone(), value.into());
        Ok(map.get_mut(&key).expect("just inserted"))
    }

    /// Appends `value` to the array and returns the appended child.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] if the node is not an array.
    pub fn push_back(&mut self, value: impl Into<Node>) -> Result<&mut Node> {
        let arr = self.try_as_array_mut()?;
        arr.push(value.into());
        Ok(arr.last_mut().expect("just pushed"))
    }

    /// Appends the entries of an object to this object (right side wins on
    /// duplicate keys), or the elements of an array to this array.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] on any other pairing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::luco;
    ///
    /// let mut doc = luco!({"a": 1});
    /// doc.try_extend(luco!({"b": 2})).unwrap();
    /// assert!(doc.contains("b"));
    /// assert!(doc.try_extend(luco!([1])).is_err());
    /// ```
    pub fn try_extend(&mut self, other: Node) -> Result<()> {
        match (self, other) {
            (Node::Object(map), Node::Object(other)) => {
                map.extend(other);
                Ok(())
            }
            (Node::Array(arr), Node::Array(other)) => {
                arr.extend(other);
                Ok(())
            }
            (this, other) => Err(Error::wrong_type(format!(
                "trying to append a '{}' to a '{}'",
                other.kind_name(),
                this.kind_name()
            ))),
        }
    }

    /// Composes two nodes of the same kind into a new node: objects merge
    /// (right side overrides), arrays concatenate, string scalars
    /// concatenate, and numeric scalars add. Integer + integer stays an
    /// integer; any double makes the sum a double.
    ///
    /// # Errors
    ///
    /// [`Error::WrongType`] when the kinds differ or the scalars are neither
    /// both strings nor both numbers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use luco::luco;
    ///
    /// let merged = luco!({"a": 1}).try_add(&luco!({"b": 2})).unwrap();
    /// assert_eq!(merged.as_object().len(), 2);
    ///
    /// let joined = luco!("foo").try_add(&luco!("bar")).unwrap();
    /// assert_eq!(joined.as_str(), "foobar");
    /// ```
    pub fn try_add(&self, other: &Node) -> Result<Node> {
        match (self, other) {
            (Node::Object(a), Node::Object(b)) => {
                let mut map = a.clone();
                map.extend(b.clone());
                Ok(Node::Object(map))
            }
            (Node::Array(a), Node::Array(b)) => {
                let mut arr = a.clone();
                arr.extend(b.clone());
                Ok(Node::Array(arr))
            }
            (Node::Value(a), Node::Value(b)) => match (a, b) {
                (Scalar::String(x), Scalar::String(y)) => {
                    Ok(Node::Value(Scalar::String(format!("{x}{y}"))))
                }
                (Scalar::Integer(x), Scalar::Integer(y)) => Ok(Node::Value(Scalar::Integer(x + y))),
                (x, y) if x.is_number() && y.is_number() => Ok(Node::Value(Scalar::Double(
                    x.try_as_number()? + y.try_as_number()?,
                ))),
                (x, y) => Err(Error::wrong_type(format!(
                    "trying to add a '{}' value and a '{}' value",
                    x.kind_name(),
                    y.kind_name()
                ))),
            },
            (a, b) => Err(Error::wrong_type(format!(
                "trying to add a '{}' node and a '{}' node",
                a.kind_name(),
                b.kind_name()
            ))),
        }
    }

    fn cast_error(&self, wanted: &str) -> Error {
        Error::wrong_type(format!(
            "trying to cast a '{}' node to '{}'",
            self.kind_name(),
            wanted
        ))
    }
}

/// Merge/concatenate composition; panicking twin of [`Node::try_add`].
impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Node) -> Node {
        match self.try_add(&rhs) {
            Ok(node) => node,
            Err(e) => panic!("{e}"),
        }
    }
}

/// In-place append; panicking twin of [`Node::try_extend`].
impl AddAssign for Node {
    fn add_assign(&mut self, rhs: Node) {
        if let Err(e) = self.try_extend(rhs) {
            panic!("{e}");
        }
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.at(key)
    }
}

impl IndexMut<&str> for Node {
    fn index_mut(&mut self, key: &str) -> &mut Node {
        self.at_mut(key)
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.at_index(index)
    }
}

impl IndexMut<usize> for Node {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        self.at_index_mut(index)
    }
}

impl fmt::Display for Node {
    /// Renders the node as Luco text with the default indentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_luco())
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Value(value)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Object(map)
    }
}

impl From<Array> for Node {
    fn from(arr: Array) -> Self {
        Node::Array(arr)
    }
}

macro_rules! node_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Value(Scalar::from(value))
                }
            }
        )*
    };
}

node_from_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, ());

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(values: Vec<T>) -> Self {
        Node::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Node>, const N: usize> From<[T; N]> for Node {
    fn from(values: [T; N]) -> Self {
        Node::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Node>> From<HashMap<String, V>> for Node {
    fn from(map: HashMap<String, V>) -> Self {
        Node::Object(Map::from(map))
    }
}

impl<V: Into<Node>> From<BTreeMap<String, V>> for Node {
    fn from(map: BTreeMap<String, V>) -> Self {
        Node::Object(Map::from(map))
    }
}

impl serde::Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Node::Value(Scalar::Null) | Node::Value(Scalar::Empty) => serializer.serialize_unit(),
            Node::Value(Scalar::Boolean(b)) => serializer.serialize_bool(*b),
            Node::Value(Scalar::Integer(i)) => serializer.serialize_i64(*i),
            Node::Value(Scalar::Double(d)) => serializer.serialize_f64(*d),
            Node::Value(Scalar::String(s)) => serializer.serialize_str(s),
            Node::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                use serde::ser::SerializeMap;
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    ser.serialize_entry(k, v)?;
                }
                ser.end()
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid Luco node")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Node, E> {
                Ok(Node::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Node, E> {
                Ok(Node::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Node, E> {
                if value <= i64::MAX as u64 {
                    Ok(Node::from(value as i64))
                } else {
                    Ok(Node::from(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Node, E> {
                Ok(Node::from(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Node, E> {
                Ok(Node::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Node, E> {
                Ok(Node::from(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Node, E> {
                Ok(Node::Value(Scalar::Null))
            }

            fn visit_none<E>(self) -> std::result::Result<Node, E> {
                Ok(Node::Value(Scalar::Null))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Node, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                serde::Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Node, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut arr = Array::new();
                while let Some(element) = seq.next_element()? {
                    arr.push(element);
                }
                Ok(Node::Array(arr))
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Node, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = Map::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value);
                }
                Ok(Node::Object(map))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}
