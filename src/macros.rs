/// Builds a [`Node`](crate::Node) from a literal, with arbitrary nesting and
/// heterogeneous elements.
///
/// Objects use `{"key": value}` entries, arrays use `[a, b, c]`, and any
/// expression convertible into a node works as a value. `null` stands for an
/// explicit Luco null.
///
/// # Examples
///
/// ```rust
/// use luco::luco;
///
/// let doc = luco!({
///     "name": "cat",
///     "age": 5,
///     "tags": ["smol", true, null],
///     "nested": {"inner": 1.5},
/// });
///
/// assert_eq!(doc.at("age").as_integer(), 5);
/// assert!(doc.at("tags").at_index(2).is_null());
/// assert_eq!(doc.at("nested").at("inner").as_double(), 1.5);
/// ```
#[macro_export]
macro_rules! luco {
    // explicit null
    (null) => {
        $crate::Node::Value($crate::Scalar::Null)
    };

    (true) => {
        $crate::Node::Value($crate::Scalar::Boolean(true))
    };

    (false) => {
        $crate::Node::Value($crate::Scalar::Boolean(false))
    };

    // empty array
    ([]) => {
        $crate::Node::Array($crate::Array::new())
    };

    // array with elements
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::Array(
            ::std::vec![$($crate::luco!($elem)),*].into_iter().collect::<$crate::Array>()
        )
    };

    // empty object
    ({}) => {
        $crate::Node::Object($crate::Map::new())
    };

    // object with entries
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key.to_string(), $crate::luco!($value));
        )*
        $crate::Node::Object(map)
    }};

    // any scalar-convertible expression
    ($other:expr) => {
        $crate::Node::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Node, Scalar};

    #[test]
    fn primitives() {
        assert_eq!(luco!(null), Node::Value(Scalar::Null));
        assert_eq!(luco!(true), Node::Value(Scalar::Boolean(true)));
        assert_eq!(luco!(false), Node::Value(Scalar::Boolean(false)));
        assert_eq!(luco!(42), Node::Value(Scalar::Integer(42)));
        assert_eq!(luco!(3.5), Node::Value(Scalar::Double(3.5)));
        assert_eq!(luco!("hi"), Node::Value(Scalar::String("hi".to_string())));
    }

    #[test]
    fn heterogeneous_array() {
        let node = luco!([1.3223, 2, "string", true, null]);
        assert!(node.is_array());
        let arr = node.as_array();
        assert_eq!(arr.len(), 5);
        assert!(arr.get(0).unwrap().is_double());
        assert!(arr.get(1).unwrap().is_integer());
        assert!(arr.get(2).unwrap().is_string());
        assert!(arr.get(3).unwrap().is_boolean());
        assert!(arr.get(4).unwrap().is_null());
    }

    #[test]
    fn nested_structures() {
        let node = luco!({
            "obj": {"k": [1, 2]},
            "arr": [{"deep": null}],
        });
        assert_eq!(node.at("obj").at("k").at_index(1).as_integer(), 2);
        assert!(node.at("arr").at_index(0).at("deep").is_null());
    }

    #[test]
    fn empty_containers() {
        assert!(luco!({}).as_object().is_empty());
        assert!(luco!([]).as_array().is_empty());
    }
}
