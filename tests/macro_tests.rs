use luco::{luco, parse, Node, Scalar};

#[test]
fn scalar_forms() {
    assert_eq!(luco!(null), Node::Value(Scalar::Null));
    assert_eq!(luco!(true), Node::Value(Scalar::Boolean(true)));
    assert_eq!(luco!(false), Node::Value(Scalar::Boolean(false)));
    assert_eq!(luco!(7), Node::Value(Scalar::Integer(7)));
    assert_eq!(luco!(7.5), Node::Value(Scalar::Double(7.5)));
    assert_eq!(luco!("cat"), Node::from("cat"));
}

#[test]
fn expressions_as_values() {
    let port = 8080;
    let name = String::from("alpha");
    let node = luco!({
        "port": port,
        "name": name,
    });
    assert_eq!(node.at("port").as_integer(), 8080);
    assert_eq!(node.at("name").as_str(), "alpha");
}

#[test]
fn literal_matches_parsed_document() {
    let parsed = parse("name = \"cat\"\nage = 5\nsmol = true\n").unwrap();
    let built = luco!({
        "name": "cat",
        "age": 5,
        "smol": true,
    });
    assert_eq!(parsed, built);
}

#[test]
fn deep_nesting() {
    let node = luco!({
        "a": {"b": {"c": [1, [2, {"d": null}]]}},
    });
    let d = node.at("a").at("b").at("c").at_index(1).at_index(1);
    assert!(d.at("d").is_null());
}

#[test]
fn trailing_commas_are_accepted() {
    let node = luco!({
        "a": 1,
        "b": [1, 2,],
    });
    assert_eq!(node.at("b").as_array().len(), 2);
}
