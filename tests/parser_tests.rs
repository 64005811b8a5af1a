use luco::{parse, Error, Node, ScalarKind};

#[test]
fn parses_simple_document() {
    let doc = parse("\nname = \"cat\"\n\"age\"= 5\nsmol=true\n").unwrap();

    assert!(doc.is_object());
    assert!(doc.at("name").is_value());
    assert!(doc.at("name").is_string());
    assert_eq!(doc.at("name").as_str(), "cat");

    assert!(doc.at("age").is_integer());
    assert_eq!(doc.at("age").as_integer(), 5);

    assert!(doc.at("smol").is_boolean());
    assert!(doc.at("smol").as_boolean());

    let smol = doc.at("smol").as_value();
    assert!(smol.try_as_boolean().is_ok());
    assert!(smol.try_as_number().is_err());
    assert!(smol.try_as_integer().is_err());
    assert!(smol.try_as_double().is_err());
    assert!(smol.try_as_string().is_err());
    assert!(smol.try_as_null().is_err());
}

#[test]
fn object_iteration_sees_every_entry() {
    let doc = parse("name= cat\nage= 5 \nsmol = true\n").unwrap();

    let expected = [
        ("name", "cat", ScalarKind::String),
        ("age", "5", ScalarKind::Integer),
        ("smol", "true", ScalarKind::Boolean),
    ];
    assert_eq!(doc.as_object().len(), expected.len());
    for (key, node) in doc.as_object().iter() {
        let (_, text, kind) = expected
            .iter()
            .find(|(k, _, _)| k == key)
            .expect("unexpected key");
        assert_eq!(&node.as_value().stringify(), text);
        assert_eq!(node.scalar_kind(), *kind);
    }
}

#[test]
fn array_elements_keep_their_kinds() {
    let input = "array {\n\t\"meow\"\n\t\"hi\"\n\t5\n\t5.0\n\ttrue\n\tnull\n}\n";
    let doc = parse(input).unwrap();

    assert!(doc.contains("array"));
    let arr = doc.at("array");
    assert!(arr.is_array());
    assert_eq!(arr.as_array().len(), 6);

    let kinds: Vec<ScalarKind> = arr.as_array().iter().map(Node::scalar_kind).collect();
    assert_eq!(
        kinds,
        vec![
            ScalarKind::String,
            ScalarKind::String,
            ScalarKind::Integer,
            ScalarKind::Double,
            ScalarKind::Boolean,
            ScalarKind::Null,
        ]
    );
    assert_eq!(arr.at_index(0).as_str(), "meow");
    assert_eq!(arr.at_index(3).as_double(), 5.0);
}

#[test]
fn nested_objects() {
    let input = "outer {\n    middle {\n        inner = 42\n    }\n    flag = on\n}\n";
    let doc = parse(input).unwrap();

    assert_eq!(doc.at("outer").at("middle").at("inner").as_integer(), 42);
    assert!(doc.at("outer").at("flag").as_boolean());
}

#[test]
fn object_opened_with_equal_brace() {
    // `key = {` opens the same containers as `key {`
    let input = "key = {\n    sub = 1\n}\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.at("key").at("sub").as_integer(), 1);
}

#[test]
fn array_of_objects() {
    let input = "servers {\n    {\n        host = alpha\n    }\n    {\n        host = beta\n    }\n}\n";
    let doc = parse(input).unwrap();

    let servers = doc.at("servers");
    assert!(servers.is_array());
    assert_eq!(servers.as_array().len(), 2);
    assert_eq!(servers.at_index(0).at("host").as_str(), "alpha");
    assert_eq!(servers.at_index(1).at("host").as_str(), "beta");
}

#[test]
fn nested_array_inside_array() {
    let input = "grid {\n    {\n        1\n        2\n    }\n    {\n        3\n    }\n}\n";
    let doc = parse(input).unwrap();

    let grid = doc.at("grid");
    assert!(grid.is_array());
    assert!(grid.at_index(0).is_array());
    assert_eq!(grid.at_index(0).at_index(1).as_integer(), 2);
    assert_eq!(grid.at_index(1).at_index(0).as_integer(), 3);
}

#[test]
fn empty_brace_pair_is_an_empty_object() {
    let doc = parse("key {}\n").unwrap();
    assert!(doc.at("key").is_object());
    assert!(doc.at("key").as_object().is_empty());

    let doc = parse("key {\n}\n").unwrap();
    assert!(doc.at("key").is_object());
}

#[test]
fn doubled_quote_escapes_inside_strings() {
    let doc = parse("\"key\" = \"val\"\"ue\"\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "val\"ue");
}

#[test]
fn doubled_structural_characters_in_unquoted_values() {
    let doc = parse("key = a{{b\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "a{b");

    let doc = parse("key = a==b\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "a=b");
}

#[test]
fn quoting_bypasses_type_inference() {
    let doc = parse("a = \"5\"\nb = \"true\"\nc = \"null\"\nd = 5\n").unwrap();
    assert!(doc.at("a").is_string());
    assert!(doc.at("b").is_string());
    assert!(doc.at("c").is_string());
    assert!(doc.at("d").is_integer());
}

#[test]
fn on_and_off_are_booleans() {
    let doc = parse("a = on\nb = off\n").unwrap();
    assert!(doc.at("a").as_boolean());
    assert!(!doc.at("b").as_boolean());
}

#[test]
fn unquoted_values_keep_interior_spaces_and_lose_trailing_ones() {
    let doc = parse("key = a few words  \n").unwrap();
    assert_eq!(doc.at("key").as_str(), "a few words");
}

#[test]
fn single_quoted_strings() {
    let doc = parse("key = 'meow'\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "meow");
}

#[test]
fn structural_characters_are_literal_inside_quotes() {
    let doc = parse("key = \"a{b=c}d\"\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "a{b=c}d");
}

#[test]
fn hash_inside_quotes_is_not_a_comment() {
    let doc = parse("key = \"a#b\"\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "a#b");
}

#[test]
fn line_comments_are_skipped() {
    let input = "# leading comment\nname = cat # trailing comment\n# another\nage = 5\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.at("name").as_str(), "cat");
    assert_eq!(doc.at("age").as_integer(), 5);
    assert_eq!(doc.as_object().len(), 2);
}

#[test]
fn nested_block_comments() {
    let input = "#{ outer { inner } still outer }\nname = cat\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.as_object().len(), 1);
    assert_eq!(doc.at("name").as_str(), "cat");
}

#[test]
fn block_comment_nesting_to_empty_document() {
    let input = "#{ ... #{ ... }# ... }#\n";
    let doc = parse(input).unwrap();
    assert!(doc.as_object().is_empty());
}

#[test]
fn unclosed_block_comment_is_an_error() {
    let err = parse("#{ never closed\nname = cat\n").unwrap_err();
    assert!(matches!(err, Error::Parsing { .. }));
    assert!(err.to_string().contains("nested comment"));
}

#[test]
fn hash_followed_by_spaced_brace_stays_a_line_comment() {
    // the block form requires `{` immediately after `#`
    let doc = parse("# { not a block\nname = cat\n").unwrap();
    assert_eq!(doc.at("name").as_str(), "cat");
}

#[test]
fn backslash_continues_an_unquoted_value() {
    let doc = parse("key = abc\\\n    def\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "abcdef");
}

#[test]
fn backslash_continues_a_quoted_value() {
    let doc = parse("key = \"abc\" \\\n    \"def\"\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "abcdef");
}

#[test]
fn continuation_expects_the_matching_quote() {
    let err = parse("key = \"abc\" \\\n    def\"\n").unwrap_err();
    assert!(err.to_string().contains('"'));
}

#[test]
fn mid_line_backslash_is_literal() {
    let doc = parse("key = \"a\\b\"\n").unwrap();
    assert_eq!(doc.at("key").as_str(), "a\\b");
}

#[test]
fn invalid_documents_are_rejected() {
    for input in [
        "{invalid}",
        "{{}",
        "{\"name\":}",
        "{\"age\":3 5}",
        "{\"smol\":tru e}",
        "{\"\"key\":nu ll}",
    ] {
        let result = parse(input);
        assert!(result.is_err(), "expected error for {input:?}");
        assert!(matches!(result.unwrap_err(), Error::Parsing { .. }));
    }
}

#[test]
fn garbage_after_a_quoted_value_is_rejected() {
    let err = parse("key = \"v\" trailing\n").unwrap_err();
    assert!(err.to_string().contains("new line"));
}

#[test]
fn garbage_after_a_quoted_key_is_rejected() {
    let err = parse("\"key\" garbage = 1\n").unwrap_err();
    assert!(err.to_string().contains("expected '=' or '{'"));
}

#[test]
fn stray_closing_brace_is_rejected() {
    let err = parse("name = cat\n}\n").unwrap_err();
    assert!(matches!(err, Error::Parsing { .. }));
}

#[test]
fn unbalanced_open_brace_is_rejected() {
    assert!(parse("key {\n a = 1\n").is_err());
    assert!(parse("key = {\n").is_err());
}

#[test]
fn error_location_points_at_the_offending_line() {
    let err = parse("name = cat\nbad = \"x\" !\n").unwrap_err();
    let Error::Parsing { line, snippet, .. } = &err else {
        panic!("expected a parsing error, got {err:?}");
    };
    assert_eq!(*line, 2);
    assert!(snippet.contains("bad = \"x\" !"));
    assert!(snippet.contains('^'));
}

#[test]
fn keys_with_escaped_structural_characters() {
    let doc = parse("a{{b = 1\n").unwrap();
    assert!(doc.contains("a{b"));
}

#[test]
fn quoted_keys_may_contain_structural_characters() {
    let doc = parse("\"a=b\" = 1\n\"c d\" = 2\n").unwrap();
    assert_eq!(doc.at("a=b").as_integer(), 1);
    assert_eq!(doc.at("c d").as_integer(), 2);
}

#[test]
fn duplicate_keys_overwrite() {
    let doc = parse("k = 1\nk = 2\n").unwrap();
    assert_eq!(doc.as_object().len(), 1);
    assert_eq!(doc.at("k").as_integer(), 2);
}

#[test]
fn value_terminated_by_brace_commits_then_opens_container() {
    // inside an array, `lexeme {` commits the lexeme and starts a container
    let input = "arr {\n    x\n    first {\n        k = 1\n    }\n}\n";
    let doc = parse(input).unwrap();
    let arr = doc.at("arr");
    assert_eq!(arr.as_array().len(), 3);
    assert_eq!(arr.at_index(0).as_str(), "x");
    assert_eq!(arr.at_index(1).as_str(), "first");
    assert_eq!(arr.at_index(2).at("k").as_integer(), 1);
}

#[test]
fn brace_after_lexeme_inside_transient_opens_an_object() {
    // before the bracket kind is decided, `first {` classifies the outer
    // bracket as an object with `first` as its first key
    let input = "outer {\n    first {\n        k = 1\n    }\n}\n";
    let doc = parse(input).unwrap();
    assert!(doc.at("outer").is_object());
    assert_eq!(doc.at("outer").at("first").at("k").as_integer(), 1);
}

#[test]
fn deeply_nested_structures() {
    let input = "a {\n b {\n  c {\n   d = 1\n  }\n }\n}\n";
    let doc = parse(input).unwrap();
    assert_eq!(doc.at("a").at("b").at("c").at("d").as_integer(), 1);
}

#[test]
fn parse_file_reads_from_disk() {
    let path = std::env::temp_dir().join("luco_parse_file_test.luco");
    std::fs::write(&path, "name = cat\n").unwrap();
    let doc = luco::parse_file(&path).unwrap();
    assert_eq!(doc.at("name").as_str(), "cat");
    std::fs::remove_file(&path).ok();
}

#[test]
fn parse_file_missing_path_is_a_filesystem_error() {
    let err = luco::parse_file("/definitely/not/here.luco").unwrap_err();
    assert!(matches!(err, Error::Filesystem(_)));
}
