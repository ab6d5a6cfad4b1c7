use indoc::indoc;

use saphyr_tree::{Node, NodeKind, ScalarStyle, get, parse};

const TESTDOC: &str = indoc! {"
    # foo is a bar
    foo: bar
    lhenumber: 78
    others:
      to: be
      not: to
      be: 666
    someMap:
      - someKey: value # line comment
      - someOtherKey: value2
    sequence:
      - a
      - b
      - c
    # bin is a baz
    bin: baz
"};

#[test]
fn finds_direct_scalar_field() {
    let root = parse(TESTDOC).expect("testdoc must parse");
    let foo = get(&root, "foo").expect("foo is a property of testdoc");
    assert_eq!(foo.as_str(), Some("bar"));
    assert_eq!(get(&root, "bin").and_then(Node::as_str), Some("baz"));
}

#[test]
fn reports_absent_field() {
    let root = parse(TESTDOC).unwrap();
    assert!(get(&root, "unknown").is_none());
    // `to` and `someKey` exist, but not as direct children of the root.
    assert!(get(&root, "to").is_none());
    assert!(get(&root, "someKey").is_none());
}

#[test]
fn returns_container_nodes_as_they_are() {
    let root = parse(TESTDOC).unwrap();
    assert_eq!(get(&root, "someMap").map(Node::kind), Some(NodeKind::Sequence));
    assert_eq!(get(&root, "others").map(Node::kind), Some(NodeKind::Mapping));
    assert_eq!(get(&root, "sequence").and_then(Node::as_sequence).map(|s| s.len()), Some(3));
}

#[test]
fn nested_lookup_chains() {
    let root = parse(TESTDOC).unwrap();
    let others = get(&root, "others").unwrap();
    assert_eq!(get(others, "be").and_then(Node::as_str), Some("666"));
    assert_eq!(root.get("others").and_then(|o| o.get("to")).and_then(Node::as_str), Some("be"));
}

#[test]
fn document_wrapper_is_transparent() {
    let root = parse(TESTDOC).unwrap();
    let Node::Document(doc) = &root else {
        panic!("parse must return a document node");
    };
    let content = doc.root().expect("testdoc is not empty");
    for key in ["foo", "others", "someMap", "sequence", "unknown"] {
        assert_eq!(get(&root, key), get(content, key), "{key}");
    }
}

#[test]
fn empty_mapping_and_empty_document_have_no_fields() {
    let empty_map = parse("{}").unwrap();
    assert!(get(&empty_map, "foo").is_none());

    let empty_doc = parse("").unwrap();
    assert!(get(&empty_doc, "foo").is_none());
    assert!(get(&Node::empty_document(), "foo").is_none());
}

#[test]
fn non_mapping_nodes_have_no_fields() {
    let seq = parse("[foo, bar]").unwrap();
    assert!(get(&seq, "foo").is_none());

    let scalar = Node::scalar("foo");
    assert!(get(&scalar, "foo").is_none());
}

#[test]
fn duplicate_keys_first_occurrence_wins() {
    let node = Node::mapping([
        (Node::scalar("k"), Node::scalar("first")),
        (Node::scalar("k"), Node::scalar("second")),
    ]);
    assert_eq!(get(&node, "k").and_then(Node::as_str), Some("first"));

    let parsed = parse("k: first\nk: second\n").unwrap();
    assert_eq!(get(&parsed, "k").and_then(Node::as_str), Some("first"));
}

#[test]
fn only_scalar_keys_are_matched() {
    let node = Node::mapping([
        (Node::sequence([Node::scalar("k")]), Node::scalar("from sequence key")),
        (Node::mapping([(Node::scalar("k"), Node::scalar("x"))]), Node::scalar("from mapping key")),
    ]);
    assert!(get(&node, "k").is_none());
}

#[test]
fn key_quoting_does_not_matter() {
    let root = parse("'quoted': 1\n\"double\": 2\n").unwrap();
    assert_eq!(get(&root, "quoted").and_then(Node::as_str), Some("1"));
    assert_eq!(get(&root, "double").and_then(Node::as_str), Some("2"));

    let Node::Document(doc) = &root else {
        panic!("parse must return a document node");
    };
    let mapping = doc.root().and_then(Node::as_mapping).unwrap();
    let (first_key, _) = &mapping.entries()[0];
    assert_eq!(first_key.as_scalar().map(|s| s.style()), Some(ScalarStyle::SingleQuoted));
}
