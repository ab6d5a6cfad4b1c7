use std::collections::HashMap;

use indoc::indoc;
use serde::Deserialize;

use saphyr_tree::{Node, NodeDeserializer, Scalar, ScalarStyle, from_node, get, options, parse};

const ENV: &str = indoc! {"
    - HOME: /root
    - SHELL: /bin/sh
"};

#[test]
fn plain_deserializer_does_not_merge() {
    let root = parse(ENV).unwrap();
    let result = HashMap::<String, String>::deserialize(NodeDeserializer::new(&root));
    assert!(result.is_err(), "{result:?}");

    let list = Vec::<HashMap<String, String>>::deserialize(NodeDeserializer::new(&root)).unwrap();
    assert_eq!(list.len(), 2);
}

#[test]
fn merge_sequences_can_be_switched_on() {
    let root = parse(ENV).unwrap();
    let env = HashMap::<String, String>::deserialize(NodeDeserializer::new(&root).merge_sequences(true)).unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env["SHELL"], "/bin/sh");

    let off = NodeDeserializer::new(&root).merge_sequences(true).merge_sequences(false);
    assert!(HashMap::<String, String>::deserialize(off).is_err());
}

#[test]
fn merging_stays_at_the_top_node() {
    let root = parse("env:\n  - a: 1\n  - b: 2\n").unwrap();
    let result = HashMap::<String, HashMap<String, u8>>::deserialize(NodeDeserializer::new(&root).merge_sequences(true));
    assert!(result.is_err(), "{result:?}");
}

#[test]
fn options_reach_the_scalars() {
    let root = parse("enabled: yes\nmode: 010\n").unwrap();
    let enabled = get(&root, "enabled").unwrap();
    let mode = get(&root, "mode").unwrap();

    assert!(bool::deserialize(NodeDeserializer::new(enabled)).unwrap());
    let strict = options! { strict_booleans: true };
    assert!(bool::deserialize(NodeDeserializer::with_options(enabled, &strict)).is_err());

    let legacy = options! { legacy_octal_numbers: true };
    assert_eq!(u32::deserialize(NodeDeserializer::new(mode)).unwrap(), 10);
    assert_eq!(u32::deserialize(NodeDeserializer::with_options(mode, &legacy)).unwrap(), 8);
}

#[test]
fn with_options_leaves_merge_mode_off() {
    let root = parse(ENV).unwrap();
    let strict = options! { strict_booleans: true };
    assert!(HashMap::<String, String>::deserialize(NodeDeserializer::with_options(&root, &strict)).is_err());
    let merged = NodeDeserializer::with_options(&root, &strict).merge_sequences(true);
    assert_eq!(HashMap::<String, String>::deserialize(merged).unwrap().len(), 2);
}

#[test]
fn tags_on_built_scalars_drive_decoding() {
    let number = Node::from(Scalar::new("42").with_tag("!!int"));
    assert!(from_node::<String>(&number).is_err());
    assert_eq!(from_node::<i32>(&number).unwrap(), 42);

    let canonical = Node::from(Scalar::new("42").with_tag("tag:yaml.org,2002:str"));
    assert_eq!(from_node::<String>(&canonical).unwrap(), "42");
    let value: serde_json::Value = from_node(&canonical).unwrap();
    assert_eq!(value, serde_json::json!("42"));

    let binary = Node::from(Scalar::new("aGVsbG8=").with_tag("!!binary"));
    assert_eq!(from_node::<String>(&binary).unwrap(), "hello");
    assert_eq!(from_node::<Vec<u8>>(&binary).unwrap(), b"hello");

    let scalar = Scalar::new("x").with_tag("!point").with_style(ScalarStyle::SingleQuoted);
    assert_eq!(scalar.tag(), Some("!point"));
    assert_eq!(scalar.style(), ScalarStyle::SingleQuoted);
}
