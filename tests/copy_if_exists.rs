use std::collections::HashMap;

use indoc::indoc;
use serde::Deserialize;

use saphyr_tree::{Destination, Node, copy_if_exists, from_node, get, parse, try_copy_if_exists};

const TESTDOC: &str = indoc! {"
    foo: bar
    lhenumber: 78
    others:
      to: be
      not: to
      be: 666
    someMap:
      - someKey: value
      - someOtherKey: value2
    sequence:
      - a
      - b
      - c
"};

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Others {
    to: String,
    not: String,
    be: i32,
}

impl Destination<'_> for Others {}

#[test]
fn absent_field_leaves_destination_alone() {
    let root = parse(TESTDOC).unwrap();
    let mut unknown = String::from("unknown");
    copy_if_exists(&root, "unknown", &mut unknown);
    assert_eq!(unknown, "unknown");

    let mut n = 42u16;
    copy_if_exists(&root, "bin", &mut n);
    assert_eq!(n, 42);
}

#[test]
fn present_field_matches_direct_decoding() -> anyhow::Result<()> {
    let root = parse(TESTDOC)?;

    let mut foo = String::new();
    copy_if_exists(&root, "foo", &mut foo);
    assert_eq!(foo, from_node::<String>(get(&root, "foo").unwrap())?);

    let mut number = 0u32;
    copy_if_exists(&root, "lhenumber", &mut number);
    assert_eq!(number, 78);

    let mut others = Others::default();
    copy_if_exists(&root, "others", &mut others);
    assert_eq!(others, from_node::<Others>(get(&root, "others").unwrap())?);

    let mut some_map: HashMap<String, String> = HashMap::new();
    copy_if_exists(&root, "someMap", &mut some_map);
    assert_eq!(some_map.len(), 2);
    assert_eq!(some_map["someOtherKey"], "value2");

    let mut sequence: Vec<String> = Vec::new();
    copy_if_exists(&root, "sequence", &mut sequence);
    assert_eq!(sequence, ["a", "b", "c"]);
    Ok(())
}

#[test]
fn decode_failure_is_swallowed() {
    let root = parse(TESTDOC).unwrap();
    let mut n = 7i32;
    copy_if_exists(&root, "foo", &mut n);
    assert_eq!(n, 7);

    let mut text = String::from("keep");
    copy_if_exists(&root, "others", &mut text);
    assert_eq!(text, "keep");

    // Merging stops at `oops`; what came before it stays.
    let mut flat: HashMap<String, String> = HashMap::from([("x".to_string(), "y".to_string())]);
    let bad = parse("settings:\n  - a: 1\n  - oops\n  - b: 2\n").unwrap();
    copy_if_exists(&bad, "settings", &mut flat);
    assert_eq!(
        flat,
        HashMap::from([("x".to_string(), "y".to_string()), ("a".to_string(), "1".to_string())])
    );
}

#[test]
fn merged_sequence_keeps_defaults() {
    let root = parse(indoc! {"
        env:
          - HOME: /home/app
          - SHELL: /bin/zsh
    "})
    .unwrap();
    let mut env = HashMap::from([
        ("SHELL".to_string(), "/bin/sh".to_string()),
        ("LANG".to_string(), "C".to_string()),
    ]);
    copy_if_exists(&root, "env", &mut env);
    assert_eq!(env.len(), 3);
    assert_eq!(env["LANG"], "C");
    assert_eq!(env["SHELL"], "/bin/zsh");
    assert_eq!(env["HOME"], "/home/app");

    let mut untouched = env.clone();
    copy_if_exists(&root, "missing", &mut untouched);
    assert_eq!(untouched, env);
}

#[test]
fn non_mapping_root_copies_nothing() {
    let mut dest = String::from("default");
    copy_if_exists(&parse("[foo, bar]").unwrap(), "foo", &mut dest);
    copy_if_exists(&parse("").unwrap(), "foo", &mut dest);
    copy_if_exists(&Node::scalar("foo"), "foo", &mut dest);
    assert_eq!(dest, "default");
}

#[test]
fn optional_settings_pattern() {
    #[derive(Debug)]
    struct Config {
        host: String,
        port: u16,
        verbose: bool,
        tags: Vec<String>,
    }

    let root = parse("port: 9000\nverbose: on\ntags: [a, b]\n").unwrap();
    let mut config = Config {
        host: "localhost".into(),
        port: 8080,
        verbose: false,
        tags: Vec::new(),
    };
    copy_if_exists(&root, "host", &mut config.host);
    copy_if_exists(&root, "port", &mut config.port);
    copy_if_exists(&root, "verbose", &mut config.verbose);
    copy_if_exists(&root, "tags", &mut config.tags);

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 9000);
    assert!(config.verbose);
    assert_eq!(config.tags, ["a", "b"]);
}

#[test]
fn try_variant_reports_each_outcome() {
    let root = parse(TESTDOC).unwrap();

    let mut text = String::from("default");
    assert!(!try_copy_if_exists(&root, "missing", &mut text).unwrap());
    assert_eq!(text, "default");

    assert!(try_copy_if_exists(&root, "foo", &mut text).unwrap());
    assert_eq!(text, "bar");

    let mut n = 3i64;
    let err = try_copy_if_exists(&root, "foo", &mut n).unwrap_err();
    assert_eq!(n, 3);
    assert!(err.to_string().contains("invalid i64"), "{err}");
    assert_eq!(err.location().map(|l| l.line()), Some(1));
}
