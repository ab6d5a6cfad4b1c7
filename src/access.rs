//! Field lookup and typed decoding on top of the node tree.
//!
//! [`get`] and [`to`] surface every problem to the caller (absence as `None`,
//! decode failures as `Err`). [`copy_if_exists`] is the lenient composition of
//! the two for optional settings: it never reports anything, which also means
//! a malformed value goes unnoticed. Use [`try_copy_if_exists`] when that
//! matters.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, MapAccess, Visitor};

use crate::de::{Cfg, NodeDeserializer};
use crate::destination::Destination;
use crate::error::Error;
use crate::node::Node;
use crate::options::Options;

/// Look up a direct field of a mapping node by key.
///
/// A document node is unwrapped to its root first. Only scalar keys are
/// compared, against their raw text; the first matching entry wins.
/// Returns `None` if the node is not a mapping or has no such key.
///
/// ```rust
/// let root = saphyr_tree::parse("foo: bar\nnested: { foo: baz }\n").unwrap();
/// assert_eq!(saphyr_tree::get(&root, "foo").and_then(|n| n.as_str()), Some("bar"));
/// assert!(saphyr_tree::get(&root, "missing").is_none());
/// ```
pub fn get<'n>(node: &'n Node, key: &str) -> Option<&'n Node> {
    let node = match node {
        Node::Document(doc) => doc.root().unwrap_or(node),
        _ => node,
    };
    let Node::Mapping(map) = node else {
        return None;
    };
    map.entries().iter().find_map(|(k, v)| match k {
        Node::Scalar(s) if s.value() == key => Some(v),
        _ => None,
    })
}

/// Decode `node` into a new value of type `T`.
///
/// If `node` is a sequence and `T` is a map, the sequence elements (mappings
/// with scalar values) are merged into one new map in order, so a later key
/// overrides an earlier one. Everything else is plain Serde decoding.
pub fn from_node<'n, T>(node: &'n Node) -> Result<T, Error>
where
    T: Deserialize<'n>,
{
    from_node_with_options(node, &Options::default())
}

/// [`from_node`] with explicit scalar interpretation [`Options`].
pub fn from_node_with_options<'n, T>(node: &'n Node, options: &Options) -> Result<T, Error>
where
    T: Deserialize<'n>,
{
    let de = NodeDeserializer::with_cfg(node, Cfg::from_options(options), true);
    T::deserialize(de).map_err(|err| err.or_location(node.location()))
}

/// Decode `node` into `dest`.
///
/// If `node` is a sequence and `dest` is a map, every element (a mapping with
/// scalar values) is merged into the entries `dest` already holds, in order,
/// so a later key overrides an earlier one. This stops at the first element
/// that fails, and the pairs merged before it **stay in `dest`**.
///
/// In every other case `dest` is overwritten by the decoded value on success
/// and left untouched on failure. See [`Destination`] for which types can be
/// decoded into.
///
/// ```rust
/// use std::collections::HashMap;
///
/// let root = saphyr_tree::parse("env:\n  - HOME: /root\n  - SHELL: /bin/sh\n").unwrap();
/// let mut env = HashMap::from([("LANG".to_string(), "C".to_string())]);
/// saphyr_tree::to(saphyr_tree::get(&root, "env").unwrap(), &mut env).unwrap();
/// assert_eq!(env["SHELL"], "/bin/sh");
/// assert_eq!(env["LANG"], "C");
/// ```
pub fn to<'n, T>(node: &'n Node, dest: &mut T) -> Result<(), Error>
where
    T: Destination<'n>,
{
    to_with_options(node, dest, &Options::default())
}

/// [`to`] with explicit scalar interpretation [`Options`].
pub fn to_with_options<'n, T>(node: &'n Node, dest: &mut T, options: &Options) -> Result<(), Error>
where
    T: Destination<'n>,
{
    dest.decode_from(node, options)
}

/// Merge the mapping entries under `node` into an existing collection.
///
/// For a sequence node every element is decoded on its own into key/value
/// pairs and added to `dest` before the next element is looked at; any other
/// node is decoded as a single mapping. Entries already in `dest` are kept,
/// and for maps a later key overrides an earlier one.
///
/// If an element fails to decode the error is returned at once and the pairs
/// of the elements before it stay in `dest`.
///
/// Maps can also be extended with borrowed pairs, so for map destinations
/// the key and value types usually have to be named:
///
/// ```rust
/// use std::collections::HashMap;
///
/// let root = saphyr_tree::parse("- a: 1\n- b: 2\n").unwrap();
/// let mut dest = HashMap::from([("z".to_string(), 0)]);
/// saphyr_tree::merge_into::<String, i32, _>(&root, &mut dest).unwrap();
/// assert_eq!(dest.len(), 3);
/// ```
pub fn merge_into<'n, K, V, M>(node: &'n Node, dest: &mut M) -> Result<(), Error>
where
    K: Deserialize<'n>,
    V: Deserialize<'n>,
    M: Extend<(K, V)>,
{
    match node.content() {
        Node::Sequence(seq) => {
            for item in seq.items() {
                dest.extend(decode_pairs::<K, V>(item)?);
            }
            Ok(())
        }
        other => {
            dest.extend(decode_pairs::<K, V>(other)?);
            Ok(())
        }
    }
}

fn decode_pairs<'n, K, V>(node: &'n Node) -> Result<Vec<(K, V)>, Error>
where
    K: Deserialize<'n>,
    V: Deserialize<'n>,
{
    let pairs = Pairs::<K, V>::deserialize(NodeDeserializer::new(node))
        .map_err(|err| err.or_location(node.location()))?;
    Ok(pairs.0)
}

/// Key/value pairs of one mapping, in document order.
struct Pairs<K, V>(Vec<(K, V)>);

impl<'de, K, V> Deserialize<'de> for Pairs<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct PairsVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
        where
            K: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Pairs<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    pairs.push(pair);
                }
                Ok(Pairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

/// Decode the field `key` of `node` into `dest` if the field exists.
///
/// A missing field leaves `dest` as it was. **Decode errors are discarded**:
/// if the field exists but cannot be decoded into `T`, nothing is reported
/// (the error is only logged at `debug` level) and `dest` is left as [`to`]
/// left it: unchanged, or for a merged sequence holding the pairs of the
/// elements before the failing one. Use [`try_copy_if_exists`] to see the
/// error.
///
/// ```rust
/// let root = saphyr_tree::parse("port: not-a-number\n").unwrap();
/// let mut port = 8080u16;
/// let mut host = String::from("localhost");
/// saphyr_tree::copy_if_exists(&root, "port", &mut port);
/// saphyr_tree::copy_if_exists(&root, "host", &mut host);
/// assert_eq!(port, 8080);
/// assert_eq!(host, "localhost");
/// ```
pub fn copy_if_exists<'n, T>(node: &'n Node, key: &str, dest: &mut T)
where
    T: Destination<'n>,
{
    if let Err(err) = try_copy_if_exists(node, key, dest) {
        tracing::debug!(field = key, error = %err, "ignoring field that failed to decode");
    }
}

/// Like [`copy_if_exists`], but reports what happened.
///
/// Returns `Ok(false)` if the field is absent, `Ok(true)` if it was decoded
/// into `dest`, and the error of [`to`] otherwise.
pub fn try_copy_if_exists<'n, T>(node: &'n Node, key: &str, dest: &mut T) -> Result<bool, Error>
where
    T: Destination<'n>,
{
    let Some(field) = get(node, key) else {
        return Ok(false);
    };
    to(field, dest)?;
    Ok(true)
}
