//! Destinations [`to`](crate::to) decodes into.
//!
//! Most types are overwritten by the decoded value. Map types also accept a
//! sequence of mappings, which they merge into their existing entries one
//! sequence element at a time.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use serde::Deserialize;

use crate::access::from_node_with_options;
use crate::de::{Cfg, merged_pairs};
use crate::error::Error;
use crate::node::Node;
use crate::options::Options;

/// A value that [`to`](crate::to) can decode a node into.
///
/// The provided [`decode_from`](Destination::decode_from) overwrites `self`
/// with the decoded value and leaves it untouched on error. `HashMap` and
/// `BTreeMap` override it: a sequence node is merged into the entries the
/// map already holds, and entries merged before a failing element stay.
///
/// Std scalars, strings and collections implement the trait. Your own
/// `Deserialize` types opt in with an empty impl:
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// impl saphyr_tree::Destination<'_> for Server {}
///
/// let root = saphyr_tree::parse("server: { host: example.org, port: 8443 }\n").unwrap();
/// let mut server = Server { host: "localhost".into(), port: 80 };
/// saphyr_tree::copy_if_exists(&root, "server", &mut server);
/// assert_eq!(server.port, 8443);
/// ```
///
/// Types from other crates can always go through [`from_node`](crate::from_node).
pub trait Destination<'n>: Deserialize<'n> {
    /// Decode `node` into `self`.
    fn decode_from(&mut self, node: &'n Node, options: &Options) -> Result<(), Error> {
        *self = from_node_with_options(node, options)?;
        Ok(())
    }
}

macro_rules! overwrite_destination {
    ($($ty:ty),* $(,)?) => {
        $(impl<'n> Destination<'n> for $ty {})*
    };
}

overwrite_destination!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String, (),
);

impl<'n> Destination<'n> for &'n str {}

impl<'n, T: Deserialize<'n>> Destination<'n> for Vec<T> {}

impl<'n, T: Deserialize<'n>> Destination<'n> for VecDeque<T> {}

impl<'n, T: Deserialize<'n> + Ord> Destination<'n> for BTreeSet<T> {}

impl<'n, T, S> Destination<'n> for HashSet<T, S>
where
    T: Deserialize<'n> + Eq + Hash,
    S: BuildHasher + Default,
{
}

impl<'n, T, const N: usize> Destination<'n> for [T; N] where [T; N]: Deserialize<'n> {}

impl<'n, A: Deserialize<'n>, B: Deserialize<'n>> Destination<'n> for (A, B) {}

impl<'n, A: Deserialize<'n>, B: Deserialize<'n>, C: Deserialize<'n>> Destination<'n> for (A, B, C) {}

impl<'n, T: Destination<'n>> Destination<'n> for Box<T> {
    fn decode_from(&mut self, node: &'n Node, options: &Options) -> Result<(), Error> {
        (**self).decode_from(node, options)
    }
}

impl<'n, T: Destination<'n>> Destination<'n> for Option<T> {
    /// Null clears the option. Otherwise a present value is decoded into in
    /// place, so `Option<HashMap<..>>` merges like the map itself.
    fn decode_from(&mut self, node: &'n Node, options: &Options) -> Result<(), Error> {
        if node.is_null() {
            *self = None;
            return Ok(());
        }
        match self {
            Some(inner) => inner.decode_from(node, options),
            None => {
                *self = Some(from_node_with_options(node, options)?);
                Ok(())
            }
        }
    }
}

impl<'n, K, V, S> Destination<'n> for HashMap<K, V, S>
where
    K: Deserialize<'n> + Eq + Hash,
    V: Deserialize<'n>,
    S: BuildHasher + Default,
{
    fn decode_from(&mut self, node: &'n Node, options: &Options) -> Result<(), Error> {
        merge_or_overwrite::<K, V, Self>(self, node, options)
    }
}

impl<'n, K, V> Destination<'n> for BTreeMap<K, V>
where
    K: Deserialize<'n> + Ord,
    V: Deserialize<'n>,
{
    fn decode_from(&mut self, node: &'n Node, options: &Options) -> Result<(), Error> {
        merge_or_overwrite::<K, V, Self>(self, node, options)
    }
}

/// Merge a sequence node into `dest` element by element; any other node
/// overwrites `dest` like the provided method does.
fn merge_or_overwrite<'n, K, V, M>(dest: &mut M, node: &'n Node, options: &Options) -> Result<(), Error>
where
    K: Deserialize<'n>,
    V: Deserialize<'n>,
    M: Deserialize<'n> + Extend<(K, V)>,
{
    let Node::Sequence(seq) = node.content() else {
        *dest = from_node_with_options(node, options)?;
        return Ok(());
    };
    tracing::trace!(entries = seq.len(), "merging sequence of mappings into existing map");
    let cfg = Cfg::from_options(options);
    for item in seq.items() {
        let pairs = merged_pairs::<K, V>(std::slice::from_ref(item), cfg)
            .map_err(|err| err.or_location(item.location()))?;
        dest.extend(pairs);
    }
    Ok(())
}
