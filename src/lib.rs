//! Read-only YAML node tree with field lookup and Serde decoding.
//!
//! A YAML text is parsed once into a [`Node`] tree ([`parse`]). Fields are then
//! picked out by name ([`get`]) and decoded into whatever typed destination the
//! caller holds ([`to`]), without the caller branching on the shape of the
//! node. Optional settings can be copied in one call ([`copy_if_exists`]).
//!
//! ```rust
//! use std::collections::HashMap;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Others {
//!     to: String,
//!     not: String,
//!     be: i32,
//! }
//!
//! impl saphyr_tree::Destination<'_> for Others {}
//!
//! let yaml = "
//! foo: bar
//! others: { to: be, not: to, be: 666 }
//! someMap:
//!   - someKey: value
//!   - someOtherKey: value2
//! ";
//! let root = saphyr_tree::parse(yaml).unwrap();
//!
//! let mut foo = String::new();
//! saphyr_tree::copy_if_exists(&root, "foo", &mut foo);
//! assert_eq!(foo, "bar");
//!
//! let mut others = Others { to: String::new(), not: String::new(), be: 0 };
//! saphyr_tree::to(saphyr_tree::get(&root, "others").unwrap(), &mut others).unwrap();
//! assert_eq!(others.be, 666);
//!
//! // A sequence of single-entry mappings is merged into the map.
//! let mut some_map = HashMap::from([("default".to_string(), "kept".to_string())]);
//! saphyr_tree::to(saphyr_tree::get(&root, "someMap").unwrap(), &mut some_map).unwrap();
//! assert_eq!(some_map["someOtherKey"], "value2");
//! assert_eq!(some_map["default"], "kept");
//! ```
//!
//! [`get`] and [`to`] report every problem; [`copy_if_exists`] deliberately
//! swallows decode errors. [`try_copy_if_exists`] is the variant that does not.

pub use access::{
    copy_if_exists, from_node, from_node_with_options, get, merge_into, to, to_with_options,
    try_copy_if_exists,
};
pub use de::NodeDeserializer;
pub use destination::Destination;
pub use error::{Error, Location};
pub use loader::{parse, parse_multiple, parse_multiple_with_options, parse_with_options};
pub use node::{Document, Mapping, Node, NodeKind, Scalar, ScalarStyle, Sequence};
pub use options::{AliasLimits, Options};

mod access;
mod de;
mod destination;
mod error;
mod loader;
#[macro_use]
mod macros;
mod node;
pub mod options;
mod parse_scalars;
mod tags;
