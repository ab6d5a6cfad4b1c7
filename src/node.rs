//! The YAML node tree.
//!
//! A parsed stream is a list of [`Node::Document`]s. Inside a document, nodes
//! are mappings, sequences and scalars, each remembering where it started in
//! the source. Scalars keep their raw text; whether `78` is a number or a
//! string is decided only when the node is decoded into a destination.
//!
//! Trees can also be assembled by hand:
//!
//! ```rust
//! use saphyr_tree::Node;
//!
//! let root = Node::document(Node::mapping([
//!     (Node::scalar("foo"), Node::scalar("bar")),
//!     (Node::scalar("seq"), Node::sequence([Node::scalar("a"), Node::scalar("b")])),
//! ]));
//! assert_eq!(root.get("foo").and_then(Node::as_str), Some("bar"));
//! ```

use std::fmt;

pub use saphyr_parser::ScalarStyle;

use crate::error::Location;
use crate::parse_scalars::scalar_is_nullish;
use crate::tags::Tag;

/// Longest scalar text quoted verbatim in error messages.
const DESCRIBE_MAX_CHARS: usize = 40;

/// Kind of a [`Node`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Mapping,
    Sequence,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Document => "document",
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
        })
    }
}

/// One node of a YAML tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Document),
    Mapping(Mapping),
    Sequence(Sequence),
    Scalar(Scalar),
}

/// A whole parsed unit. Wraps the real content root, if the document is not empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub(crate) root: Option<Box<Node>>,
    pub(crate) location: Location,
}

/// Ordered key/value pairs. Duplicate keys are kept as written.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Mapping {
    pub(crate) entries: Vec<(Node, Node)>,
    pub(crate) location: Location,
}

/// Ordered list of child nodes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Sequence {
    pub(crate) items: Vec<Node>,
    pub(crate) location: Location,
}

/// Leaf holding raw text, its quoting style and optional tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Scalar {
    pub(crate) value: String,
    pub(crate) style: ScalarStyle,
    pub(crate) tag: Option<String>,
    pub(crate) location: Location,
}

impl Document {
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Mapping {
    pub fn entries(&self) -> &[(Node, Node)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Sequence {
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl Scalar {
    /// A plain, untagged scalar.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: ScalarStyle::Plain,
            tag: None,
            location: Location::UNKNOWN,
        }
    }

    pub fn with_style(mut self, style: ScalarStyle) -> Self {
        self.style = style;
        self
    }

    /// Attach a tag such as `!!int`, `!!binary` or `tag:yaml.org,2002:str`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    /// The tag as written in the source (or as resolved by the parser), if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub(crate) fn resolved_tag(&self) -> Tag {
        Tag::parse(self.tag())
    }

    pub(crate) fn is_plain(&self) -> bool {
        matches!(self.style, ScalarStyle::Plain)
    }

    /// `!!null`, or a plain `~` / `null` / empty scalar.
    pub fn is_null(&self) -> bool {
        self.resolved_tag() == Tag::Null || scalar_is_nullish(&self.value, &self.style)
    }
}

impl Node {
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::new(value))
    }

    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Node::Sequence(Sequence {
            items: items.into_iter().collect(),
            location: Location::UNKNOWN,
        })
    }

    pub fn mapping(entries: impl IntoIterator<Item = (Node, Node)>) -> Self {
        Node::Mapping(Mapping {
            entries: entries.into_iter().collect(),
            location: Location::UNKNOWN,
        })
    }

    pub fn document(root: Node) -> Self {
        Node::Document(Document {
            root: Some(Box::new(root)),
            location: Location::UNKNOWN,
        })
    }

    pub fn empty_document() -> Self {
        Node::Document(Document {
            root: None,
            location: Location::UNKNOWN,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Mapping(_) => NodeKind::Mapping,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Node::Document(d) => d.location,
            Node::Mapping(m) => m.location,
            Node::Sequence(s) => s.location,
            Node::Scalar(s) => s.location,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Node::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Raw text of a scalar node.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().map(Scalar::value)
    }

    /// Null-like scalar, or a document without content.
    pub fn is_null(&self) -> bool {
        match self {
            Node::Scalar(s) => s.is_null(),
            Node::Document(d) => d.root.as_deref().is_none_or(Node::is_null),
            Node::Mapping(_) | Node::Sequence(_) => false,
        }
    }

    /// Look up a direct field of a mapping node. See [`crate::get`].
    pub fn get(&self, key: &str) -> Option<&Node> {
        crate::access::get(self, key)
    }

    /// The node with any document wrappers peeled off.
    ///
    /// An empty document stays as it is and reads as null.
    pub(crate) fn content(&self) -> &Node {
        match self {
            Node::Document(Document { root: Some(root), .. }) => root.content(),
            _ => self,
        }
    }

    /// Number of nodes in this subtree, counting `self`.
    pub(crate) fn node_count(&self) -> usize {
        1 + match self {
            Node::Document(d) => d.root.as_deref().map_or(0, Node::node_count),
            Node::Mapping(m) => m
                .entries
                .iter()
                .map(|(k, v)| k.node_count() + v.node_count())
                .sum(),
            Node::Sequence(s) => s.items.iter().map(Node::node_count).sum(),
            Node::Scalar(_) => 0,
        }
    }

    /// Short human description for error messages: ``scalar `abc` ``, `mapping`, ...
    pub(crate) fn describe(&self) -> String {
        match self {
            Node::Scalar(s) => {
                let mut text: String = s.value.chars().take(DESCRIBE_MAX_CHARS).collect();
                if s.value.chars().count() > DESCRIBE_MAX_CHARS {
                    text.push('…');
                }
                format!("scalar `{text}`")
            }
            other => other.kind().to_string(),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}
