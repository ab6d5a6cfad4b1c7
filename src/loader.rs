//! Builds [`Node`] trees from the `saphyr_parser::Parser` event stream.
//!
//! Event flow
//! - Stream markers are skipped; each `DocumentStart`/`DocumentEnd` pair yields
//!   one [`Node::Document`].
//! - Container starts push a frame; the matching end pops it and hands the
//!   finished node to the parent frame (or to the document).
//!
//! Anchors and aliases
//! - A finished node with an anchor is stored by anchor id.
//! - An alias inserts a clone of the stored subtree, subject to
//!   [`AliasLimits`](crate::AliasLimits).
//! - Anchors do not leak across documents.

use std::collections::HashMap;

use ahash::RandomState;
use saphyr_parser::{Event, Parser, Tag as ParserTag};

use crate::error::{location_from_span, Error, Location};
use crate::node::{Document, Mapping, Node, Scalar, Sequence};
use crate::options::Options;

/// Parse a single YAML document into a tree rooted at a [`Node::Document`].
///
/// An empty input yields an empty document. More than one document is an
/// error ([`Error::MultipleDocuments`]); use [`parse_multiple`] for streams.
///
/// ```rust
/// let root = saphyr_tree::parse("foo: bar\n").unwrap();
/// assert_eq!(root.kind(), saphyr_tree::NodeKind::Document);
/// assert_eq!(root.get("foo").and_then(|n| n.as_str()), Some("bar"));
/// ```
pub fn parse(input: &str) -> Result<Node, Error> {
    parse_with_options(input, Options::default())
}

/// [`parse`] with explicit loader [`Options`].
pub fn parse_with_options(input: &str, options: Options) -> Result<Node, Error> {
    let mut documents = parse_multiple_with_options(input, options)?.into_iter();
    match (documents.next(), documents.next()) {
        (None, _) => Ok(Node::empty_document()),
        (Some(document), None) => Ok(document),
        (Some(_), Some(second)) => Err(Error::MultipleDocuments {
            location: second.location(),
        }),
    }
}

/// Parse every document of a YAML stream, in order.
pub fn parse_multiple(input: &str) -> Result<Vec<Node>, Error> {
    parse_multiple_with_options(input, Options::default())
}

/// [`parse_multiple`] with explicit loader [`Options`].
pub fn parse_multiple_with_options(input: &str, options: Options) -> Result<Vec<Node>, Error> {
    let mut builder = TreeBuilder::new(options);
    for item in Parser::new_from_str(input) {
        let (event, span) = item.map_err(Error::from_scan_error)?;
        builder.push(event, location_from_span(&span))?;
    }
    let documents = builder.finish()?;
    tracing::debug!(documents = documents.len(), "parsed YAML stream");
    Ok(documents)
}

/// A container under construction.
enum Frame {
    Sequence {
        anchor: usize,
        location: Location,
        items: Vec<Node>,
    },
    Mapping {
        anchor: usize,
        location: Location,
        entries: Vec<(Node, Node)>,
        /// Key waiting for its value.
        key: Option<Node>,
    },
}

/// A document under construction.
struct OpenDocument {
    location: Location,
    root: Option<Node>,
}

struct TreeBuilder {
    options: Options,
    stack: Vec<Frame>,
    document: Option<OpenDocument>,
    documents: Vec<Node>,
    /// Finished anchored subtrees of the current document (id -> node).
    anchors: HashMap<usize, Node, RandomState>,
    /// Per-anchor expansion counters: anchor id -> number of expansions.
    per_anchor_expansions: HashMap<usize, usize, RandomState>,
    /// Nodes inserted by alias expansion in the current document.
    expanded_nodes: usize,
    /// Nodes built in the current document, alias copies included.
    nodes: usize,
}

impl TreeBuilder {
    fn new(options: Options) -> Self {
        Self {
            options,
            stack: Vec::new(),
            document: None,
            documents: Vec::new(),
            anchors: HashMap::default(),
            per_anchor_expansions: HashMap::default(),
            expanded_nodes: 0,
            nodes: 0,
        }
    }

    fn push(&mut self, event: Event<'_>, location: Location) -> Result<(), Error> {
        match event {
            Event::StreamStart | Event::StreamEnd | Event::Nothing => Ok(()),

            Event::DocumentStart(_) => {
                self.reset_document_state();
                self.document = Some(OpenDocument {
                    location,
                    root: None,
                });
                Ok(())
            }
            Event::DocumentEnd => self.close_document(location),

            Event::Scalar(value, style, anchor, tag) => {
                let node = Node::Scalar(Scalar {
                    value: value.into_owned(),
                    style,
                    tag: tag.as_ref().map(|t| tag_text(t)),
                    location,
                });
                self.count_nodes(1, location)?;
                self.complete(node, anchor, location)
            }

            Event::SequenceStart(anchor, _tag) => {
                self.enter(location)?;
                self.stack.push(Frame::Sequence {
                    anchor,
                    location,
                    items: Vec::new(),
                });
                Ok(())
            }
            Event::SequenceEnd => match self.stack.pop() {
                Some(Frame::Sequence {
                    anchor,
                    location: start,
                    items,
                }) => self.complete(Node::Sequence(Sequence { items, location: start }), anchor, location),
                _ => Err(Error::msg("sequence end without matching start").with_location(location)),
            },

            Event::MappingStart(anchor, _tag) => {
                self.enter(location)?;
                self.stack.push(Frame::Mapping {
                    anchor,
                    location,
                    entries: Vec::new(),
                    key: None,
                });
                Ok(())
            }
            Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Mapping {
                    anchor,
                    location: start,
                    entries,
                    key: None,
                }) => self.complete(Node::Mapping(Mapping { entries, location: start }), anchor, location),
                Some(Frame::Mapping { key: Some(_), .. }) => {
                    Err(Error::msg("mapping key without value").with_location(location))
                }
                _ => Err(Error::msg("mapping end without matching start").with_location(location)),
            },

            Event::Alias(anchor) => {
                let node = self
                    .anchors
                    .get(&anchor)
                    .ok_or_else(|| Error::unknown_anchor(anchor).with_location(location))?
                    .clone();
                self.observe_expansion(anchor, &node, location)?;
                self.complete(node, 0, location)
            }
        }
    }

    /// Account for a container start: node count and nesting depth.
    fn enter(&mut self, location: Location) -> Result<(), Error> {
        self.count_nodes(1, location)?;
        let depth = self.stack.len() + 1;
        if depth > self.options.max_depth {
            return Err(Error::msg(format!(
                "nesting depth limit exceeded: depth={} > {}",
                depth, self.options.max_depth
            ))
            .with_location(location));
        }
        Ok(())
    }

    fn count_nodes(&mut self, count: usize, location: Location) -> Result<(), Error> {
        self.nodes = self.nodes.saturating_add(count);
        if self.nodes > self.options.max_nodes {
            return Err(Error::msg(format!(
                "node limit exceeded: nodes={} > {}",
                self.nodes, self.options.max_nodes
            ))
            .with_location(location));
        }
        Ok(())
    }

    /// Alias-bomb hardening.
    fn observe_expansion(&mut self, anchor: usize, node: &Node, location: Location) -> Result<(), Error> {
        let limits = self.options.alias_limits;

        let count = self
            .per_anchor_expansions
            .entry(anchor)
            .and_modify(|c| *c += 1)
            .or_insert(1);
        if *count > limits.max_alias_expansions_per_anchor {
            return Err(Error::msg(format!(
                "alias expansion limit exceeded for anchor id {}: {} > {}",
                anchor, count, limits.max_alias_expansions_per_anchor
            ))
            .with_location(location));
        }

        let size = node.node_count();
        self.expanded_nodes = self.expanded_nodes.saturating_add(size);
        if self.expanded_nodes > limits.max_total_expanded_nodes {
            return Err(Error::msg(format!(
                "alias expansion limit exceeded: total_expanded_nodes={} > {}",
                self.expanded_nodes, limits.max_total_expanded_nodes
            ))
            .with_location(location));
        }
        self.count_nodes(size, location)
    }

    /// Hand a finished node to whatever is waiting for it.
    fn complete(&mut self, node: Node, anchor: usize, location: Location) -> Result<(), Error> {
        if anchor != 0 {
            self.anchors.insert(anchor, node.clone());
        }
        match self.stack.last_mut() {
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                Some(k) => entries.push((k, node)),
                None => *key = Some(node),
            },
            None => {
                let document = self
                    .document
                    .as_mut()
                    .ok_or_else(|| Error::msg("node outside of a document").with_location(location))?;
                if document.root.is_some() {
                    return Err(Error::msg("document has more than one root node").with_location(location));
                }
                document.root = Some(node);
            }
        }
        Ok(())
    }

    fn close_document(&mut self, location: Location) -> Result<(), Error> {
        if !self.stack.is_empty() {
            return Err(Error::msg("document ended inside an open container").with_location(location));
        }
        if let Some(OpenDocument { location, root }) = self.document.take() {
            self.documents.push(Node::Document(Document {
                root: root.map(Box::new),
                location,
            }));
        }
        Ok(())
    }

    /// Clear anchors and expansion counters at a document boundary.
    fn reset_document_state(&mut self) {
        self.anchors.clear();
        self.per_anchor_expansions.clear();
        self.expanded_nodes = 0;
        self.nodes = 0;
    }

    fn finish(mut self) -> Result<Vec<Node>, Error> {
        // The parser closes every document it opens; this covers a truncated stream.
        if self.document.is_some() {
            self.close_document(Location::UNKNOWN)?;
        }
        Ok(self.documents)
    }
}

/// Tag as one string, e.g. `tag:yaml.org,2002:int` or `!point`.
fn tag_text(tag: &ParserTag) -> String {
    format!("{}{}", tag.handle, tag.suffix)
}
