//! Serde deserializer over a borrowed [`Node`] tree.
//!
//! Supported:
//! - Scalars: string (borrowed from the tree), bool (YAML 1.1 forms), integers in
//!   decimal/hex/octal/binary, floats (incl. YAML 1.2 .nan / ±.inf), char.
//! - Bytes: `!!binary` (base64) or sequences of 0..=255.
//! - Arbitrarily nested sequences and mappings.
//! - Externally-tagged enums: `Variant` or `{ Variant: value }`.
//!
//! Merge mode:
//! - When enabled (the top level of [`crate::to`]), a map destination fed a
//!   sequence node sees one mapping made of the entries of every sequence
//!   element, in order. Elements must be mappings with scalar values.

use serde::de::{self, DeserializeSeed, IntoDeserializer, Visitor};

use crate::error::Error;
use crate::node::{Node, Scalar};
use crate::options::Options;
use crate::parse_scalars::{
    leading_zero_decimal, parse_bool, parse_int_signed, parse_int_unsigned, parse_yaml12_f32,
    parse_yaml12_f64,
};
use crate::tags::Tag;

/// Small immutable runtime configuration that `NodeDeserializer` needs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cfg {
    /// If true, accept legacy octal numbers that start with `00`.
    pub(crate) legacy_octal_numbers: bool,
    /// If true, only accept exact literals `true`/`false` as booleans.
    pub(crate) strict_booleans: bool,
    /// If true, `!!binary` scalars read into strings verbatim.
    pub(crate) ignore_binary_tag_for_string: bool,
}

impl Cfg {
    #[inline]
    pub(crate) fn from_options(options: &Options) -> Self {
        Self {
            legacy_octal_numbers: options.legacy_octal_numbers,
            strict_booleans: options.strict_booleans,
            ignore_binary_tag_for_string: options.ignore_binary_tag_for_string,
        }
    }
}

impl Default for Cfg {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

/// Decode a YAML `!!binary` scalar; YAML allows whitespace inside the base64 text.
pub(crate) fn decode_binary(scalar: &Scalar) -> Result<Vec<u8>, Error> {
    use base64::Engine as _;

    let cleaned: Vec<u8> = scalar
        .value()
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|err| Error::msg(format!("invalid !!binary base64: {err}")).with_location(scalar.location()))
}

/// Serde `Deserializer` reading from a borrowed node.
///
/// Strings are handed out borrowed, so destinations may hold `&'n str`.
/// Document wrappers are transparent; an empty document reads as null.
///
/// ```rust
/// use serde::Deserialize;
/// use saphyr_tree::NodeDeserializer;
///
/// let root = saphyr_tree::parse("[1, 2, 3]").unwrap();
/// let v = Vec::<u8>::deserialize(NodeDeserializer::new(&root)).unwrap();
/// assert_eq!(v, [1, 2, 3]);
/// ```
#[derive(Clone, Copy)]
pub struct NodeDeserializer<'n> {
    node: &'n Node,
    cfg: Cfg,
    merge_sequences: bool,
}

impl<'n> NodeDeserializer<'n> {
    /// Deserializer with default [`Options`] and merge mode off.
    pub fn new(node: &'n Node) -> Self {
        Self::with_cfg(node, Cfg::default(), false)
    }

    /// Deserializer using the scalar interpretation flags of `options`.
    pub fn with_options(node: &'n Node, options: &Options) -> Self {
        Self::with_cfg(node, Cfg::from_options(options), false)
    }

    /// Enable or disable merge mode for this node (not for its children).
    pub fn merge_sequences(mut self, enabled: bool) -> Self {
        self.merge_sequences = enabled;
        self
    }

    pub(crate) fn with_cfg(node: &'n Node, cfg: Cfg, merge_sequences: bool) -> Self {
        Self {
            node: node.content(),
            cfg,
            merge_sequences,
        }
    }

    /// Deserializer for a child node. Merge mode never propagates downwards.
    fn child(&self, node: &'n Node) -> Self {
        Self::with_cfg(node, self.cfg, false)
    }

    fn scalar(&self, expected: &'static str) -> Result<&'n Scalar, Error> {
        match self.node {
            Node::Scalar(s) => Ok(s),
            other => Err(Error::unexpected(expected, other)),
        }
    }

    fn is_null(&self) -> bool {
        self.node.is_null()
    }

    /// Type a plain, untagged scalar the way a typeless consumer expects:
    /// null-like → bool → int → float, falling back to string.
    fn visit_inferred<V: Visitor<'n>>(&self, s: &'n Scalar, visitor: V) -> Result<V::Value, Error> {
        let text = s.value();
        let location = s.location();
        let t = text.trim();
        let legacy_octal = self.cfg.legacy_octal_numbers;

        if self.cfg.strict_booleans {
            if t == "true" {
                return visitor.visit_bool(true);
            } else if t == "false" {
                return visitor.visit_bool(false);
            }
        } else if let Ok(b) = parse_bool(t, false, location) {
            return visitor.visit_bool(b);
        }

        if leading_zero_decimal(t) && !legacy_octal {
            return visitor.visit_borrowed_str(text);
        }

        if t.starts_with('-') {
            if let Ok(v) = parse_int_signed::<i64>(t, "i64", location, legacy_octal) {
                return visitor.visit_i64(v);
            }
        } else if let Ok(v) = parse_int_unsigned::<u64>(t, "u64", location, legacy_octal) {
            return visitor.visit_u64(v);
        }

        if let Ok(v) = parse_yaml12_f64(t, location) {
            // serde_json::Value (and possibly other typeless consumers) cannot represent
            // non-finite floats; hand those out in their canonical YAML spelling.
            if v.is_finite() {
                return visitor.visit_f64(v);
            }
            let canon = if v.is_nan() {
                ".nan"
            } else if v.is_sign_negative() {
                "-.inf"
            } else {
                ".inf"
            };
            return visitor.visit_str(canon);
        }

        visitor.visit_borrowed_str(text)
    }
}

impl<'n> de::Deserializer<'n> for NodeDeserializer<'n> {
    type Error = Error;

    /// Fallback entry point when the caller's type has no specific expectation
    /// (`serde_json::Value`, untagged enums, ...).
    ///
    /// Explicit core tags decide the type; quoted and otherwise tagged scalars
    /// are strings; plain untagged scalars are inferred.
    fn deserialize_any<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = match self.node {
            Node::Scalar(s) => s,
            Node::Sequence(_) => return self.deserialize_seq(visitor),
            Node::Mapping(_) => return self.deserialize_map(visitor),
            Node::Document(_) => return visitor.visit_unit(),
        };
        if s.is_null() {
            return visitor.visit_unit();
        }
        let legacy_octal = self.cfg.legacy_octal_numbers;
        match s.resolved_tag() {
            Tag::Bool => visitor.visit_bool(parse_bool(s.value(), self.cfg.strict_booleans, s.location())?),
            Tag::Int if s.value().trim().starts_with('-') => {
                visitor.visit_i64(parse_int_signed(s.value(), "i64", s.location(), legacy_octal)?)
            }
            Tag::Int => visitor.visit_u64(parse_int_unsigned(s.value(), "u64", s.location(), legacy_octal)?),
            Tag::Float => visitor.visit_f64(parse_yaml12_f64(s.value(), s.location())?),
            Tag::Binary if !self.cfg.ignore_binary_tag_for_string => {
                let data = decode_binary(s)?;
                match String::from_utf8(data) {
                    Ok(text) => visitor.visit_string(text),
                    Err(err) => visitor.visit_byte_buf(err.into_bytes()),
                }
            }
            Tag::None if s.is_plain() => self.visit_inferred(s, visitor),
            _ => visitor.visit_borrowed_str(s.value()),
        }
    }

    fn deserialize_bool<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("boolean scalar")?;
        visitor.visit_bool(parse_bool(s.value(), self.cfg.strict_booleans, s.location())?)
    }

    fn deserialize_i8<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_i8(parse_int_signed(s.value(), "i8", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_i16<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_i16(parse_int_signed(s.value(), "i16", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_i32<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_i32(parse_int_signed(s.value(), "i32", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_i64<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_i64(parse_int_signed(s.value(), "i64", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_i128<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_i128(parse_int_signed(s.value(), "i128", s.location(), self.cfg.legacy_octal_numbers)?)
    }

    fn deserialize_u8<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_u8(parse_int_unsigned(s.value(), "u8", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_u16<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_u16(parse_int_unsigned(s.value(), "u16", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_u32<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_u32(parse_int_unsigned(s.value(), "u32", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_u64<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_u64(parse_int_unsigned(s.value(), "u64", s.location(), self.cfg.legacy_octal_numbers)?)
    }
    fn deserialize_u128<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("integer scalar")?;
        visitor.visit_u128(parse_int_unsigned(s.value(), "u128", s.location(), self.cfg.legacy_octal_numbers)?)
    }

    /// Parse a 32-bit float (supports YAML 1.2 `+.inf`, `-.inf`, `.nan`).
    fn deserialize_f32<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("float scalar")?;
        visitor.visit_f32(parse_yaml12_f32(s.value(), s.location())?)
    }
    /// Parse a 64-bit float (supports YAML 1.2 `+.inf`, `-.inf`, `.nan`).
    fn deserialize_f64<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("float scalar")?;
        visitor.visit_f64(parse_yaml12_f64(s.value(), s.location())?)
    }

    /// Parse a single Unicode scalar value (`char`). Null forms are rejected.
    fn deserialize_char<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("single character")?;
        if s.is_null() {
            return Err(Error::msg("invalid char: null not allowed").with_location(s.location()));
        }
        let mut it = s.value().chars();
        match (it.next(), it.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::msg("invalid char: expected a single Unicode scalar value")
                .with_location(s.location())),
        }
    }

    fn deserialize_str<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let s = self.scalar("string scalar")?;
        match s.resolved_tag() {
            Tag::Binary if !self.cfg.ignore_binary_tag_for_string => {
                let data = decode_binary(s)?;
                let text = String::from_utf8(data).map_err(|_| {
                    Error::msg("!!binary scalar is not valid UTF-8").with_location(s.location())
                })?;
                visitor.visit_string(text)
            }
            tag if !tag.can_parse_into_string() => Err(Error::msg(format!(
                "cannot deserialize scalar tagged {tag} into string"
            ))
            .with_location(s.location())),
            _ => visitor.visit_borrowed_str(s.value()),
        }
    }

    fn deserialize_string<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_str(visitor)
    }

    /// Bytes come either from `!!binary` or from a sequence of integers (0..=255).
    fn deserialize_bytes<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.node {
            Node::Scalar(s) if s.resolved_tag() == Tag::Binary => visitor.visit_byte_buf(decode_binary(s)?),
            Node::Scalar(s) => Err(Error::msg("bytes not supported (missing !!binary tag)")
                .with_location(s.location())),
            Node::Sequence(seq) => {
                let mut out = Vec::with_capacity(seq.len());
                for item in seq.items() {
                    let b: u8 = de::Deserialize::deserialize(self.child(item))
                        .map_err(|err: Error| err.or_location(item.location()))?;
                    out.push(b);
                }
                visitor.visit_byte_buf(out)
            }
            other => Err(Error::unexpected("scalar (!!binary) or sequence of 0..=255", other)),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_bytes(visitor)
    }

    /// Null-like nodes are `None`; anything else is `Some`.
    fn deserialize_option<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.is_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.is_null() {
            visitor.visit_unit()
        } else {
            Err(Error::unexpected("null", self.node))
        }
    }

    /// A unit struct is written as null or as an empty mapping `{}`.
    fn deserialize_unit_struct<V: Visitor<'n>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.node {
            Node::Mapping(map) if map.is_empty() => visitor.visit_unit(),
            _ => self.deserialize_unit(visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'n>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.node {
            Node::Sequence(seq) => visitor.visit_seq(SeqNodes::new(seq.items(), self.cfg)),
            Node::Scalar(s) if s.resolved_tag() == Tag::Binary => {
                let data = decode_binary(s)?;
                visitor.visit_seq(de::value::SeqDeserializer::<_, Error>::new(data.into_iter()))
            }
            _ if self.is_null() => visitor.visit_seq(SeqNodes::new(&[], self.cfg)),
            other => Err(Error::unexpected("sequence", other)),
        }
    }

    fn deserialize_tuple<V: Visitor<'n>>(self, _len: usize, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'n>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    /// Maps read a mapping node, or, in merge mode, a sequence of mappings.
    fn deserialize_map<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.node {
            Node::Mapping(map) => visitor.visit_map(MapNodes::new(map.entries(), self.cfg)),
            Node::Sequence(seq) if self.merge_sequences => {
                tracing::trace!(entries = seq.len(), "merging sequence of mappings into map");
                visitor.visit_map(MergedNodes::new(seq.items(), self.cfg))
            }
            _ if self.is_null() => visitor.visit_map(MapNodes::new(&[], self.cfg)),
            other => Err(Error::unexpected("mapping", other)),
        }
    }

    /// Structs read a mapping node only; they are never merge targets.
    fn deserialize_struct<V: Visitor<'n>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.node {
            Node::Mapping(map) => visitor.visit_map(MapNodes::new(map.entries(), self.cfg)),
            _ if self.is_null() => visitor.visit_map(MapNodes::new(&[], self.cfg)),
            other => Err(Error::unexpected("mapping", other)),
        }
    }

    /// Externally-tagged enum in either `Variant` or `{ Variant: value }` form.
    fn deserialize_enum<V: Visitor<'n>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.node {
            Node::Scalar(s) => {
                let access: de::value::BorrowedStrDeserializer<'n, Error> =
                    de::value::BorrowedStrDeserializer::new(s.value());
                visitor.visit_enum(access)
            }
            Node::Mapping(map) if map.len() == 1 => {
                let (key, value) = &map.entries()[0];
                visitor.visit_enum(VariantNodes {
                    key,
                    value,
                    cfg: self.cfg,
                })
            }
            other => Err(Error::unexpected(
                "enum variant (scalar or single-entry mapping)",
                other,
            )),
        }
    }

    fn deserialize_identifier<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'n>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }
}

impl<'n> IntoDeserializer<'n, Error> for NodeDeserializer<'n> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

/// `SeqAccess` over the children of a sequence node.
struct SeqNodes<'n> {
    items: std::slice::Iter<'n, Node>,
    cfg: Cfg,
}

impl<'n> SeqNodes<'n> {
    fn new(items: &'n [Node], cfg: Cfg) -> Self {
        Self {
            items: items.iter(),
            cfg,
        }
    }
}

impl<'n> de::SeqAccess<'n> for SeqNodes<'n> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Error>
    where
        T: DeserializeSeed<'n>,
    {
        let Some(item) = self.items.next() else {
            return Ok(None);
        };
        seed.deserialize(NodeDeserializer::with_cfg(item, self.cfg, false))
            .map(Some)
            .map_err(|err| err.or_location(item.location()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// `MapAccess` over the entries of a mapping node.
struct MapNodes<'n> {
    entries: std::slice::Iter<'n, (Node, Node)>,
    value: Option<&'n Node>,
    cfg: Cfg,
}

impl<'n> MapNodes<'n> {
    fn new(entries: &'n [(Node, Node)], cfg: Cfg) -> Self {
        Self {
            entries: entries.iter(),
            value: None,
            cfg,
        }
    }
}

impl<'n> de::MapAccess<'n> for MapNodes<'n> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: DeserializeSeed<'n>,
    {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        self.value = Some(value);
        seed.deserialize(NodeDeserializer::with_cfg(key, self.cfg, false))
            .map(Some)
            .map_err(|err| err.or_location(key.location()))
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: DeserializeSeed<'n>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::msg("value requested before key"))?;
        seed.deserialize(NodeDeserializer::with_cfg(value, self.cfg, false))
            .map_err(|err| err.or_location(value.location()))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

/// `MapAccess` presenting a sequence of mappings as one flat mapping.
///
/// Entries are yielded in sequence order, so map destinations that insert
/// keep the last value for a repeated key. Null elements contribute nothing.
struct MergedNodes<'n> {
    items: std::slice::Iter<'n, Node>,
    current: std::slice::Iter<'n, (Node, Node)>,
    value: Option<&'n Node>,
    cfg: Cfg,
}

impl<'n> MergedNodes<'n> {
    fn new(items: &'n [Node], cfg: Cfg) -> Self {
        Self {
            items: items.iter(),
            current: Default::default(),
            value: None,
            cfg,
        }
    }
}

impl<'n> de::MapAccess<'n> for MergedNodes<'n> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: DeserializeSeed<'n>,
    {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.value = Some(value);
                return seed
                    .deserialize(NodeDeserializer::with_cfg(key, self.cfg, false))
                    .map(Some)
                    .map_err(|err| err.or_location(key.location()));
            }
            let Some(item) = self.items.next() else {
                return Ok(None);
            };
            match item.content() {
                Node::Mapping(map) => self.current = map.entries().iter(),
                node if node.is_null() => {}
                other => return Err(Error::merge_entry(other)),
            }
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: DeserializeSeed<'n>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::msg("value requested before key"))?;
        if !matches!(value.content(), Node::Scalar(_)) {
            return Err(Error::unexpected("scalar value in merged mapping", value));
        }
        seed.deserialize(NodeDeserializer::with_cfg(value, self.cfg, false))
            .map_err(|err| err.or_location(value.location()))
    }
}

/// Key/value pairs of `items` read through [`MergedNodes`], in order.
///
/// Same rules as merge mode: null items are skipped, other non-mappings fail
/// with [`Error::MergeEntry`], values must be scalars.
pub(crate) fn merged_pairs<'n, K, V>(items: &'n [Node], cfg: Cfg) -> Result<Vec<(K, V)>, Error>
where
    K: de::Deserialize<'n>,
    V: de::Deserialize<'n>,
{
    let mut access = MergedNodes::new(items, cfg);
    let mut pairs = Vec::new();
    while let Some(pair) = de::MapAccess::next_entry(&mut access)? {
        pairs.push(pair);
    }
    Ok(pairs)
}

/// `EnumAccess` for the `{ Variant: value }` form.
struct VariantNodes<'n> {
    key: &'n Node,
    value: &'n Node,
    cfg: Cfg,
}

impl<'n> de::EnumAccess<'n> for VariantNodes<'n> {
    type Error = Error;
    type Variant = VariantValue<'n>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Error>
    where
        V: DeserializeSeed<'n>,
    {
        let variant = seed
            .deserialize(NodeDeserializer::with_cfg(self.key, self.cfg, false))
            .map_err(|err| err.or_location(self.key.location()))?;
        Ok((
            variant,
            VariantValue {
                de: NodeDeserializer::with_cfg(self.value, self.cfg, false),
            },
        ))
    }
}

struct VariantValue<'n> {
    de: NodeDeserializer<'n>,
}

impl<'n> de::VariantAccess<'n> for VariantValue<'n> {
    type Error = Error;

    /// `{ Variant: ~ }` is accepted for unit variants.
    fn unit_variant(self) -> Result<(), Error> {
        if self.de.is_null() {
            Ok(())
        } else {
            Err(Error::unexpected("null payload for unit enum variant", self.de.node))
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Error>
    where
        T: DeserializeSeed<'n>,
    {
        let location = self.de.node.location();
        seed.deserialize(self.de).map_err(|err| err.or_location(location))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'n>,
    {
        de::Deserializer::deserialize_seq(self.de, visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'n>,
    {
        de::Deserializer::deserialize_struct(self.de, "", fields, visitor)
    }
}
