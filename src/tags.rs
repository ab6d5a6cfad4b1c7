//! Resolution of YAML scalar tags.
//!
//! Tags are kept verbatim on the node; decoding resolves them into [`Tag`].
//! Core schema tags are recognized in every spelling the parser may hand us:
//! `!!int`, the shorthand `!int`, and the canonical `tag:yaml.org,2002:int`.

use std::fmt;

const CANONICAL_PREFIX: &str = "tag:yaml.org,2002:";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub(crate) enum Tag {
    /// No tag at all.
    #[default]
    None,
    /// The non-specific tag `!`: the scalar is a string.
    NonSpecific,
    Str,
    Int,
    Float,
    Bool,
    Null,
    Binary,
    Seq,
    Map,
    /// Any application tag; treated as a string-compatible scalar.
    Other,
}

impl Tag {
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Tag::None;
        };
        if raw == "!" {
            return Tag::NonSpecific;
        }
        let name = raw
            .strip_prefix(CANONICAL_PREFIX)
            .or_else(|| raw.strip_prefix("!!"))
            .or_else(|| raw.strip_prefix('!'))
            .unwrap_or(raw);
        // Some emitters write the canonical form with a stray `!` (`tag:yaml.org,2002:!int`).
        let name = name.strip_prefix('!').unwrap_or(name);
        match name {
            "str" => Tag::Str,
            "int" => Tag::Int,
            "float" => Tag::Float,
            "bool" => Tag::Bool,
            "null" => Tag::Null,
            "binary" => Tag::Binary,
            "seq" => Tag::Seq,
            "map" => Tag::Map,
            _ => Tag::Other,
        }
    }

    /// Whether a scalar carrying this tag may be read as text.
    pub(crate) fn can_parse_into_string(self) -> bool {
        !matches!(
            self,
            Tag::Int | Tag::Float | Tag::Bool | Tag::Null | Tag::Seq | Tag::Map
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tag::None => "untagged",
            Tag::NonSpecific => "!",
            Tag::Str => "!!str",
            Tag::Int => "!!int",
            Tag::Float => "!!float",
            Tag::Bool => "!!bool",
            Tag::Null => "!!null",
            Tag::Binary => "!!binary",
            Tag::Seq => "!!seq",
            Tag::Map => "!!map",
            Tag::Other => "application tag",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Tag;

    #[test]
    fn recognizes_all_spellings_of_core_tags() {
        for raw in ["!!int", "!int", "tag:yaml.org,2002:int", "tag:yaml.org,2002:!int"] {
            assert_eq!(Tag::parse(Some(raw)), Tag::Int, "{raw}");
        }
        assert_eq!(Tag::parse(Some("tag:yaml.org,2002:binary")), Tag::Binary);
        assert_eq!(Tag::parse(Some("!!null")), Tag::Null);
    }

    #[test]
    fn non_specific_and_application_tags() {
        assert_eq!(Tag::parse(None), Tag::None);
        assert_eq!(Tag::parse(Some("!")), Tag::NonSpecific);
        assert_eq!(Tag::parse(Some("!point")), Tag::Other);
        assert_eq!(Tag::parse(Some("tag:example.com,2024:thing")), Tag::Other);
    }

    #[test]
    fn string_compatibility() {
        assert!(Tag::None.can_parse_into_string());
        assert!(Tag::Str.can_parse_into_string());
        assert!(Tag::Binary.can_parse_into_string());
        assert!(Tag::Other.can_parse_into_string());
        assert!(!Tag::Int.can_parse_into_string());
        assert!(!Tag::Null.can_parse_into_string());
    }
}
