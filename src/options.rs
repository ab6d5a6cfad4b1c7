use serde::{Deserialize, Serialize};

/// Limits applied to alias expansion to harden against alias bombs.
///
/// Every alias inserts a full copy of the anchored subtree into the tree, so
/// a small document can describe an exponentially large tree.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasLimits {
    /// Maximum total number of nodes inserted by alias expansion across one document.
    pub max_total_expanded_nodes: usize,
    /// Maximum number of times a **single anchor id** may be expanded via alias.
    /// Use `usize::MAX` for "unlimited".
    pub max_alias_expansions_per_anchor: usize,
}

impl Default for AliasLimits {
    fn default() -> Self {
        Self {
            max_total_expanded_nodes: 1_000_000,
            max_alias_expansions_per_anchor: usize::MAX,
        }
    }
}

/// Loader and decoder configuration.
///
/// The loader uses the limits; the decoder uses the scalar interpretation flags.
///
/// ```rust
/// let options = saphyr_tree::options! {
///     strict_booleans: true,
///     max_depth: 64,
/// };
///
/// let root = saphyr_tree::parse_with_options("enabled: yes\n", options.clone()).unwrap();
/// let node = saphyr_tree::get(&root, "enabled").unwrap();
/// let mut enabled = false;
/// assert!(saphyr_tree::to_with_options(node, &mut enabled, &options).is_err());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Maximum nesting of sequences and mappings.
    pub max_depth: usize,
    /// Maximum number of nodes in one document, alias copies included.
    pub max_nodes: usize,
    /// Limits for alias expansion.
    pub alias_limits: AliasLimits,
    /// Enable legacy octal parsing where values starting with `00` are treated as base-8.
    /// They are deprecated in YAML 1.2. Default: false.
    pub legacy_octal_numbers: bool,
    /// If true, interpret only the exact literals `true` and `false` as booleans.
    /// YAML 1.1 forms like `yes`/`no`/`on`/`off` will be rejected and not inferred.
    /// Default: false (accept YAML 1.1 boolean forms).
    pub strict_booleans: bool,
    /// Read `!!binary` scalars into `String` destinations verbatim instead of
    /// base64-decoding them. Default: false.
    pub ignore_binary_tag_for_string: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 2_000,
            max_nodes: 250_000,
            alias_limits: AliasLimits::default(),
            legacy_octal_numbers: false,
            strict_booleans: false,
            ignore_binary_tag_for_string: false,
        }
    }
}
