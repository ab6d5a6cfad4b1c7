//! Public macros for constructing option structs without relying on struct literal syntax.
//!
//! Call sites stay valid when fields are added to [`crate::Options`].

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = saphyr_tree::options! {
///     max_nodes: 10_000,
///     legacy_octal_numbers: true,
/// };
/// assert_eq!(options.max_nodes, 10_000);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            #[allow(deprecated)]
            {
                opt.$field = $value;
            }
        )*
        opt
    }};
}
