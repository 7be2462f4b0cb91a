//! Qualified-name conventions shared across the crate.

/// Separator between the segments of a fully-qualified name.
pub const SCOPE_SEPARATOR: &str = "::";

/// Prefix marking a name as anchored at the root namespace.
pub const ROOT_QUALIFIER: &str = "::";

/// Strip a leading root qualifier, if present.
///
/// Names are always compared in root-stripped form.
pub fn strip_root_qualifier(name: &str) -> &str {
    name.strip_prefix(ROOT_QUALIFIER).unwrap_or(name)
}

/// The prefix under which members of `name` live (`"Foo"` -> `"Foo::"`).
pub fn alias_prefix(name: &str) -> String {
    format!("{name}{SCOPE_SEPARATOR}")
}

/// Synthetic runtime names (anonymous objects printed by the runtime) begin
/// with a marker that can never open a source-level constant name.
pub fn is_synthetic(name: &str) -> bool {
    name.starts_with("#<")
}

/// Entirely lower-case names are conventionally non-constant bindings.
pub fn is_lowercase_binding(name: &str) -> bool {
    name == name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("::Foo::Bar", "Foo::Bar")]
    #[case("Foo::Bar", "Foo::Bar")]
    #[case("::", "")]
    #[case("", "")]
    fn test_strip_root_qualifier(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_root_qualifier(input), expected);
    }

    #[rstest]
    #[case("#<Class:0x0000f00>", true)]
    #[case("#<Object>", true)]
    #[case("Foo", false)]
    #[case("Foo#<", false)]
    fn test_is_synthetic(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_synthetic(name), expected);
    }

    #[rstest]
    #[case("acme", true)]
    #[case("acme::widget", true)]
    #[case("Acme", false)]
    #[case("ACME::widget", false)]
    fn test_is_lowercase_binding(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_lowercase_binding(name), expected);
    }

    #[test]
    fn test_alias_prefix() {
        assert_eq!(alias_prefix("Foo::Bar"), "Foo::Bar::");
    }
}
