//! String helpers used when deriving pool names from cluster names.

use crate::constants::NAME_COMPONENT_SEPARATOR;

/// Replace every forward slash in `value` with the name component separator.
///
/// DC/OS service names such as `dev/kubernetes01` become `dev--kubernetes01`.
pub fn replace_forward_slashes(value: &str) -> String {
    value.replace('/', NAME_COMPONENT_SEPARATOR)
}

/// Inverse of [`replace_forward_slashes`].
pub fn replace_separators(value: &str) -> String {
    value.replace(NAME_COMPONENT_SEPARATOR, "/")
}

/// Turn an arbitrary string into something made only of `[a-z0-9-]`.
///
/// Slashes become the component separator, ASCII letters are lowercased and
/// every other character is replaced by a single dash.
pub fn sanitize_name_component(value: &str) -> String {
    replace_forward_slashes(value)
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect()
}
