//! JSON Pointer implementation (RFC 6901).
//!
//! Used for validation issue paths and for resolving local `$ref` values
//! such as `#/definitions/Address`.
//! Segments are `/`-separated, with `~` escaped as `~0` and `/` escaped as `~1`.

/// Appends a segment to a JSON Pointer path, applying RFC 6901 escaping.
///
/// Escaping rules: `~` -> `~0`, `/` -> `~1`
pub fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            other => path.push(other),
        }
    }
}

/// Returns a new JSON Pointer path by appending a segment to the given path.
///
/// Convenience for building paths without mutating. Applies RFC 6901 escaping.
#[must_use]
pub fn format(path: &str, segment: &str) -> String {
    let mut result: String = path.to_string();
    push_segment(&mut result, segment);
    result
}

/// Extracts the pointer from a local `$ref` fragment (`#/a/b` -> `/a/b`, `#` -> ``).
///
/// Returns `None` for references that do not point into the same document.
#[must_use]
pub fn from_fragment(reference: &str) -> Option<&str> {
    let pointer: &str = reference.strip_prefix('#')?;
    if pointer.is_empty() || pointer.starts_with('/') {
        Some(pointer)
    } else {
        None
    }
}

/// Returns the unescaped last segment of a pointer, or `None` for the root pointer.
#[must_use]
pub fn last_segment(pointer: &str) -> Option<String> {
    let (_, segment) = pointer.rsplit_once('/')?;
    Some(segment.replace("~1", "/").replace("~0", "~"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_segment() {
        let mut path = String::new();
        push_segment(&mut path, "foo");
        assert_eq!(path, "/foo");
    }

    #[test]
    fn segment_with_slash() {
        let mut path = String::new();
        push_segment(&mut path, "a/b");
        assert_eq!(path, "/a~1b");
    }

    #[test]
    fn segment_with_tilde() {
        let mut path = String::new();
        push_segment(&mut path, "a~b");
        assert_eq!(path, "/a~0b");
    }


    #[test]
    fn multiple_segments() {
        let mut path = String::new();
        push_segment(&mut path, "properties");
        push_segment(&mut path, "foo");
        push_segment(&mut path, "items");
        assert_eq!(path, "/properties/foo/items");
    }

    #[test]
    fn format_with_base() {
        assert_eq!(format("/properties", "foo-bar"), "/properties/foo-bar");
    }

    #[test]
    fn format_escapes_slash() {
        assert_eq!(format("", "a/b"), "/a~1b");
    }

    #[test]
    fn format_empty_segment() {
        assert_eq!(format("/properties", ""), "/properties/");
    }

    #[test]
    fn fragment_to_pointer() {
        assert_eq!(Some("/definitions/Foo"), from_fragment("#/definitions/Foo"));
        assert_eq!(Some(""), from_fragment("#"));
    }

    #[test]
    fn fragment_rejects_external_and_anchor_refs() {
        assert_eq!(None, from_fragment("other.json#/definitions/Foo"));
        assert_eq!(None, from_fragment("#anchor"));
    }

    #[test]
    fn last_segment_unescapes() {
        assert_eq!(Some("a/b~c".to_string()), last_segment("/definitions/a~1b~0c"));
        assert_eq!(Some("Foo".to_string()), last_segment("/$defs/Foo"));
        assert_eq!(None, last_segment(""));
    }
}
