//! DOT format utilities for graph visualization.
//!
//! Output produced with these helpers can be rendered using Graphviz tools.

/// Escapes a string for safe use in DOT format labels and identifiers.
///
/// Handles quotes, backslashes, newlines, and angle brackets, which all have special
/// meaning inside a quoted DOT label.
///
/// # Examples
///
/// ```rust
/// use cfgdom::utils::escape_dot;
///
/// let escaped = escape_dot("sub_401000<loop>");
/// assert_eq!(escaped, "sub_401000\\<loop\\>");
/// ```
#[must_use]
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace('<', "\\<")
        .replace('>', "\\>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_dot_plain_address() {
        assert_eq!(escape_dot("0x401000"), "0x401000");
    }

    #[test]
    fn test_escape_dot_quotes_and_backslash() {
        assert_eq!(escape_dot("C:\\bin\\\"a\""), "C:\\\\bin\\\\\\\"a\\\"");
    }

    #[test]
    fn test_escape_dot_newlines() {
        assert_eq!(escape_dot("entry\r\nexit"), "entry\\nexit");
    }

    #[test]
    fn test_escape_dot_angle_brackets() {
        assert_eq!(escape_dot("sub<T>"), "sub\\<T\\>");
    }
}
