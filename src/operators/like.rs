//! LIKE pattern matching
//!
//! Matching is a pluggable strategy so hosts can swap in collation-aware
//! or accelerated matchers. The default translates the SQL pattern to a
//! regex: `%` matches zero or more characters, `_` exactly one, and the
//! escape character (configurable, `\` by default) makes the next
//! character literal.

use crate::error::{Error, Result};

/// Default pattern escape character.
pub const DEFAULT_ESCAPE: char = '\\';

/// Strategy consulted by string-match reduction.
pub trait PatternMatcher: Send + Sync {
    fn matches(&self, text: &str, pattern: &str, escape: char) -> Result<bool>;
}

/// The built-in regex-backed matcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct LikePattern;

impl PatternMatcher for LikePattern {
    fn matches(&self, text: &str, pattern: &str, escape: char) -> Result<bool> {
        let regex_pattern = sql_pattern_to_regex(pattern, escape);
        let re = regex::Regex::new(&regex_pattern)
            .map_err(|e| Error::InvalidValue(format!("invalid LIKE pattern: {}", e)))?;
        Ok(re.is_match(text))
    }
}

/// Convert a SQL LIKE pattern to an anchored regex.
fn sql_pattern_to_regex(pattern: &str, escape: char) -> String {
    let mut regex = String::from("^(?s)");
    let mut escaped = false;

    for ch in pattern.chars() {
        if escaped {
            push_literal(&mut regex, ch);
            escaped = false;
            continue;
        }
        if ch == escape {
            escaped = true;
            continue;
        }
        match ch {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            other => push_literal(&mut regex, other),
        }
    }
    // a trailing escape character matches itself
    if escaped {
        push_literal(&mut regex, escape);
    }

    regex.push('$');
    regex
}

fn push_literal(regex: &mut String, ch: char) {
    match ch {
        '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\' => {
            regex.push('\\');
            regex.push(ch);
        }
        _ => regex.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcards() {
        let m = LikePattern;
        assert!(m.matches("abc", "a%c", DEFAULT_ESCAPE).unwrap());
        assert!(m.matches("abc", "a_c", DEFAULT_ESCAPE).unwrap());
        assert!(m.matches("hello world", "hello%", DEFAULT_ESCAPE).unwrap());
        assert!(m.matches("hello world", "%world", DEFAULT_ESCAPE).unwrap());
        assert!(!m.matches("hello", "goodbye%", DEFAULT_ESCAPE).unwrap());
        assert!(!m.matches("ab", "a_c", DEFAULT_ESCAPE).unwrap());
    }

    #[test]
    fn test_escape() {
        let m = LikePattern;
        // escaped percent is a literal
        assert!(m.matches("a%c", "a\\%c", DEFAULT_ESCAPE).unwrap());
        assert!(!m.matches("abc", "a\\%c", DEFAULT_ESCAPE).unwrap());
        // configurable escape character
        assert!(m.matches("50%", "50!%", '!').unwrap());
        assert!(!m.matches("50x", "50!%", '!').unwrap());
    }

    #[test]
    fn test_pattern_translation() {
        assert_eq!(sql_pattern_to_regex("hello", '\\'), "^(?s)hello$");
        assert_eq!(sql_pattern_to_regex("h_llo%", '\\'), "^(?s)h.llo.*$");
        assert_eq!(sql_pattern_to_regex("\\%x", '\\'), "^(?s)%x$");
        assert_eq!(sql_pattern_to_regex("a.b", '\\'), "^(?s)a\\.b$");
    }
}
