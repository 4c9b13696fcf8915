//! String-level matching helpers.
//!
//! These take raw pattern text. A pattern that fails to compile matches
//! nothing; callers that need the reason should use [`GlobPattern::new`].

use crate::pattern::GlobPattern;

/// Test one path against one pattern.
///
/// Returns `false` for malformed patterns, including patterns with more than
/// [`crate::MAX_RECURSIVE_WILDCARDS`] occurrences of `**`.
pub fn matches(pattern: &str, path: &str) -> bool {
    GlobPattern::new(pattern).is_ok_and(|p| p.matches(path))
}

/// Whether any of `patterns` matches `path`.
pub fn matches_any<P: AsRef<str>>(patterns: &[P], path: &str) -> bool {
    patterns.iter().any(|p| matches(p.as_ref(), path))
}

/// Paths matched by at least one pattern, in input order.
///
/// Each pattern is compiled once for the whole batch.
pub fn filter<P, S>(patterns: &[P], paths: &[S]) -> Vec<String>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let compiled = compile_all(patterns);
    paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| compiled.iter().any(|p| p.matches(path)))
        .map(str::to_string)
        .collect()
}

/// The patterns that match `path`, in input order and as given.
pub fn matching_patterns<P: AsRef<str>>(patterns: &[P], path: &str) -> Vec<String> {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|pattern| matches(pattern, path))
        .map(str::to_string)
        .collect()
}

fn compile_all<P: AsRef<str>>(patterns: &[P]) -> Vec<GlobPattern> {
    patterns
        .iter()
        .filter_map(|p| GlobPattern::new(p.as_ref()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_pattern_matches_nothing() {
        assert!(!matches("src/[abc", "src/a"));
        assert!(!matches("[]", ""));
    }

    #[test]
    fn filter_skips_malformed_patterns() {
        let paths = ["a.go", "b.rs"];
        assert_eq!(filter(&["[", "*.go"], &paths), vec!["a.go"]);
    }
}
