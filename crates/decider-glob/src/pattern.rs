//! Compiled glob patterns.
//!
//! A [`GlobPattern`] is split on `/` once at construction. Each piece is
//! either the recursive wildcard `**` or a sequence of tokens matched against
//! exactly one path segment.

use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, Result};

/// Most `**` occurrences a pattern may contain. Patterns above the ceiling
/// are rejected outright, which bounds the cost of the backtracking search.
pub const MAX_RECURSIVE_WILDCARDS: usize = 10;

/// One element of a single-segment pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    /// `?`
    AnyChar,
    /// `*`
    Star,
    /// `[...]` or `[^...]`, as inclusive ranges.
    Class { negated: bool, ranges: Vec<(char, char)> },
}

impl Token {
    fn matches_char(&self, ch: char) -> bool {
        match self {
            Token::Literal(c) => *c == ch,
            Token::AnyChar => true,
            Token::Star => false,
            Token::Class { negated, ranges } => {
                ranges.iter().any(|&(lo, hi)| lo <= ch && ch <= hi) != *negated
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `**`: zero or more whole path segments.
    Recursive,
    Tokens(Vec<Token>),
}

impl Segment {
    fn compile(segment: &str) -> Result<Self> {
        if segment == "**" {
            return Ok(Segment::Recursive);
        }

        let mut tokens = Vec::new();
        let mut chars = segment.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' => {
                    if tokens.last() != Some(&Token::Star) {
                        tokens.push(Token::Star);
                    }
                }
                '?' => tokens.push(Token::AnyChar),
                '[' => tokens.push(parse_class(&mut chars, segment)?),
                c => tokens.push(Token::Literal(c)),
            }
        }
        Ok(Segment::Tokens(tokens))
    }

    fn matches(&self, part: &str) -> bool {
        match self {
            Segment::Recursive => true,
            Segment::Tokens(tokens) => {
                let text: Vec<char> = part.chars().collect();
                match_tokens(tokens, &text)
            }
        }
    }
}

/// Parse the body of a character class; the opening `[` is already consumed.
fn parse_class(chars: &mut Peekable<Chars<'_>>, segment: &str) -> Result<Token> {
    let negated = chars.next_if_eq(&'^').is_some();
    let mut ranges = Vec::new();

    loop {
        let lo = match chars.next() {
            None => {
                return Err(PatternError::UnclosedClass {
                    segment: segment.to_string(),
                })
            }
            Some(']') if ranges.is_empty() => {
                return Err(PatternError::EmptyClass {
                    segment: segment.to_string(),
                })
            }
            Some(']') => return Ok(Token::Class { negated, ranges }),
            Some('-') => {
                return Err(PatternError::MisplacedDash {
                    segment: segment.to_string(),
                })
            }
            Some(c) => c,
        };

        // `-` is only valid between the two ends of a range.
        let hi = if chars.next_if_eq(&'-').is_some() {
            match chars.next() {
                None => {
                    return Err(PatternError::UnclosedClass {
                        segment: segment.to_string(),
                    })
                }
                Some('-' | ']') => {
                    return Err(PatternError::MisplacedDash {
                        segment: segment.to_string(),
                    })
                }
                Some(c) => c,
            }
        } else {
            lo
        };
        ranges.push((lo, hi));
    }
}

/// Match a token sequence against one segment's characters.
///
/// Single-star backtracking: on mismatch, resume from the most recent `*`
/// with it absorbing one more character.
fn match_tokens(tokens: &[Token], text: &[char]) -> bool {
    let (mut t, mut s) = (0, 0);
    let mut last_star: Option<(usize, usize)> = None;

    while s < text.len() {
        match tokens.get(t) {
            Some(Token::Star) => {
                last_star = Some((t, s));
                t += 1;
                continue;
            }
            Some(token) if token.matches_char(text[s]) => {
                t += 1;
                s += 1;
                continue;
            }
            _ => {}
        }
        match last_star {
            Some((star_t, star_s)) => {
                t = star_t + 1;
                s = star_s + 1;
                last_star = Some((star_t, star_s + 1));
            }
            None => return false,
        }
    }

    tokens[t..].iter().all(|token| *token == Token::Star)
}

/// Rewrite Windows separators so both sides use `/`.
fn normalize(s: &str) -> String {
    s.replace('\\', "/")
}

/// A compiled glob pattern.
///
/// Keeps the pattern text exactly as given; backslashes are treated as `/`
/// only for matching.
///
/// ```
/// use decider_glob::GlobPattern;
/// let pattern = GlobPattern::new("internal/**/*_test.go").unwrap();
/// assert!(pattern.matches("internal/adr/types_test.go"));
/// assert!(pattern.matches("internal/types_test.go"));
/// assert!(!pattern.matches("internal/adr/types.go"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobPattern {
    source: String,
    segments: Vec<Segment>,
}

impl GlobPattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// - [`PatternError::TooManyRecursiveWildcards`] when `**` occurs more than
    ///   [`MAX_RECURSIVE_WILDCARDS`] times
    /// - [`PatternError::UnclosedClass`] / [`PatternError::EmptyClass`] for a
    ///   malformed `[...]`
    pub fn new(pattern: &str) -> Result<Self> {
        let normalized = normalize(pattern);

        let count = normalized.matches("**").count();
        if count > MAX_RECURSIVE_WILDCARDS {
            return Err(PatternError::TooManyRecursiveWildcards {
                count,
                max: MAX_RECURSIVE_WILDCARDS,
            });
        }

        let segments = normalized
            .split('/')
            .map(Segment::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text as given to [`GlobPattern::new`].
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern has a `**` segment.
    pub fn is_recursive(&self) -> bool {
        self.segments.contains(&Segment::Recursive)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Test a slash-separated path against this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize(path);
        let parts: Vec<&str> = path.split('/').collect();

        if !self.is_recursive() {
            return self.segments.len() == parts.len()
                && self
                    .segments
                    .iter()
                    .zip(&parts)
                    .all(|(segment, part)| segment.matches(part));
        }

        RecursiveWalk::new(&self.segments, &parts).run()
    }
}

/// Backtracking search for patterns with `**` segments.
///
/// Recursion happens only at a `**`, so depth is bounded by
/// [`MAX_RECURSIVE_WILDCARDS`]. `(segment, part)` positions already known to
/// fail are remembered, which keeps the search polynomial.
struct RecursiveWalk<'a> {
    segments: &'a [Segment],
    parts: &'a [&'a str],
    failed: Vec<bool>,
}

impl<'a> RecursiveWalk<'a> {
    fn new(segments: &'a [Segment], parts: &'a [&'a str]) -> Self {
        Self {
            segments,
            parts,
            failed: vec![false; (segments.len() + 1) * (parts.len() + 1)],
        }
    }

    fn run(&mut self) -> bool {
        self.match_from(0, 0)
    }

    fn match_from(&mut self, mut si: usize, mut pi: usize) -> bool {
        while si < self.segments.len() {
            match &self.segments[si] {
                Segment::Recursive => {
                    if si == self.segments.len() - 1 {
                        return true;
                    }
                    let slot = si * (self.parts.len() + 1) + pi;
                    if self.failed[slot] {
                        return false;
                    }
                    for skip in pi..=self.parts.len() {
                        if self.match_from(si + 1, skip) {
                            return true;
                        }
                    }
                    self.failed[slot] = true;
                    return false;
                }
                segment => {
                    if pi >= self.parts.len() || !segment.matches(self.parts[pi]) {
                        return false;
                    }
                    si += 1;
                    pi += 1;
                }
            }
        }
        pi == self.parts.len()
    }
}

impl FromStr for GlobPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for GlobPattern {
    type Error = PatternError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<GlobPattern> for String {
    fn from(pattern: GlobPattern) -> Self {
        pattern.source
    }
}

impl AsRef<str> for GlobPattern {
    fn as_ref(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
