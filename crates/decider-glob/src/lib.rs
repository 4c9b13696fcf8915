//! # decider-glob
//!
//! Path glob matching for ADR scope rules.
//!
//! Patterns are `/`-separated. Within one segment `*` matches a run of
//! characters, `?` matches one character and `[...]` / `[^...]` match a
//! character class. A segment that is exactly `**` matches zero or more whole
//! path segments. No wildcard ever crosses a `/`.
//!
//! Matching never fails loudly: patterns come from user configuration, so a
//! malformed or over-complex pattern simply matches nothing.
//!
//! ```rust
//! use decider_glob::matches;
//!
//! assert!(matches("*.go", "main.go"));
//! assert!(!matches("*.go", "src/main.go"));
//! assert!(matches("src/**", "src/sub/deep/file.go"));
//! assert!(matches("**/*.go", "src/sub/main.go"));
//! ```
//!
//! ## Modules
//!
//! - [`pattern`] — `GlobPattern`: compile once, match many paths
//! - [`matcher`] — `matches`, `matches_any`, `filter`, `matching_patterns`
//! - [`error`] — Error types for pattern compilation

pub mod error;
pub mod matcher;
pub mod pattern;

pub use error::PatternError;
pub use matcher::{filter, matches, matches_any, matching_patterns};
pub use pattern::{GlobPattern, MAX_RECURSIVE_WILDCARDS};
