//! Error types for glob pattern compilation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern contains {count} '**' sequences, at most {max} allowed")]
    TooManyRecursiveWildcards { count: usize, max: usize },

    #[error("unclosed character class in segment '{segment}'")]
    UnclosedClass { segment: String },

    #[error("empty character class in segment '{segment}'")]
    EmptyClass { segment: String },

    #[error("misplaced '-' in character class in segment '{segment}'")]
    MisplacedDash { segment: String },
}

pub type Result<T> = std::result::Result<T, PatternError>;
