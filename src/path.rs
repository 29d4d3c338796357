//! Field paths locating values in nested structures.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] for representing
//! where inside a nested input a validation issue was found, plus parsers
//! for the two textual path forms collaborators commonly report:
//! dotted/bracketed paths (`users[0].email`) and JSON Pointers
//! (`/users/0/email`).

use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::Regex;

/// A segment of a field path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// Errors produced when parsing a textual path representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    /// The input does not match the dotted/bracketed path grammar.
    #[error("malformed field path '{0}'")]
    Malformed(String),

    /// An index segment does not fit in `usize`.
    #[error("index out of range in field path '{0}'")]
    IndexOutOfRange(String),

    /// A JSON Pointer did not start with `/`.
    #[error("malformed JSON Pointer '{0}': missing leading '/'")]
    MissingPointerSlash(String),
}

// Whole-path shape: a leading field or index, then any number of
// `.field` / `[index]` continuations.
static PATH_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^.\[\]]+|\[\d+\])(?:\.[^.\[\]]+|\[\d+\])*$")
        .expect("path shape pattern is a valid regex")
});

// Individual segments, captured once the shape is known to be well-formed.
static PATH_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^.\[\]]+)|\[(\d+)\]").expect("path segment pattern is a valid regex")
});

/// A path to a value in a nested structure.
///
/// `FieldPath` represents locations like `users[0].email` and provides
/// methods for building paths incrementally. An empty path denotes the
/// root value itself.
///
/// # Example
///
/// ```rust
/// use flatline::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Parses a dotted/bracketed path string such as `users[0].email`.
    ///
    /// An empty string parses to the root path. Field names may contain any
    /// characters other than `.`, `[` and `]`; indices are bracketed decimal
    /// numbers.
    ///
    /// # Errors
    ///
    /// Returns [`PathParseError::Malformed`] when the input does not follow
    /// the grammar, and [`PathParseError::IndexOutOfRange`] when an index
    /// does not fit in `usize`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatline::FieldPath;
    ///
    /// let path = FieldPath::parse("users[0].email").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.to_string(), "users[0].email");
    ///
    /// assert!(FieldPath::parse("users[").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        if input.is_empty() {
            return Ok(Self::root());
        }
        if !PATH_SHAPE.is_match(input) {
            return Err(PathParseError::Malformed(input.to_string()));
        }

        let mut segments = Vec::new();
        for caps in PATH_SEGMENT.captures_iter(input) {
            if let Some(name) = caps.get(1) {
                segments.push(PathSegment::Field(name.as_str().to_string()));
            } else if let Some(digits) = caps.get(2) {
                let idx = digits
                    .as_str()
                    .parse()
                    .map_err(|_| PathParseError::IndexOutOfRange(input.to_string()))?;
                segments.push(PathSegment::Index(idx));
            }
        }
        Ok(Self { segments })
    }

    /// Parses an RFC 6901 JSON Pointer such as `/users/0/email`.
    ///
    /// The empty pointer denotes the root path. Reference tokens consisting
    /// solely of decimal digits (without a superfluous leading zero) become
    /// index segments; everything else becomes a field segment after the
    /// standard `~1` -> `/` and `~0` -> `~` unescaping.
    ///
    /// # Errors
    ///
    /// Returns [`PathParseError::MissingPointerSlash`] when a non-empty
    /// pointer does not start with `/`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatline::FieldPath;
    ///
    /// let path = FieldPath::from_pointer("/users/0/email").unwrap();
    /// assert_eq!(path.to_string(), "users[0].email");
    ///
    /// assert!(FieldPath::from_pointer("users/0").is_err());
    /// ```
    pub fn from_pointer(pointer: &str) -> Result<Self, PathParseError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PathParseError::MissingPointerSlash(pointer.to_string()));
        };

        let segments = rest
            .split('/')
            .map(|token| {
                let is_index = !token.is_empty()
                    && token.bytes().all(|b| b.is_ascii_digit())
                    && (token == "0" || !token.starts_with('0'));
                if is_index {
                    if let Ok(idx) = token.parse() {
                        return PathSegment::Index(idx);
                    }
                }
                PathSegment::Field(token.replace("~1", "/").replace("~0", "~"))
            })
            .collect();
        Ok(Self { segments })
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the first segment, or None if this is root.
    ///
    /// The first segment identifies the top-level field an issue belongs to,
    /// which is what flattened error maps key on.
    pub fn first(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
