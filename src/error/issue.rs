//! Validation issue types.
//!
//! This module provides [`Issue`] for a single validation failure and
//! [`Issues`] for accumulating several of them without losing any.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// A single validation failure with full context.
///
/// `Issue` captures what a collaborator found wrong with one value:
/// - **path**: where in the data structure the failure occurred
/// - **message**: human-readable description of the failure
/// - **got**: the actual value that failed (optional)
/// - **expected**: what was expected instead (optional)
/// - **code**: machine-readable code for programmatic handling
///
/// # Example
///
/// ```rust
/// use flatline::{FieldPath, Issue};
///
/// let issue = Issue::new(
///     FieldPath::root().push_field("email"),
///     "invalid email format"
/// )
/// .with_code("invalid_email")
/// .with_got("not-an-email")
/// .with_expected("valid email address");
///
/// assert_eq!(issue.code, "invalid_email");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// The path to the value that failed validation.
    pub path: FieldPath,
    /// Human-readable failure message.
    pub message: String,
    /// The actual value that was received (formatted as string).
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable code (e.g., `min_length_violated`).
    pub code: String,
}

impl Issue {
    /// Creates a new issue with the given path and message.
    ///
    /// The code defaults to "validation_error". Use `with_code` to set a
    /// more specific one.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    /// Sets the code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (actual value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for Issue {}

// Issue stays Send + Sync as long as every field is an owned type
// (String, FieldPath with Vec<PathSegment>, Option<String>).
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty collection of validation issues.
///
/// `Issues` wraps a `NonEmptyVec<Issue>` to guarantee that at least one
/// issue is present, which is what makes it usable as the failure side of
/// `Validation<T, Issues>`: a failure always has something to report.
///
/// # Combining
///
/// `Issues` implements `Semigroup`, so failures from independent
/// validations can be merged without dropping anything:
///
/// ```rust
/// use flatline::{FieldPath, Issue, Issues};
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::new(FieldPath::from_field("name"), "required"));
/// let b = Issues::single(Issue::new(FieldPath::from_field("email"), "invalid format"));
///
/// let combined = a.combine(b);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates an `Issues` from a `NonEmptyVec` of issues.
    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates an `Issues` from a `Vec<Issue>`, or `None` if the vec is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        let mut iter = issues.into_iter();
        let first = Self::single(iter.next()?);
        Some(iter.fold(first, |acc, issue| acc.combine(Self::single(issue))))
    }

    /// Returns the number of issues in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    ///
    /// This method exists for API consistency but always returns false.
    pub fn is_empty(&self) -> bool {
        false // NonEmptyVec is never empty
    }

    /// Returns an iterator over the contained issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns all issues at the specified path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Returns all issues with the specified code.
    pub fn with_code(&self, code: &str) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    /// Returns the first issue in the collection.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Issue> {
        &self.0
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// Issues only contains Issue, which is Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
