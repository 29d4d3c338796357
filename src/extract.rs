//! Flattening of validation failures into field-keyed error maps.
//!
//! Accumulated issues are precise about *where* a failure happened
//! (`users[0].email`), but form-style consumers usually want one message
//! per top-level field. [`extract_errors`] performs that reshaping: each
//! issue is keyed by the first segment of its path, and when several
//! issues land on the same key the last one in iteration order wins.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::{FieldPath, PathSegment};

/// Contract for anything the extractor can flatten.
///
/// Any collaborator error type that can expose a path and a message can be
/// fed to [`extract_errors`] directly, without first converting to
/// [`Issue`]. The bundled [`Issue`] type implements this, as does any
/// reference to an implementor.
pub trait IssueLike {
    /// The location of the failing value.
    fn path(&self) -> &FieldPath;

    /// The human-readable failure message.
    fn message(&self) -> &str;
}

impl IssueLike for Issue {
    fn path(&self) -> &FieldPath {
        &self.path
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl<T: IssueLike + ?Sized> IssueLike for &T {
    fn path(&self) -> &FieldPath {
        (**self).path()
    }

    fn message(&self) -> &str {
        (**self).message()
    }
}

/// The key an issue is filed under in an [`ErrorMap`].
///
/// Keys are derived from the first segment of an issue's path. Field names
/// and array indices are kept as distinct variants so `items[0]` and a
/// field literally named `"0"` can never collide. Issues with an empty
/// path (failures of the root value itself) file under the reserved
/// [`FieldKey::Root`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// The validated value itself failed, with no field to blame.
    Root,
    /// A top-level field/property.
    Field(String),
    /// A top-level array index.
    Index(usize),
}

impl FieldKey {
    /// Creates a field-name key.
    pub fn field(name: impl Into<String>) -> Self {
        FieldKey::Field(name.into())
    }

    /// Creates an index key.
    pub fn index(idx: usize) -> Self {
        FieldKey::Index(idx)
    }

    /// Derives the key for an issue located at `path`.
    pub fn from_path(path: &FieldPath) -> Self {
        match path.first() {
            Some(PathSegment::Field(name)) => FieldKey::Field(name.clone()),
            Some(PathSegment::Index(idx)) => FieldKey::Index(*idx),
            None => FieldKey::Root,
        }
    }
}

impl From<&PathSegment> for FieldKey {
    fn from(segment: &PathSegment) -> Self {
        match segment {
            PathSegment::Field(name) => FieldKey::Field(name.clone()),
            PathSegment::Index(idx) => FieldKey::Index(*idx),
        }
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Root => write!(f, "(root)"),
            FieldKey::Field(name) => write!(f, "{}", name),
            FieldKey::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A flat mapping from top-level field to failure message.
///
/// Built fresh by each extraction call; entries keep insertion order.
/// When several issues share a first path segment, the message of the
/// last one in iteration order is the one retained.
///
/// # Example
///
/// ```rust
/// use flatline::{extract_errors, FieldPath, Issue, Issues};
///
/// let issues = Issues::single(Issue::new(
///     FieldPath::from_field("price"),
///     "Price must be greater than 0",
/// ));
///
/// let errors = extract_errors(&issues);
/// assert_eq!(errors.field("price"), Some("Price must be greater than 0"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(IndexMap<FieldKey, String>);

impl ErrorMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message filed under `key`, if any.
    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the message for a named top-level field, if any.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.get(&FieldKey::Field(name.to_string()))
    }

    /// Returns the message for a top-level array index, if any.
    pub fn index(&self, idx: usize) -> Option<&str> {
        self.get(&FieldKey::Index(idx))
    }

    /// Returns the message filed under the root sentinel, if any.
    pub fn root(&self) -> Option<&str> {
        self.get(&FieldKey::Root)
    }

    /// Inserts a message under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Renders the map as a JSON object suitable for an error body.
    ///
    /// Keys are stringified: field names as-is, indices in decimal, the
    /// root sentinel as `"(root)"`. If stringification makes two keys
    /// coincide (a field literally named `"0"` next to index `0`), the
    /// later entry wins there as well.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flatline::{extract_errors, FieldPath, Issue, Issues};
    /// use serde_json::json;
    ///
    /// let issues = Issues::single(Issue::new(FieldPath::from_field("email"), "Invalid email"));
    /// assert_eq!(extract_errors(&issues).to_json(), json!({"email": "Invalid email"}));
    /// ```
    pub fn to_json(&self) -> Value {
        let mut obj = serde_json::Map::new();
        for (key, message) in self.iter() {
            obj.insert(key.to_string(), Value::String(message.to_string()));
        }
        Value::Object(obj)
    }
}

impl IntoIterator for ErrorMap {
    type Item = (FieldKey, String);
    type IntoIter = indexmap::map::IntoIter<FieldKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a FieldKey, &'a String);
    type IntoIter = indexmap::map::Iter<'a, FieldKey, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Flattens an ordered sequence of issues into an [`ErrorMap`].
///
/// Issues are visited in order; each files its message under the key
/// derived from the first segment of its path (the [`FieldKey::Root`]
/// sentinel when the path is empty). A later issue for the same key
/// overwrites an earlier one, so the map never holds more entries than
/// there are distinct first segments. The transform is pure and cannot
/// fail, whatever the input shape.
///
/// # Example
///
/// ```rust
/// use flatline::{extract_errors, FieldPath, Issue};
///
/// let issues = vec![
///     Issue::new(FieldPath::from_field("name"), "Required"),
///     Issue::new(FieldPath::from_field("name"), "Must be a string"),
/// ];
///
/// let errors = extract_errors(&issues);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.field("name"), Some("Must be a string"));
/// ```
pub fn extract_errors<I>(issues: I) -> ErrorMap
where
    I: IntoIterator,
    I::Item: IssueLike,
{
    let mut map = ErrorMap::new();
    for issue in issues {
        map.insert(FieldKey::from_path(issue.path()), issue.message());
    }
    map
}

/// Flattens issues that may be absent altogether.
///
/// `None` yields an empty map; `Some(issues)` behaves exactly like
/// [`extract_errors`].
///
/// # Example
///
/// ```rust
/// use flatline::{extract_optional, Issues};
///
/// let errors = extract_optional(None::<&Issues>);
/// assert!(errors.is_empty());
/// ```
pub fn extract_optional<I>(issues: Option<I>) -> ErrorMap
where
    I: IntoIterator,
    I::Item: IssueLike,
{
    issues.map(extract_errors).unwrap_or_default()
}

/// Flattens the failure side of a validation result.
///
/// A success yields an empty map; the caller does not have to branch
/// before asking for field errors.
///
/// # Example
///
/// ```rust
/// use flatline::{extract_failure, FieldPath, Issue, Issues, ValidationResult};
/// use stillwater::Validation;
///
/// let result: ValidationResult<i64> = Validation::Failure(Issues::single(
///     Issue::new(FieldPath::from_field("price"), "Price must be greater than 0"),
/// ));
///
/// let errors = extract_failure(&result);
/// assert_eq!(errors.field("price"), Some("Price must be greater than 0"));
///
/// let ok: ValidationResult<i64> = Validation::Success(42);
/// assert!(extract_failure(&ok).is_empty());
/// ```
pub fn extract_failure<T>(result: &Validation<T, Issues>) -> ErrorMap {
    match result {
        Validation::Success(_) => ErrorMap::new(),
        Validation::Failure(issues) => extract_errors(issues),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(path: FieldPath, message: &str) -> Issue {
        Issue::new(path, message)
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        let errors = extract_errors(Vec::<Issue>::new());
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_absent_input_yields_empty_map() {
        let errors = extract_optional(None::<&Issues>);
        assert_eq!(errors, ErrorMap::new());
    }

    #[test]
    fn test_single_issue() {
        let issues = vec![issue(
            FieldPath::from_field("price"),
            "Price must be greater than 0",
        )];

        let errors = extract_errors(&issues);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.field("price"), Some("Price must be greater than 0"));
    }

    #[test]
    fn test_last_issue_wins_per_key() {
        let issues = vec![
            issue(FieldPath::from_field("name"), "Required"),
            issue(FieldPath::from_field("name"), "Must be a string"),
        ];

        let errors = extract_errors(&issues);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.field("name"), Some("Must be a string"));
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let issues = vec![
            issue(FieldPath::from_field("email"), "Invalid email"),
            issue(FieldPath::from_field("phone"), "Invalid phone"),
        ];

        let errors = extract_errors(&issues);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.field("email"), Some("Invalid email"));
        assert_eq!(errors.field("phone"), Some("Invalid phone"));
    }

    #[test]
    fn test_nested_paths_key_on_first_segment() {
        let issues = vec![issue(
            FieldPath::from_field("items").push_index(2).push_field("total"),
            "Total must be positive",
        )];

        let errors = extract_errors(&issues);
        assert_eq!(errors.field("items"), Some("Total must be positive"));
    }

    #[test]
    fn test_root_issue_uses_sentinel() {
        let issues = vec![issue(FieldPath::root(), "expected an object")];

        let errors = extract_errors(&issues);
        assert_eq!(errors.root(), Some("expected an object"));
        assert_eq!(errors.get(&FieldKey::Root), Some("expected an object"));
    }

    #[test]
    fn test_index_and_field_keys_do_not_collide() {
        let issues = vec![
            issue(FieldPath::from_index(0), "bad element"),
            issue(FieldPath::from_field("0"), "bad field"),
        ];

        let errors = extract_errors(&issues);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.index(0), Some("bad element"));
        assert_eq!(errors.field("0"), Some("bad field"));
    }

    #[test]
    fn test_size_bounded_by_distinct_first_segments() {
        let issues = vec![
            issue(FieldPath::from_field("a"), "1"),
            issue(FieldPath::from_field("a").push_field("x"), "2"),
            issue(FieldPath::from_field("b"), "3"),
            issue(FieldPath::from_index(1), "4"),
            issue(FieldPath::root(), "5"),
        ];

        let errors = extract_errors(&issues);
        assert_eq!(errors.len(), 4); // a, b, [1], root
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let issues = vec![
            issue(FieldPath::from_field("email"), "Invalid email"),
            issue(FieldPath::from_field("phone"), "Invalid phone"),
        ];

        assert_eq!(extract_errors(&issues), extract_errors(&issues));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let issues = vec![
            issue(FieldPath::from_field("b"), "2"),
            issue(FieldPath::from_field("a"), "1"),
        ];

        let keys: Vec<_> = extract_errors(&issues)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![FieldKey::field("b"), FieldKey::field("a")]);
    }

    #[test]
    fn test_field_key_display() {
        assert_eq!(FieldKey::Root.to_string(), "(root)");
        assert_eq!(FieldKey::field("email").to_string(), "email");
        assert_eq!(FieldKey::index(3).to_string(), "3");
    }

    #[test]
    fn test_to_json() {
        let issues = vec![
            issue(FieldPath::from_field("email"), "Invalid email"),
            issue(FieldPath::from_index(0), "bad element"),
            issue(FieldPath::root(), "expected an object"),
        ];

        let json = extract_errors(&issues).to_json();
        assert_eq!(json["email"], "Invalid email");
        assert_eq!(json["0"], "bad element");
        assert_eq!(json["(root)"], "expected an object");
    }

    #[test]
    fn test_collaborator_types_via_issue_like() {
        struct CheckerError {
            at: FieldPath,
            detail: String,
        }

        impl IssueLike for CheckerError {
            fn path(&self) -> &FieldPath {
                &self.at
            }

            fn message(&self) -> &str {
                &self.detail
            }
        }

        let reported = vec![CheckerError {
            at: FieldPath::from_field("quantity"),
            detail: "must be a positive integer".to_string(),
        }];

        let errors = extract_errors(&reported);
        assert_eq!(errors.field("quantity"), Some("must be a positive integer"));
    }

    #[test]
    fn test_extract_failure_variants() {
        let failing: Validation<i64, Issues> = Validation::Failure(Issues::single(issue(
            FieldPath::from_field("price"),
            "Price must be greater than 0",
        )));
        assert_eq!(
            extract_failure(&failing).field("price"),
            Some("Price must be greater than 0")
        );

        let passing: Validation<i64, Issues> = Validation::Success(10);
        assert!(extract_failure(&passing).is_empty());
    }
}
