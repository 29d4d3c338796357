//! # Flatline
//!
//! A library that flattens accumulated validation errors into
//! field-keyed maps, turning precise nested failure reports into the
//! shallow shape form UIs and API error bodies want.
//!
//! ## Overview
//!
//! Validators that accumulate every failure hand back an ordered list of
//! issues, each locating the failing value with a path like
//! `users[0].email`. Consumers rendering a form usually need exactly one
//! message per top-level field instead. Flatline performs that reshaping:
//! each issue files under the first segment of its path, later issues for
//! the same field overwrite earlier ones, and failures of the root value
//! land under a reserved sentinel key. The transform is pure and cannot
//! fail, whatever the input looks like.
//!
//! Flatline defines no schemas and runs no validation of its own. Any
//! collaborator whose errors expose a path and a message can feed it,
//! either through the [`IssueLike`] contract, by building [`Issue`]
//! values, or by handing over JSON-reported issues via [`interop`].
//!
//! ## Core Types
//!
//! - [`FieldPath`]: a path to a value in a nested structure (e.g., `users[0].email`)
//! - [`Issue`]: a single validation failure with context (path, message, expected/got values)
//! - [`Issues`]: a non-empty accumulated collection of failures
//! - [`ErrorMap`]: the flat field-to-message mapping produced by extraction
//!
//! ## Example
//!
//! ```rust
//! use flatline::{extract_errors, FieldPath, Issue};
//!
//! let issues = vec![
//!     Issue::new(FieldPath::from_field("name"), "Required"),
//!     Issue::new(FieldPath::from_field("name"), "Must be a string"),
//!     Issue::new(FieldPath::from_field("email"), "Invalid email"),
//! ];
//!
//! let errors = extract_errors(&issues);
//! assert_eq!(errors.field("name"), Some("Must be a string"));
//! assert_eq!(errors.field("email"), Some("Invalid email"));
//! ```

pub mod batch;
pub mod error;
pub mod extract;
pub mod interop;
pub mod path;

pub use batch::extract_all;
pub use error::{Issue, Issues};
pub use extract::{
    extract_errors, extract_failure, extract_optional, ErrorMap, FieldKey, IssueLike,
};
pub use interop::{issues_from_json, issues_from_pointer_json, InteropError};
pub use path::{FieldPath, PathParseError, PathSegment};

/// Type alias for validation results whose failure side is [`Issues`].
pub type ValidationResult<T> = stillwater::Validation<T, Issues>;
