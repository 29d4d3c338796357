//! Interoperability with collaborators that report failures as JSON.
//!
//! Validators on the other side of a process or language boundary tend to
//! hand over their findings as a JSON array of issue objects rather than
//! as native types. This module decodes the two common shapes into
//! [`Issue`](crate::Issue) values the extractor understands.

mod json_issues;

pub use json_issues::{issues_from_json, issues_from_pointer_json, InteropError};
