//! Validation issue types.
//!
//! This module provides [`Issue`] for single validation failures and
//! [`Issues`] for non-empty accumulated collections of them.

mod issue;

pub use issue::{Issue, Issues};
