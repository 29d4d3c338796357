//! Bulk flattening of many validation results.
//!
//! When a collaborator validates a batch of records (an import file, a
//! list of API payloads), each record's failure flattens independently of
//! the others, so the work fans out across a rayon thread pool. Output
//! order matches input order.

use rayon::prelude::*;
use stillwater::Validation;

use crate::error::Issues;
use crate::extract::{extract_failure, ErrorMap};

/// Flattens each result in a slice, in parallel.
///
/// Successful results yield empty maps, so the output always has the same
/// length as the input and positions line up.
///
/// # Example
///
/// ```rust
/// use flatline::{extract_all, FieldPath, Issue, Issues, ValidationResult};
/// use stillwater::Validation;
///
/// let results: Vec<ValidationResult<i64>> = vec![
///     Validation::Success(1),
///     Validation::Failure(Issues::single(
///         Issue::new(FieldPath::from_field("price"), "Price must be greater than 0"),
///     )),
/// ];
///
/// let maps = extract_all(&results);
/// assert!(maps[0].is_empty());
/// assert_eq!(maps[1].field("price"), Some("Price must be greater than 0"));
/// ```
pub fn extract_all<T: Sync>(results: &[Validation<T, Issues>]) -> Vec<ErrorMap> {
    results.par_iter().map(extract_failure).collect()
}
