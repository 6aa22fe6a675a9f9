//! `spdx-checkr`: parse SPDX license expressions and reason about them.
//!
//! # Flow
//! 1. Obtain a [`Catalog`] (built-in via [`Catalog::builtin`], or loaded
//!    from a regenerated JSON file).
//! 2. Scan and parse text into a [`Node`] tree ([`expression::parse`]).
//! 3. Expand the tree to DNF ([`expression::expand`]) to extract licenses
//!    or to decide satisfaction ([`expression::satisfy`]).
//!
//! ```
//! use spdx_checkr::{satisfies, Catalog};
//!
//! let catalog = Catalog::builtin();
//! assert!(satisfies(catalog, "Apache-2.0", "MIT OR Apache-2.0+").unwrap());
//! ```

pub mod catalog;
pub mod error;
pub mod expression;
pub mod models;

pub use catalog::{Catalog, CatalogData, IdKind, LicenseRange};
pub use error::{CatalogError, ExpressionError, ScanError, SyntaxError};
pub use expression::{parse, Node};
pub use models::ValidationReport;

use expression::expand::distinct_leaves;
use expression::satisfy;
use expression::Comparator;

/// Check every id against the active, deprecated and exception lists.
///
/// Matching is case-insensitive; unknown ids are reported in input order.
pub fn validate_licenses<S: AsRef<str>>(catalog: &Catalog, ids: &[S]) -> ValidationReport {
    let invalid: Vec<String> = ids
        .iter()
        .map(AsRef::as_ref)
        .filter(|id| !catalog.contains(id))
        .map(str::to_string)
        .collect();

    ValidationReport {
        all_valid: invalid.is_empty(),
        invalid,
    }
}

/// Distinct licenses mentioned by `expression`, in canonical form.
pub fn extract_licenses(catalog: &Catalog, expression: &str) -> Result<Vec<String>, ExpressionError> {
    let node = parse(catalog, expression)?;
    Ok(distinct_leaves(&node))
}

/// Whether license expression `a` satisfies license expression `b`.
pub fn satisfies(catalog: &Catalog, a: &str, b: &str) -> Result<bool, ExpressionError> {
    let a_node = parse(catalog, a)?;
    let b_node = parse(catalog, b)?;
    let result = satisfy::satisfies(&Comparator::new(catalog), &a_node, &b_node);
    tracing::debug!(a, b, result, "checked satisfaction");
    Ok(result)
}
