//! SPDX license expression engine.
//!
//! - [`scan`]: text → tokens, normalizing ids against the catalog.
//! - [`parse`]: tokens → immutable [`Node`] tree.
//! - [`expand`]: tree → disjunctive normal form.
//! - [`compare`]: version ordering within a license family.
//! - [`compat`]: pairwise leaf compatibility.
//! - [`satisfy`]: whether one expression satisfies another.

pub mod compare;
pub mod compat;
pub mod expand;
pub mod node;
pub mod parse;
pub mod satisfy;
pub mod scan;

pub use compare::Comparator;
pub use node::{Conjunction, Leaf, License, LicenseRef, Node};
pub use scan::Scanner;

use crate::catalog::Catalog;
use crate::error::ExpressionError;

/// Scan and parse `source` into an expression tree.
pub fn parse(catalog: &Catalog, source: &str) -> Result<Node, ExpressionError> {
    let tokens = Scanner::new(catalog).scan(source)?;
    let node = parse::parse_tokens(&tokens)?;
    tracing::debug!(source, tree = %node, "parsed license expression");
    Ok(node)
}
