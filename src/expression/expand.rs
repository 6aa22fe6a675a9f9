//! Disjunctive-normal-form expansion of expression trees.
//!
//! A tree is rewritten into an OR of AND-clauses, each clause a flat list of
//! leaves. Clause and leaf order follow a left-to-right walk of the tree.

use std::collections::HashSet;

use super::node::{Conjunction, Leaf, Node};

/// Largest DNF the parser accepts. Each ANDed `(A OR B)` group doubles the
/// clause count, so this bounds expansion and satisfaction work.
pub const MAX_CLAUSES: usize = 1024;

/// One AND-group of leaves.
pub type Clause<'a> = Vec<Leaf<'a>>;

/// Number of clauses [`expand`] would produce, without building them.
pub fn clause_count(node: &Node) -> usize {
    match node {
        Node::Expression {
            left,
            conjunction: Conjunction::Or,
            right,
        } => clause_count(left).saturating_add(clause_count(right)),
        Node::Expression {
            left,
            conjunction: Conjunction::And,
            right,
        } => clause_count(left).saturating_mul(clause_count(right)),
        Node::License(_) | Node::LicenseRef(_) => 1,
    }
}

/// Expand `node` into its DNF clauses.
///
/// `A AND (B OR C)` becomes `[[A, B], [A, C]]`.
pub fn expand(node: &Node) -> Vec<Clause<'_>> {
    match node {
        Node::License(license) => vec![vec![Leaf::License(license)]],
        Node::LicenseRef(license_ref) => vec![vec![Leaf::LicenseRef(license_ref)]],
        Node::Expression {
            left,
            conjunction: Conjunction::Or,
            right,
        } => {
            let mut clauses = expand(left);
            clauses.extend(expand(right));
            clauses
        }
        Node::Expression {
            left,
            conjunction: Conjunction::And,
            right,
        } => {
            let left = expand(left);
            let right = expand(right);
            // Pure AND chains give one clause per side, so the product is a
            // single concatenated clause.
            let mut clauses = Vec::with_capacity(left.len() * right.len());
            for l in &left {
                for r in &right {
                    let mut clause = Vec::with_capacity(l.len() + r.len());
                    clause.extend_from_slice(l);
                    clause.extend_from_slice(r);
                    clauses.push(clause);
                }
            }
            clauses
        }
    }
}

/// Canonical text of every leaf, clause by clause.
pub fn clause_strings(clauses: &[Clause<'_>]) -> Vec<Vec<String>> {
    clauses
        .iter()
        .map(|clause| clause.iter().map(ToString::to_string).collect())
        .collect()
}

/// Distinct leaves of `node` in first-seen order, compared by canonical text.
pub fn distinct_leaves(node: &Node) -> Vec<String> {
    let mut seen = HashSet::new();
    expand(node)
        .into_iter()
        .flatten()
        .map(|leaf| leaf.to_string())
        .filter(|leaf| seen.insert(leaf.clone()))
        .collect()
}
