//! Top-level "does A satisfy B" check.

use super::compare::Comparator;
use super::compat::{leaves_compatible, licenses_compatible};
use super::expand::{expand, Clause};
use super::node::Node;

/// Whether expression `a` satisfies expression `b`.
///
/// Both sides are expanded to DNF. `a` satisfies `b` when some clause of
/// `a` covers some clause of `b`: every leaf of the `b` clause has a
/// compatible leaf in the `a` clause.
pub fn satisfies(cmp: &Comparator<'_>, a: &Node, b: &Node) -> bool {
    if let (Node::License(a), Node::License(b)) = (a, b) {
        return licenses_compatible(cmp, a, b);
    }

    let a_clauses = expand(a);
    let b_clauses = expand(b);
    tracing::trace!(
        a_clauses = a_clauses.len(),
        b_clauses = b_clauses.len(),
        "comparing expanded expressions"
    );

    a_clauses.iter().any(|a_clause| {
        b_clauses
            .iter()
            .any(|b_clause| covers(cmp, a_clause, b_clause))
    })
}

fn covers(cmp: &Comparator<'_>, a_clause: &Clause<'_>, b_clause: &Clause<'_>) -> bool {
    b_clause.iter().all(|required| {
        a_clause
            .iter()
            .any(|offered| leaves_compatible(cmp, offered, required))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::expression::node::{License, LicenseRef};

    fn lic(id: &str) -> Node {
        License::new(id).into()
    }

    fn check(a: &Node, b: &Node) -> bool {
        satisfies(&Comparator::new(Catalog::builtin()), a, b)
    }

    #[test]
    fn test_single_licenses() {
        assert!(check(&lic("MIT"), &lic("MIT")));
        assert!(!check(&lic("MIT"), &lic("ISC")));
        assert!(check(&lic("Apache-2.0"), &License::new("Apache-2.0").with_plus().into()));
    }

    #[test]
    fn test_single_against_choice() {
        let choice = Node::or(lic("MIT"), lic("Apache-2.0"));
        assert!(check(&lic("MIT"), &choice));
        assert!(check(&lic("Apache-2.0"), &choice));
        assert!(!check(&lic("ISC"), &choice));
    }

    #[test]
    fn test_single_against_conjunction() {
        let both = Node::and(lic("MIT"), lic("Apache-2.0"));
        assert!(!check(&lic("MIT"), &both));
        assert!(check(&both, &both));
        assert!(check(&Node::and(lic("Apache-2.0"), lic("MIT")), &both));
    }

    #[test]
    fn test_extra_licenses_still_cover() {
        let offered = Node::and(lic("MIT"), Node::and(lic("ISC"), lic("Zlib")));
        assert!(check(&offered, &Node::and(lic("ISC"), lic("MIT"))));
    }

    #[test]
    fn test_choice_on_both_sides() {
        let offered = Node::or(lic("GPL-3.0"), Node::and(lic("MIT"), lic("ISC")));
        let required = Node::or(lic("Apache-2.0"), lic("MIT"));
        assert!(check(&offered, &required));
        assert!(!check(&Node::or(lic("GPL-3.0"), lic("ISC")), &required));
    }

    #[test]
    fn test_nested_plus_range() {
        let required = Node::and(
            License::new("GPL-2.0").with_plus().into(),
            Node::or(lic("MIT"), lic("BSD-3-Clause")),
        );
        let offered = Node::and(lic("BSD-3-Clause"), lic("GPL-3.0-only"));
        assert!(check(&offered, &required));
        assert!(!check(&Node::and(lic("BSD-3-Clause"), lic("GPL-1.0")), &required));
    }

    #[test]
    fn test_license_refs() {
        let custom: Node = LicenseRef {
            license_ref: "Custom".to_string(),
            document_ref: None,
        }
        .into();
        assert!(check(&custom, &custom));
        assert!(check(&custom, &Node::or(lic("MIT"), custom.clone())));
        assert!(!check(&lic("MIT"), &custom));
    }
}
