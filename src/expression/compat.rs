//! Pairwise compatibility of expression leaves.

use super::compare::Comparator;
use super::node::{Leaf, License, LicenseRef};

/// Whether leaf `a` can stand in for leaf `b`.
pub fn leaves_compatible(cmp: &Comparator<'_>, a: &Leaf<'_>, b: &Leaf<'_>) -> bool {
    match (a, b) {
        (Leaf::License(a), Leaf::License(b)) => licenses_compatible(cmp, a, b),
        (Leaf::LicenseRef(a), Leaf::LicenseRef(b)) => refs_compatible(a, b),
        _ => false,
    }
}

/// License-against-license compatibility, honouring open-ended ranges.
pub fn licenses_compatible(cmp: &Comparator<'_>, a: &License, b: &License) -> bool {
    match (a.is_open_ended(), b.is_open_ended()) {
        (false, false) => exactly_equal(a, b),
        (false, true) => at_least(cmp, &a.id, &b.id) && exceptions_compatible(a, b),
        (true, false) => at_least(cmp, &b.id, &a.id) && exceptions_compatible(a, b),
        // Two open-ended ranges of one family always overlap.
        (true, true) => {
            exactly_equal(a, b) || (cmp.same_family(&a.id, &b.id) && exceptions_compatible(a, b))
        }
    }
}

/// Same reference id and, when present, the same document.
pub fn refs_compatible(a: &LicenseRef, b: &LicenseRef) -> bool {
    a.license_ref == b.license_ref && a.document_ref == b.document_ref
}

/// Neither side carries an exception, or both carry the same one.
fn exceptions_compatible(a: &License, b: &License) -> bool {
    a.exception == b.exception
}

fn exactly_equal(a: &License, b: &License) -> bool {
    a.to_string().eq_ignore_ascii_case(&b.to_string())
}

fn at_least(cmp: &Comparator<'_>, id: &str, floor: &str) -> bool {
    cmp.gt(id, floor) || cmp.eq(id, floor)
}
