//! Version ordering of licenses within one family.

use std::cmp::Ordering;

use super::scan::{strip_suffix_ignore_case, OR_LATER};
use crate::catalog::{Catalog, LicenseRange};

/// Orders two license ids of the same family by version step.
///
/// Ids missing from the ranking table, or from different families, are
/// incomparable: every predicate returns `false` for them.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'c> {
    catalog: &'c Catalog,
}

impl<'c> Comparator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Comparator { catalog }
    }

    /// Ranking of `id`, looked up with any `-or-later` suffix removed.
    fn range(&self, id: &str) -> Option<LicenseRange> {
        let key = strip_suffix_ignore_case(id, OR_LATER).unwrap_or(id);
        self.catalog.license_range(key)
    }

    /// Version ordering of `a` relative to `b`, if they are comparable.
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        let a = self.range(a)?;
        let b = self.range(b)?;
        (a.family == b.family).then(|| a.step.cmp(&b.step))
    }

    pub fn gt(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Some(Ordering::Greater)
    }

    pub fn eq(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Some(Ordering::Equal)
    }

    pub fn lt(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Some(Ordering::Less)
    }

    /// Whether both ids belong to one ranked family.
    pub fn same_family(&self, a: &str, b: &str) -> bool {
        self.compare(a, b).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparator() -> Comparator<'static> {
        Comparator::new(Catalog::builtin())
    }

    #[test]
    fn test_versions_within_family() {
        let cmp = comparator();
        assert!(cmp.gt("GPL-3.0", "GPL-2.0"));
        assert!(cmp.lt("GPL-2.0", "GPL-3.0"));
        assert!(cmp.eq("GPL-3.0", "GPL-3.0"));
        assert!(!cmp.gt("GPL-2.0", "GPL-3.0"));
    }

    #[test]
    fn test_only_synonym_compares_equal() {
        let cmp = comparator();
        assert!(cmp.eq("GPL-2.0", "GPL-2.0-only"));
        assert!(cmp.gt("LGPL-3.0-only", "LGPL-2.1"));
    }

    #[test]
    fn test_or_later_resolves_to_base() {
        let cmp = comparator();
        assert!(cmp.eq("GPL-2.0-or-later", "GPL-2.0"));
        assert!(cmp.gt("GPL-3.0-only", "GPL-2.0-or-later"));
    }

    #[test]
    fn test_different_families_incomparable() {
        let cmp = comparator();
        assert!(!cmp.gt("MIT", "ISC"));
        assert!(!cmp.lt("MIT", "ISC"));
        assert!(!cmp.eq("MIT", "ISC"));
        assert!(!cmp.gt("GPL-3.0", "LGPL-2.1"));
        assert!(!cmp.lt("GPL-3.0", "LGPL-2.1"));
        assert!(!cmp.same_family("Apache-2.0", "MPL-2.0"));
    }

    #[test]
    fn test_unranked_id() {
        let cmp = comparator();
        assert_eq!(cmp.compare("MIT", "MIT"), None);
        assert!(!cmp.eq("MIT", "MIT"));
    }
}
