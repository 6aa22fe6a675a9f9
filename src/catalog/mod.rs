//! Read-only catalog of SPDX license identifiers.
//!
//! - [`data`]: built-in snapshot of the upstream license list.
//! - [`Catalog`]: the lookup handle passed to the scanner and comparator.
//!
//! A catalog is built once and never mutated afterwards; every lookup takes
//! `&self`, so one handle can be shared freely between threads.

mod data;

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::from_data(CatalogData::builtin()));

/// Which list of the catalog an identifier was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Active,
    Deprecated,
    Exception,
}

/// Position of a license id inside the family/version ranking table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LicenseRange {
    /// Index of the license family (e.g. all GPL versions).
    pub family: usize,
    /// Version step inside the family, oldest first.
    pub step: usize,
    /// Position of the id among the synonyms of its step.
    pub position: usize,
}

/// Raw catalog tables, as regenerated offline from the license list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub active: Vec<String>,
    #[serde(default)]
    pub deprecated: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
    /// Families → version steps → synonymous ids.
    #[serde(default)]
    pub ranges: Vec<Vec<Vec<String>>>,
}

impl CatalogData {
    /// Tables compiled into the crate.
    pub fn builtin() -> Self {
        let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        CatalogData {
            active: owned(data::ACTIVE),
            deprecated: owned(data::DEPRECATED),
            exceptions: owned(data::EXCEPTIONS),
            ranges: data::RANGES
                .iter()
                .map(|family| family.iter().map(|step| owned(step)).collect())
                .collect(),
        }
    }
}

/// Immutable lookup handle over [`CatalogData`].
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
    /// Lower-cased active and exception ids → canonical spelling.
    current: HashMap<String, (String, IdKind)>,
    /// Lower-cased deprecated ids → canonical spelling.
    deprecated: HashMap<String, String>,
    ranges: HashMap<String, LicenseRange>,
}

impl Catalog {
    /// The process-wide built-in catalog, initialised on first use.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_data(data: CatalogData) -> Self {
        let mut current = HashMap::new();
        for id in &data.active {
            current.insert(id.to_lowercase(), (id.clone(), IdKind::Active));
        }
        for id in &data.exceptions {
            current.insert(id.to_lowercase(), (id.clone(), IdKind::Exception));
        }

        let deprecated = data
            .deprecated
            .iter()
            .map(|id| (id.to_lowercase(), id.clone()))
            .collect();

        let mut ranges = HashMap::new();
        for (family, steps) in data.ranges.iter().enumerate() {
            for (step, ids) in steps.iter().enumerate() {
                for (position, id) in ids.iter().enumerate() {
                    ranges.insert(
                        id.to_lowercase(),
                        LicenseRange {
                            family,
                            step,
                            position,
                        },
                    );
                }
            }
        }

        Catalog {
            data,
            current,
            deprecated,
            ranges,
        }
    }

    /// Parse a catalog from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::from_data(data))
    }

    /// Load a catalog regenerated offline and stored as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            active = catalog.data.active.len(),
            "loaded license catalog"
        );
        Ok(catalog)
    }

    /// A copy of this catalog with extra active licenses and exceptions.
    pub fn with_additional(&self, licenses: &[String], exceptions: &[String]) -> Self {
        let mut data = self.data.clone();
        data.active.extend(licenses.iter().cloned());
        data.exceptions.extend(exceptions.iter().cloned());
        Self::from_data(data)
    }

    pub fn active_licenses(&self) -> &[String] {
        &self.data.active
    }

    pub fn deprecated_licenses(&self) -> &[String] {
        &self.data.deprecated
    }

    pub fn exception_licenses(&self) -> &[String] {
        &self.data.exceptions
    }

    /// Case-insensitive lookup among active licenses and exceptions.
    ///
    /// Returns the canonical spelling of the id.
    pub fn lookup(&self, id: &str) -> Option<(&str, IdKind)> {
        self.current
            .get(&id.to_lowercase())
            .map(|(canonical, kind)| (canonical.as_str(), *kind))
    }

    /// Case-insensitive lookup among deprecated licenses.
    pub fn lookup_deprecated(&self, id: &str) -> Option<&str> {
        self.deprecated.get(&id.to_lowercase()).map(String::as_str)
    }

    /// Whether `id` appears in any of the three lists.
    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some() || self.lookup_deprecated(id).is_some()
    }

    /// Ranking of `id` inside its family, if it has one.
    pub fn license_range(&self, id: &str) -> Option<LicenseRange> {
        self.ranges.get(&id.to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.lookup("mit"), Some(("MIT", IdKind::Active)));
        assert_eq!(
            catalog.lookup("apache-2.0"),
            Some(("Apache-2.0", IdKind::Active))
        );
        assert_eq!(
            catalog.lookup("classpath-exception-2.0"),
            Some(("Classpath-exception-2.0", IdKind::Exception))
        );
    }

    #[test]
    fn test_deprecated_kept_apart() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.lookup("GPL-2.0"), None);
        assert_eq!(catalog.lookup_deprecated("gpl-2.0"), Some("GPL-2.0"));
        assert!(catalog.contains("GPL-2.0"));
    }

    #[test]
    fn test_license_range() {
        let catalog = Catalog::builtin();
        let gpl2 = catalog.license_range("GPL-2.0").unwrap();
        let gpl2_only = catalog.license_range("GPL-2.0-only").unwrap();
        let gpl3 = catalog.license_range("GPL-3.0").unwrap();
        assert_eq!(gpl2.family, gpl3.family);
        assert_eq!(gpl2.step, gpl2_only.step);
        assert_eq!(gpl2_only.position, 1);
        assert!(gpl3.step > gpl2.step);
        assert!(catalog.license_range("MIT").is_none());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "active": ["Foo-1.0", "Foo-2.0"],
                "exceptions": ["Foo-exception"],
                "ranges": [[["Foo-1.0"], ["Foo-2.0"]]]
            }}"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.active_licenses().len(), 2);
        assert!(catalog.deprecated_licenses().is_empty());
        assert_eq!(catalog.lookup("foo-2.0"), Some(("Foo-2.0", IdKind::Active)));
        assert_eq!(catalog.license_range("Foo-2.0").unwrap().step, 1);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = Catalog::from_json_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_with_additional() {
        let catalog = Catalog::builtin()
            .with_additional(&["Acme-Internal-1.0".to_string()], &["Acme-exception".to_string()]);
        assert_eq!(
            catalog.lookup("acme-internal-1.0"),
            Some(("Acme-Internal-1.0", IdKind::Active))
        );
        assert_eq!(
            catalog.lookup("Acme-exception"),
            Some(("Acme-exception", IdKind::Exception))
        );
        assert!(Catalog::builtin().lookup("Acme-Internal-1.0").is_none());
    }
}
