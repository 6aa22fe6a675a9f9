//! Immutable expression tree produced by the parser.

use std::fmt;

use serde::Serialize;

use super::scan::{strip_suffix_ignore_case, OR_LATER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    And,
    Or,
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conjunction::And => write!(f, "AND"),
            Conjunction::Or => write!(f, "OR"),
        }
    }
}

/// A catalog license, optionally open-ended and with an exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub id: String,
    pub has_plus: bool,
    pub exception: Option<String>,
}

impl License {
    pub fn new(id: impl Into<String>) -> Self {
        License {
            id: id.into(),
            has_plus: false,
            exception: None,
        }
    }

    pub fn with_plus(mut self) -> Self {
        self.has_plus = true;
        self
    }

    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    /// "This version or any later one": either the `+` flag or an id that is
    /// itself an `-or-later` form.
    pub fn is_open_ended(&self) -> bool {
        self.has_plus || strip_suffix_ignore_case(&self.id, OR_LATER).is_some()
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if self.has_plus {
            write!(f, "+")?;
        }
        if let Some(exception) = &self.exception {
            write!(f, " WITH {exception}")?;
        }
        Ok(())
    }
}

/// A user-defined `LicenseRef-`, optionally scoped to another document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRef {
    pub license_ref: String,
    pub document_ref: Option<String>,
}

impl fmt::Display for LicenseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(document) = &self.document_ref {
            write!(f, "DocumentRef-{document}:")?;
        }
        write!(f, "LicenseRef-{}", self.license_ref)
    }
}

/// A node of the expression tree.
///
/// Variant fields are only reachable by matching on the variant; the
/// `as_*` accessors return `None` on any other shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Expression {
        left: Box<Node>,
        conjunction: Conjunction,
        right: Box<Node>,
    },
    License(License),
    LicenseRef(LicenseRef),
}

impl Node {
    pub fn and(left: Node, right: Node) -> Self {
        Node::Expression {
            left: Box::new(left),
            conjunction: Conjunction::And,
            right: Box::new(right),
        }
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::Expression {
            left: Box::new(left),
            conjunction: Conjunction::Or,
            right: Box::new(right),
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Node::Expression { .. })
    }

    pub fn conjunction(&self) -> Option<Conjunction> {
        match self {
            Node::Expression { conjunction, .. } => Some(*conjunction),
            _ => None,
        }
    }

    pub fn as_license(&self) -> Option<&License> {
        match self {
            Node::License(license) => Some(license),
            _ => None,
        }
    }

    pub fn as_license_ref(&self) -> Option<&LicenseRef> {
        match self {
            Node::LicenseRef(license_ref) => Some(license_ref),
            _ => None,
        }
    }

    /// Borrowed leaf view; `None` for inner expression nodes.
    pub fn leaf(&self) -> Option<Leaf<'_>> {
        match self {
            Node::Expression { .. } => None,
            Node::License(license) => Some(Leaf::License(license)),
            Node::LicenseRef(license_ref) => Some(Leaf::LicenseRef(license_ref)),
        }
    }
}

impl From<License> for Node {
    fn from(license: License) -> Self {
        Node::License(license)
    }
}

impl From<LicenseRef> for Node {
    fn from(license_ref: LicenseRef) -> Self {
        Node::LicenseRef(license_ref)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Expression {
                left,
                conjunction,
                right,
            } => write!(f, "({left} {conjunction} {right})"),
            Node::License(license) => write!(f, "{license}"),
            Node::LicenseRef(license_ref) => write!(f, "{license_ref}"),
        }
    }
}

/// A leaf of the tree: the unit DNF clauses are made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf<'a> {
    License(&'a License),
    LicenseRef(&'a LicenseRef),
}

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::License(license) => write!(f, "{license}"),
            Leaf::LicenseRef(license_ref) => write!(f, "{license_ref}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_reconstruction() {
        assert_eq!(License::new("MIT").to_string(), "MIT");
        assert_eq!(License::new("Apache-2.0").with_plus().to_string(), "Apache-2.0+");
        assert_eq!(
            License::new("GPL-2.0")
                .with_plus()
                .with_exception("Classpath-exception-2.0")
                .to_string(),
            "GPL-2.0+ WITH Classpath-exception-2.0"
        );
    }

    #[test]
    fn test_license_ref_reconstruction() {
        let local = LicenseRef {
            license_ref: "Custom".to_string(),
            document_ref: None,
        };
        let external = LicenseRef {
            license_ref: "Custom".to_string(),
            document_ref: Some("other-doc".to_string()),
        };
        assert_eq!(local.to_string(), "LicenseRef-Custom");
        assert_eq!(external.to_string(), "DocumentRef-other-doc:LicenseRef-Custom");
    }

    #[test]
    fn test_expression_debug_form() {
        let node = Node::or(
            Node::and(License::new("MIT").into(), License::new("ISC").into()),
            License::new("GPL-3.0").into(),
        );
        assert_eq!(node.to_string(), "((MIT AND ISC) OR GPL-3.0)");
    }

    #[test]
    fn test_variant_accessors() {
        let leaf: Node = License::new("MIT").into();
        assert!(leaf.as_license().is_some());
        assert!(leaf.as_license_ref().is_none());
        assert!(leaf.conjunction().is_none());

        let tree = Node::and(leaf.clone(), leaf);
        assert!(tree.is_expression());
        assert!(tree.as_license().is_none());
        assert!(tree.leaf().is_none());
        assert_eq!(tree.conjunction(), Some(Conjunction::And));
    }

    #[test]
    fn test_open_ended() {
        assert!(License::new("MIT").with_plus().is_open_ended());
        assert!(License::new("GPL-2.0-or-later").is_open_ended());
        assert!(!License::new("GPL-2.0-only").is_open_ended());
    }
}
