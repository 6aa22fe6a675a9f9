//! Lexical scanner for SPDX license expressions.
//!
//! Identifiers are normalized against the [`Catalog`] while scanning, so the
//! parser only ever sees canonical ids:
//!
//! 1. exact (case-insensitive) match on an active license or exception
//! 2. `X-only` → `X`
//! 3. `X+` where `X-or-later` is known → `X` with the plus flag, `+` consumed
//! 4. `X-or-later` where `X` is known → `X` followed by a `+` token
//! 5. deprecated ids, last, so a current `+`-eligible id wins

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, IdKind};
use crate::error::ScanError;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]+").expect("identifier pattern is valid"));

const DOCUMENT_REF: &str = "DocumentRef-";
const LICENSE_REF: &str = "LicenseRef-";
const ONLY: &str = "-only";
pub(crate) const OR_LATER: &str = "-or-later";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    With,
    OpenParen,
    CloseParen,
    Colon,
    Plus,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::With => "WITH",
            Operator::OpenParen => "(",
            Operator::CloseParen => ")",
            Operator::Colon => ":",
            Operator::Plus => "+",
        }
    }

    fn is_word(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::With)
    }
}

/// Longest keywords first so `WITH` is never read as a shorter operator.
const OPERATORS: &[Operator] = &[
    Operator::With,
    Operator::And,
    Operator::Or,
    Operator::OpenParen,
    Operator::CloseParen,
    Operator::Colon,
    Operator::Plus,
];

/// Role and value of a scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Operator(Operator),
    /// Id following a `DocumentRef-` prefix.
    DocumentRef(String),
    /// Id following a `LicenseRef-` prefix.
    LicenseRef(String),
    /// Canonical license id; `has_plus` is set when normalization absorbed
    /// a `+` or `-or-later` form.
    License { id: String, has_plus: bool },
    /// Canonical exception id.
    Exception(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the source text.
    pub offset: usize,
}

impl Token {
    fn new(kind: TokenKind, offset: usize) -> Self {
        Token { kind, offset }
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Operator(op) => write!(f, "{}", op.as_str()),
            TokenKind::DocumentRef(id) => write!(f, "{DOCUMENT_REF}{id}"),
            TokenKind::LicenseRef(id) => write!(f, "{LICENSE_REF}{id}"),
            TokenKind::License { id, has_plus } => {
                write!(f, "{id}{}", if *has_plus { "+" } else { "" })
            }
            TokenKind::Exception(id) => write!(f, "{id}"),
        }
    }
}

/// Result of normalizing one raw identifier.
struct Normalized {
    kind: TokenKind,
    /// The `+` following the identifier was folded into `kind`.
    consumed_plus: bool,
    /// A `-or-later` suffix was stripped and must be replaced by `+`.
    emit_plus: bool,
}

impl Normalized {
    fn plain(kind: TokenKind) -> Self {
        Normalized {
            kind,
            consumed_plus: false,
            emit_plus: false,
        }
    }
}

/// Turns expression text into a token sequence.
pub struct Scanner<'c> {
    catalog: &'c Catalog,
}

impl<'c> Scanner<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Scanner { catalog }
    }

    /// Scan `source` in a single left-to-right pass.
    pub fn scan(&self, source: &str) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while let Some(ch) = source[pos..].chars().next() {
            let rest = &source[pos..];

            if ch.is_ascii_whitespace() {
                pos += 1;
                continue;
            }

            if let Some(op) = match_operator(rest) {
                let after_space = pos > 0 && source.as_bytes()[pos - 1].is_ascii_whitespace();
                if op == Operator::Plus && after_space {
                    return Err(ScanError::SpaceBeforePlus { offset: pos });
                }
                tokens.push(Token::new(TokenKind::Operator(op), pos));
                pos += op.as_str().len();
                continue;
            }

            if let Some(after) = rest.strip_prefix(DOCUMENT_REF) {
                let id = identifier(after).ok_or(ScanError::MissingRefId {
                    prefix: DOCUMENT_REF,
                    offset: pos,
                })?;
                tokens.push(Token::new(TokenKind::DocumentRef(id.to_string()), pos));
                pos += DOCUMENT_REF.len() + id.len();
                continue;
            }

            if let Some(after) = rest.strip_prefix(LICENSE_REF) {
                let id = identifier(after).ok_or(ScanError::MissingRefId {
                    prefix: LICENSE_REF,
                    offset: pos,
                })?;
                tokens.push(Token::new(TokenKind::LicenseRef(id.to_string()), pos));
                pos += LICENSE_REF.len() + id.len();
                continue;
            }

            let Some(word) = identifier(rest) else {
                return Err(ScanError::UnexpectedChar { ch, offset: pos });
            };
            let next = rest[word.len()..].chars().next();
            let normalized = self
                .normalize(word, next)
                .ok_or_else(|| ScanError::UnknownLicense {
                    id: word.to_string(),
                    offset: pos,
                })?;

            tokens.push(Token::new(normalized.kind, pos));
            if normalized.emit_plus {
                tokens.push(Token::new(
                    TokenKind::Operator(Operator::Plus),
                    pos + word.len() - OR_LATER.len(),
                ));
            }
            pos += word.len();
            if normalized.consumed_plus {
                pos += 1;
            }
        }

        tracing::trace!(source, tokens = tokens.len(), "scanned license expression");
        Ok(tokens)
    }

    fn normalize(&self, word: &str, next: Option<char>) -> Option<Normalized> {
        if let Some((id, kind)) = self.catalog.lookup(word) {
            let kind = match kind {
                IdKind::Exception => TokenKind::Exception(id.to_string()),
                _ => TokenKind::License {
                    id: id.to_string(),
                    has_plus: false,
                },
            };
            return Some(Normalized::plain(kind));
        }

        if let Some(base) = strip_suffix_ignore_case(word, ONLY) {
            if let Some(id) = self.active(base) {
                return Some(Normalized::plain(TokenKind::License {
                    id: id.to_string(),
                    has_plus: false,
                }));
            }
        }

        if next == Some('+') {
            let or_later = format!("{word}{OR_LATER}");
            if let Some(id) = self.active(&or_later) {
                let base = strip_suffix_ignore_case(id, OR_LATER).unwrap_or(id);
                return Some(Normalized {
                    kind: TokenKind::License {
                        id: base.to_string(),
                        has_plus: true,
                    },
                    consumed_plus: true,
                    emit_plus: false,
                });
            }
        }

        if let Some(base) = strip_suffix_ignore_case(word, OR_LATER) {
            if let Some(id) = self.active(base) {
                return Some(Normalized {
                    kind: TokenKind::License {
                        id: id.to_string(),
                        has_plus: true,
                    },
                    consumed_plus: false,
                    emit_plus: true,
                });
            }
        }

        self.catalog.lookup_deprecated(word).map(|id| {
            Normalized::plain(TokenKind::License {
                id: id.to_string(),
                has_plus: false,
            })
        })
    }

    fn active(&self, id: &str) -> Option<&'c str> {
        match self.catalog.lookup(id) {
            Some((canonical, IdKind::Active)) => Some(canonical),
            _ => None,
        }
    }
}

fn match_operator(rest: &str) -> Option<Operator> {
    OPERATORS.iter().copied().find(|op| {
        let text = op.as_str();
        if !rest.starts_with(text) {
            return false;
        }
        // Word operators must not be the prefix of a longer identifier.
        !op.is_word() || identifier(&rest[text.len()..]).is_none()
    })
}

fn identifier(text: &str) -> Option<&str> {
    IDENTIFIER.find(text).map(|m| m.as_str())
}

pub(crate) fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if split == 0 || !text.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Result<Vec<TokenKind>, ScanError> {
        Scanner::new(Catalog::builtin())
            .scan(source)
            .map(|tokens| tokens.into_iter().map(|t| t.kind).collect())
    }

    fn license(id: &str, has_plus: bool) -> TokenKind {
        TokenKind::License {
            id: id.to_string(),
            has_plus,
        }
    }

    #[test]
    fn test_operators_and_ids() {
        let tokens = scan("(MIT AND Apache-2.0) OR ISC").unwrap();
        assert_eq!(
            tokens,
            vec![
                TokenKind::Operator(Operator::OpenParen),
                license("MIT", false),
                TokenKind::Operator(Operator::And),
                license("Apache-2.0", false),
                TokenKind::Operator(Operator::CloseParen),
                TokenKind::Operator(Operator::Or),
                license("ISC", false),
            ]
        );
    }

    #[test]
    fn test_case_insensitive_match_is_canonicalized() {
        assert_eq!(scan("mit").unwrap(), vec![license("MIT", false)]);
        assert_eq!(scan("APACHE-2.0").unwrap(), vec![license("Apache-2.0", false)]);
    }

    #[test]
    fn test_exception_token() {
        let tokens = scan("GPL-2.0-only WITH Classpath-exception-2.0").unwrap();
        assert_eq!(
            tokens,
            vec![
                license("GPL-2.0-only", false),
                TokenKind::Operator(Operator::With),
                TokenKind::Exception("Classpath-exception-2.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_only_suffix_stripped() {
        assert_eq!(scan("Apache-2.0-only").unwrap(), vec![license("Apache-2.0", false)]);
    }

    #[test]
    fn test_plus_absorbed_into_or_later() {
        // GPL-2.0 is only deprecated; GPL-2.0-or-later is current.
        assert_eq!(scan("GPL-2.0+").unwrap(), vec![license("GPL-2.0", true)]);
    }

    #[test]
    fn test_plus_after_active_id_stays_operator() {
        assert_eq!(
            scan("Apache-2.0+").unwrap(),
            vec![
                license("Apache-2.0", false),
                TokenKind::Operator(Operator::Plus)
            ]
        );
    }

    #[test]
    fn test_or_later_suffix_rewritten_to_plus() {
        let tokens = Scanner::new(Catalog::builtin())
            .scan("Apache-2.0-or-later")
            .unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, license("Apache-2.0", true));
        assert!(tokens[1].is_operator(Operator::Plus));
        assert_eq!(tokens[1].offset, 10);
    }

    #[test]
    fn test_or_later_exact_match_wins() {
        assert_eq!(
            scan("GPL-2.0-or-later").unwrap(),
            vec![license("GPL-2.0-or-later", false)]
        );
    }

    #[test]
    fn test_deprecated_checked_last() {
        assert_eq!(scan("GPL-3.0").unwrap(), vec![license("GPL-3.0", false)]);
        assert_eq!(scan("wxwindows").unwrap(), vec![license("wxWindows", false)]);
    }

    #[test]
    fn test_refs() {
        let tokens = scan("DocumentRef-spdx-tool-1.2:LicenseRef-MIT-Style-2").unwrap();
        assert_eq!(
            tokens,
            vec![
                TokenKind::DocumentRef("spdx-tool-1.2".to_string()),
                TokenKind::Operator(Operator::Colon),
                TokenKind::LicenseRef("MIT-Style-2".to_string()),
            ]
        );
    }

    #[test]
    fn test_word_operator_needs_boundary() {
        let err = scan("MIT ANDX").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnknownLicense {
                id: "ANDX".to_string(),
                offset: 4
            }
        );
    }

    #[test]
    fn test_unknown_license_offset() {
        assert_eq!(
            scan("NON-EXISTENT-LICENSE").unwrap_err(),
            ScanError::UnknownLicense {
                id: "NON-EXISTENT-LICENSE".to_string(),
                offset: 0
            }
        );
        assert_eq!(
            scan("MIT OR Foo-9").unwrap_err(),
            ScanError::UnknownLicense {
                id: "Foo-9".to_string(),
                offset: 7
            }
        );
    }

    #[test]
    fn test_space_before_plus() {
        assert_eq!(
            scan("Apache-2.0 +").unwrap_err(),
            ScanError::SpaceBeforePlus { offset: 11 }
        );
    }

    #[test]
    fn test_ref_prefix_without_id() {
        assert_eq!(
            scan("LicenseRef-").unwrap_err(),
            ScanError::MissingRefId {
                prefix: "LicenseRef-",
                offset: 0
            }
        );
        assert!(matches!(
            scan("MIT OR DocumentRef-:LicenseRef-x").unwrap_err(),
            ScanError::MissingRefId { offset: 7, .. }
        ));
    }

    #[test]
    fn test_unexpected_char() {
        assert_eq!(
            scan("MIT / ISC").unwrap_err(),
            ScanError::UnexpectedChar { ch: '/', offset: 4 }
        );
    }

    #[test]
    fn test_scan_is_deterministic() {
        let source = "LGPL-2.1+ AND (MIT OR BSD-3-Clause)";
        assert_eq!(scan(source), scan(source));
    }

    #[test]
    fn test_strip_suffix_ignore_case() {
        assert_eq!(strip_suffix_ignore_case("GPL-2.0-OR-LATER", OR_LATER), Some("GPL-2.0"));
        assert_eq!(strip_suffix_ignore_case("-only", ONLY), None);
        assert_eq!(strip_suffix_ignore_case("MIT", ONLY), None);
    }
}
