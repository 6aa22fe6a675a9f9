//! Recursive-descent parser over scanned tokens.
//!
//! Grammar, lowest precedence first:
//! ```text
//! expression := and ( "OR" expression )?
//! and        := atom ( "AND" and )?
//! atom       := "(" expression ")"
//!             | ( DocumentRef ":" )? LicenseRef
//!             | license "+"? ( "WITH" exception )?
//! ```
//! Both binary operators recurse on their right operand, so chains such as
//! `A AND B AND C` build the right-leaning `A AND (B AND C)`.

use super::expand::{clause_count, MAX_CLAUSES};
use super::node::{License, LicenseRef, Node};
use super::scan::{Operator, Token, TokenKind};
use crate::error::SyntaxError;

/// Deepest parser recursion accepted.
///
/// Every operand of an `AND`/`OR` chain and every parenthesised group takes
/// at least one level, so this caps chain length as well as nesting. It is
/// also the depth of the resulting tree, which later walks recurse over.
pub const MAX_DEPTH: usize = 512;

/// Parse a complete token stream into a tree.
pub fn parse_tokens(tokens: &[Token]) -> Result<Node, SyntaxError> {
    if tokens.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let node = parser.parse_expression()?;

    if let Some(token) = parser.peek() {
        return Err(SyntaxError::TrailingTokens {
            found: token.to_string(),
            offset: token.offset,
        });
    }
    if clause_count(&node) > MAX_CLAUSES {
        return Err(SyntaxError::TooManyClauses { limit: MAX_CLAUSES });
    }
    Ok(node)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it is `op`.
    fn eat(&mut self, op: Operator) -> Option<&'t Token> {
        match self.peek() {
            Some(token) if token.is_operator(op) => self.next(),
            _ => None,
        }
    }

    fn descend(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.descend()?;
        let left = self.parse_and()?;
        let node = match self.eat(Operator::Or) {
            Some(op) => {
                let right = self.operand(op, Self::parse_expression)?;
                Node::or(left, right)
            }
            None => left,
        };
        self.depth -= 1;
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Node, SyntaxError> {
        self.descend()?;
        let left = self.parse_atom()?;
        let node = match self.eat(Operator::And) {
            Some(op) => {
                let right = self.operand(op, Self::parse_and)?;
                Node::and(left, right)
            }
            None => left,
        };
        self.depth -= 1;
        Ok(node)
    }

    /// Right-hand side of `op`; reports the operator when input ends early.
    fn operand(
        &mut self,
        op: &Token,
        parse: fn(&mut Self) -> Result<Node, SyntaxError>,
    ) -> Result<Node, SyntaxError> {
        if self.peek().is_none() {
            let operator = match op.kind {
                TokenKind::Operator(Operator::Or) => "OR",
                _ => "AND",
            };
            return Err(SyntaxError::MissingOperand {
                operator,
                offset: op.offset,
            });
        }
        parse(self)
    }

    fn parse_atom(&mut self) -> Result<Node, SyntaxError> {
        let token = self.next().ok_or(SyntaxError::UnexpectedEnd)?;

        match &token.kind {
            TokenKind::Operator(Operator::OpenParen) => {
                let inner = self.parse_expression()?;
                if self.eat(Operator::CloseParen).is_none() {
                    return Err(SyntaxError::UnbalancedParen {
                        offset: token.offset,
                    });
                }
                Ok(inner)
            }
            TokenKind::DocumentRef(document) => {
                let colon = self.eat(Operator::Colon);
                match (colon, self.next()) {
                    (
                        Some(_),
                        Some(Token {
                            kind: TokenKind::LicenseRef(id),
                            ..
                        }),
                    ) => Ok(Node::LicenseRef(LicenseRef {
                        license_ref: id.clone(),
                        document_ref: Some(document.clone()),
                    })),
                    _ => Err(SyntaxError::MissingLicenseRef {
                        offset: token.offset,
                    }),
                }
            }
            TokenKind::LicenseRef(id) => Ok(Node::LicenseRef(LicenseRef {
                license_ref: id.clone(),
                document_ref: None,
            })),
            TokenKind::License { id, has_plus } => self.parse_license(id, *has_plus),
            TokenKind::Exception(id) => self.parse_license(id, false),
            TokenKind::Operator(_) => Err(SyntaxError::UnexpectedToken {
                found: token.to_string(),
                offset: token.offset,
            }),
        }
    }

    fn parse_license(&mut self, id: &str, has_plus: bool) -> Result<Node, SyntaxError> {
        let mut license = License::new(id);
        license.has_plus = has_plus;

        if self.eat(Operator::Plus).is_some() {
            license.has_plus = true;
        }

        if let Some(with) = self.eat(Operator::With) {
            match self.next() {
                Some(Token {
                    kind: TokenKind::Exception(exception),
                    ..
                }) => license.exception = Some(exception.clone()),
                _ => {
                    return Err(SyntaxError::MissingException {
                        offset: with.offset,
                    })
                }
            }
        }

        Ok(Node::License(license))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::expression::scan::Scanner;

    fn parse(source: &str) -> Result<Node, SyntaxError> {
        let tokens = Scanner::new(Catalog::builtin()).scan(source).unwrap();
        parse_tokens(&tokens)
    }

    fn lic(id: &str) -> Node {
        License::new(id).into()
    }

    #[test]
    fn test_single_license() {
        assert_eq!(parse("MIT").unwrap(), lic("MIT"));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            parse("MIT AND Apache-2.0 OR GPL-2.0").unwrap(),
            Node::or(Node::and(lic("MIT"), lic("Apache-2.0")), lic("GPL-2.0"))
        );
        assert_eq!(
            parse("MIT OR Apache-2.0 AND GPL-2.0").unwrap(),
            Node::or(lic("MIT"), Node::and(lic("Apache-2.0"), lic("GPL-2.0")))
        );
    }

    #[test]
    fn test_chains_lean_right() {
        assert_eq!(
            parse("MIT AND ISC AND Apache-2.0").unwrap(),
            Node::and(lic("MIT"), Node::and(lic("ISC"), lic("Apache-2.0")))
        );
        assert_eq!(
            parse("MIT OR ISC OR Apache-2.0").unwrap().to_string(),
            "(MIT OR (ISC OR Apache-2.0))"
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse("MIT AND (ISC OR Apache-2.0)").unwrap(),
            Node::and(lic("MIT"), Node::or(lic("ISC"), lic("Apache-2.0")))
        );
        assert_eq!(parse("((MIT))").unwrap(), lic("MIT"));
    }

    #[test]
    fn test_plus_and_exception() {
        assert_eq!(
            parse("GPL-2.0+ WITH Classpath-exception-2.0").unwrap(),
            Node::from(
                License::new("GPL-2.0")
                    .with_plus()
                    .with_exception("Classpath-exception-2.0")
            )
        );
        let plus = Node::from(License::new("Apache-2.0").with_plus());
        assert_eq!(parse("Apache-2.0+").unwrap(), plus);
        assert_eq!(parse("Apache-2.0-or-later").unwrap(), plus);
    }

    #[test]
    fn test_license_refs() {
        assert_eq!(
            parse("DocumentRef-ext:LicenseRef-Custom OR LicenseRef-Local").unwrap(),
            Node::or(
                LicenseRef {
                    license_ref: "Custom".to_string(),
                    document_ref: Some("ext".to_string()),
                }
                .into(),
                LicenseRef {
                    license_ref: "Local".to_string(),
                    document_ref: None,
                }
                .into(),
            )
        );
    }

    #[test]
    fn test_document_ref_needs_license_ref() {
        assert_eq!(
            parse("DocumentRef-ext:MIT").unwrap_err(),
            SyntaxError::MissingLicenseRef { offset: 0 }
        );
        assert_eq!(
            parse("DocumentRef-ext LicenseRef-x").unwrap_err(),
            SyntaxError::MissingLicenseRef { offset: 0 }
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse("").unwrap_err(), SyntaxError::Empty);
        assert_eq!(parse("   ").unwrap_err(), SyntaxError::Empty);
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(
            parse("(MIT OR ISC").unwrap_err(),
            SyntaxError::UnbalancedParen { offset: 0 }
        );
        assert_eq!(
            parse("MIT OR ISC)").unwrap_err(),
            SyntaxError::TrailingTokens {
                found: ")".to_string(),
                offset: 10
            }
        );
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(
            parse("MIT ISC").unwrap_err(),
            SyntaxError::TrailingTokens {
                found: "ISC".to_string(),
                offset: 4
            }
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            parse("MIT AND").unwrap_err(),
            SyntaxError::MissingOperand {
                operator: "AND",
                offset: 4
            }
        );
        assert_eq!(
            parse("MIT OR").unwrap_err(),
            SyntaxError::MissingOperand {
                operator: "OR",
                offset: 4
            }
        );
    }

    #[test]
    fn test_missing_exception() {
        assert_eq!(
            parse("GPL-2.0 WITH").unwrap_err(),
            SyntaxError::MissingException { offset: 8 }
        );
        assert_eq!(
            parse("GPL-2.0 WITH MIT").unwrap_err(),
            SyntaxError::MissingException { offset: 8 }
        );
    }

    #[test]
    fn test_operator_in_atom_position() {
        assert_eq!(
            parse("AND MIT").unwrap_err(),
            SyntaxError::UnexpectedToken {
                found: "AND".to_string(),
                offset: 0
            }
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}MIT{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(
            parse(&deep).unwrap_err(),
            SyntaxError::TooDeep { limit: MAX_DEPTH }
        );

        let shallow = format!("{}MIT{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(parse(&shallow).unwrap(), lic("MIT"));
    }

    #[test]
    fn test_chain_length_counts_against_depth() {
        let chain = |op: &str, terms: usize| vec!["MIT"; terms].join(op);

        assert!(parse(&chain(" OR ", 300)).is_ok());
        assert!(parse(&chain(" AND ", 300)).is_ok());
        assert_eq!(
            parse(&chain(" OR ", 600)).unwrap_err(),
            SyntaxError::TooDeep { limit: MAX_DEPTH }
        );
        assert_eq!(
            parse(&chain(" AND ", 600)).unwrap_err(),
            SyntaxError::TooDeep { limit: MAX_DEPTH }
        );
    }

    #[test]
    fn test_clause_limit() {
        let groups = |n: usize| vec!["(MIT OR ISC)"; n].join(" AND ");

        // 2^10 clauses
        assert!(parse(&groups(10)).is_ok());
        assert_eq!(
            parse(&groups(11)).unwrap_err(),
            SyntaxError::TooManyClauses { limit: MAX_CLAUSES }
        );
        assert_eq!(
            parse(&groups(20)).unwrap_err(),
            SyntaxError::TooManyClauses { limit: MAX_CLAUSES }
        );
    }
}
