//! Error types for expression scanning, parsing and catalog loading.

use std::path::PathBuf;

/// Lexical error raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("unknown license identifier '{id}' at offset {offset}")]
    UnknownLicense { id: String, offset: usize },

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("'{prefix}' at offset {offset} is not followed by an identifier")]
    MissingRefId { prefix: &'static str, offset: usize },

    #[error("whitespace before '+' at offset {offset}")]
    SpaceBeforePlus { offset: usize },
}

/// Grammar error raised by the parser on a valid token stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("empty license expression")]
    Empty,

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unmatched '(' at offset {offset}")]
    UnbalancedParen { offset: usize },

    #[error("unexpected trailing '{found}' at offset {offset}")]
    TrailingTokens { found: String, offset: usize },

    #[error("missing expression after '{operator}' at offset {offset}")]
    MissingOperand {
        operator: &'static str,
        offset: usize,
    },

    #[error("expected exception identifier after 'WITH' at offset {offset}")]
    MissingException { offset: usize },

    #[error("expected 'LicenseRef-' after document reference at offset {offset}")]
    MissingLicenseRef { offset: usize },

    #[error("expression nests or chains operators deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expression expands to more than {limit} alternatives")]
    TooManyClauses { limit: usize },
}

/// Any failure to turn text into an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Failure to load a catalog regenerated offline.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
