use thiserror::Error;

use crate::div::DivisionByZero;

/// Failures while reading an expression.
///
/// Positions are character offsets into the line, not byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An opening parenthesis was not matched at the expected position.
    #[error("Expected closing parenthesis")]
    ExpectedClosingParenthesis { position: usize },
    #[error("Malformed number literal '{literal}' at position {position}")]
    MalformedNumberLiteral { literal: String, position: usize },
    #[error("Unexpected {found} at position {position}")]
    UnexpectedInput { found: String, position: usize },
    #[error("Parentheses nested deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    pub(crate) fn unexpected(found: Option<char>, position: usize) -> Self {
        let found = match found {
            Some(c) => format!("character '{c}'"),
            None => "end of input".to_owned(),
        };
        Self::UnexpectedInput { found, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZero),
}
