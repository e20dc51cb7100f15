//! The classic evaluator: a recursive descent over a [`Cursor`] that folds
//! each grammar rule into a number as soon as it is matched.
//!
//! ```text
//! Expression := Term (('+' | '-') Term)*
//! Term       := Factor (('*' | '/') Factor)*
//! Factor     := '(' Expression ')' | Number
//! ```
//!
//! Input is never rejected except for a missing `)`. Whitespace is not
//! skipped, unknown characters read as a zero-valued number, and whatever
//! follows the top-level expression is left unread.

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::literal;

/// Evaluates `input` with a default [`Evaluator`].
pub fn evaluate(input: &str) -> Result<f64, ParseError> {
    Evaluator::new().evaluate(input)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    max_depth: Option<usize>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects inputs whose parentheses nest deeper than `limit`.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn evaluate(&self, input: &str) -> Result<f64, ParseError> {
        let mut state = State {
            cursor: Cursor::new(input),
            depth: 0,
            max_depth: self.max_depth,
        };
        let value = state.expression()?;
        if !state.cursor.rest().is_empty() {
            tracing::debug!(
                position = state.cursor.char_position(),
                ignored = state.cursor.rest(),
                "stopped before end of input"
            );
        }
        Ok(value)
    }
}

/// Per-call parse state. Created fresh by every [`Evaluator::evaluate`].
struct State<'a> {
    cursor: Cursor<'a>,
    depth: usize,
    max_depth: Option<usize>,
}

impl State<'_> {
    fn expression(&mut self) -> Result<f64, ParseError> {
        let mut result = self.term()?;
        while let Some(op @ ('+' | '-')) = self.cursor.peek() {
            self.cursor.advance();
            let rhs = self.term()?;
            if op == '+' {
                result += rhs;
            } else {
                result -= rhs;
            }
        }
        Ok(result)
    }

    fn term(&mut self) -> Result<f64, ParseError> {
        let mut result = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.cursor.peek() {
            self.cursor.advance();
            let rhs = self.factor()?;
            if op == '*' {
                result *= rhs;
            } else {
                result /= rhs;
            }
        }
        Ok(result)
    }

    fn factor(&mut self) -> Result<f64, ParseError> {
        if self.cursor.peek() != Some('(') {
            return Ok(self.number());
        }
        self.cursor.advance();

        self.depth += 1;
        if let Some(limit) = self.max_depth {
            if self.depth > limit {
                return Err(ParseError::NestingTooDeep { limit });
            }
        }
        let result = self.expression()?;
        self.depth -= 1;

        let position = self.cursor.char_position();
        // the character is consumed even when it is the wrong one
        if self.cursor.advance() != Some(')') {
            return Err(ParseError::ExpectedClosingParenthesis { position });
        }
        Ok(result)
    }

    fn number(&mut self) -> f64 {
        let start = self.cursor.position();
        while self.cursor.peek().is_some_and(literal::is_literal_char) {
            self.cursor.advance();
        }
        let run = self.cursor.since(start);
        let conversion = literal::convert(run);
        if !conversion.is_exact(run) {
            tracing::trace!(position = start, run, value = conversion.value, "lenient literal");
        }
        conversion.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("((1+2)*(3+4))"), Ok(21.0));
    }

    #[test]
    fn folds_left_to_right() {
        assert_eq!(evaluate("10-2-3"), Ok(5.0));
        assert_eq!(evaluate("10/2/5"), Ok(1.0));
        assert_eq!(evaluate("2*3/4*8"), Ok(12.0));
    }

    #[test]
    fn unclosed_parenthesis() {
        assert_eq!(
            evaluate("(2+3"),
            Err(ParseError::ExpectedClosingParenthesis { position: 4 })
        );
        assert_eq!(
            evaluate("(2+3]"),
            Err(ParseError::ExpectedClosingParenthesis { position: 4 })
        );
    }

    #[test]
    fn lenient_inputs() {
        assert_eq!(evaluate(""), Ok(0.0));
        assert_eq!(evaluate("abc"), Ok(0.0));
        assert_eq!(evaluate("5+3)"), Ok(8.0));
        assert_eq!(evaluate("2 2"), Ok(2.0));
        assert_eq!(evaluate("2+ 2"), Ok(2.0));
        assert_eq!(evaluate("3.1.4*2"), Ok(6.2));
        assert_eq!(evaluate("-5"), Ok(-5.0));
        assert_eq!(evaluate("()"), Ok(0.0));
    }

    #[test]
    fn huge_literal_is_largest_finite() {
        assert_eq!(evaluate(&"9".repeat(400)), Ok(f64::MAX));
    }

    #[test]
    fn error_positions_count_characters() {
        assert_eq!(
            evaluate("(é"),
            Err(ParseError::ExpectedClosingParenthesis { position: 1 })
        );
        assert_eq!(
            evaluate("(1+(2é"),
            Err(ParseError::ExpectedClosingParenthesis { position: 5 })
        );
    }

    #[test]
    fn float_division() {
        assert_eq!(evaluate("1/0"), Ok(f64::INFINITY));
        assert!(evaluate("0/0").is_ok_and(f64::is_nan));
    }

    #[test]
    fn depth_limit() {
        let evaluator = Evaluator::new().with_max_depth(2);
        assert_eq!(evaluator.evaluate("((1))"), Ok(1.0));
        assert_eq!(
            evaluator.evaluate("(((1)))"),
            Err(ParseError::NestingTooDeep { limit: 2 })
        );
        assert_eq!(evaluator.evaluate("(1)+(2)+((3))"), Ok(6.0));
    }

    #[test]
    fn no_state_between_calls() {
        let evaluator = Evaluator::new();
        assert!(evaluator.evaluate("(1+").is_err());
        assert_eq!(evaluator.evaluate("1+1"), Ok(2.0));
    }
}
