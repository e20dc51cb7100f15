use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::expr::{self, Expr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Fused single pass that tolerates malformed input.
    #[default]
    Classic,
    /// Separate parse stage that rejects anything it cannot read in full.
    Strict,
}

/// One configured way of turning a line into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    dialect: Dialect,
    max_depth: Option<usize>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Dialect::Classic)
    }
}

impl Calculator {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            max_depth: None,
        }
    }

    /// Overrides the nesting limit. Classic has none unless set; strict
    /// falls back to [`expr::DEFAULT_MAX_DEPTH`].
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn evaluate(&self, input: &str) -> Result<f64, EvalError> {
        let result = match self.dialect {
            Dialect::Classic => {
                let mut evaluator = Evaluator::new();
                if let Some(limit) = self.max_depth {
                    evaluator = evaluator.with_max_depth(limit);
                }
                evaluator.evaluate(input).map_err(EvalError::from)
            }
            Dialect::Strict => self.parse(input).map_err(EvalError::from).and_then(|e| e.eval()),
        };
        tracing::debug!(dialect = ?self.dialect, input, ?result, "evaluated");
        result
    }

    /// The tree the strict dialect evaluates. Classic never builds one, so
    /// this always parses strictly.
    pub fn parse(&self, input: &str) -> Result<Expr, crate::ParseError> {
        expr::parse(input, self.max_depth.unwrap_or(expr::DEFAULT_MAX_DEPTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    #[test]
    fn dialects_disagree_on_garbage() {
        let classic = Calculator::new(Dialect::Classic);
        let strict = Calculator::new(Dialect::Strict);
        assert_eq!(classic.evaluate("5+3)"), Ok(8.0));
        assert!(strict.evaluate("5+3)").is_err());
        assert_eq!(classic.evaluate(" 1"), Ok(0.0));
        assert_eq!(strict.evaluate(" 1"), Ok(1.0));
    }

    #[test]
    fn depth_limit_applies_to_both() {
        for dialect in [Dialect::Classic, Dialect::Strict] {
            let calc = Calculator::new(dialect).with_max_depth(1);
            assert_eq!(calc.evaluate("(1)"), Ok(1.0));
            assert_eq!(
                calc.evaluate("((1))"),
                Err(ParseError::NestingTooDeep { limit: 1 }.into())
            );
        }
    }
}
