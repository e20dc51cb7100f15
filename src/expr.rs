use std::ops::Range;

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use crate::div::CheckedDiv;
use crate::error::{EvalError, ParseError};
use crate::literal;

mod print;

pub use print::{format_number, Printer, DEFAULT_PRECISION, MAX_PRECISION};

/// Nesting limit applied by [`evaluate`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A number literal kept as written, so that it can be validated and
/// printed back.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub span: Range<usize>,
}

impl Literal {
    pub fn value(&self) -> Result<f64, ParseError> {
        let conversion = literal::convert(&self.text);
        if conversion.is_exact(&self.text) {
            Ok(conversion.value)
        } else {
            Err(ParseError::MalformedNumberLiteral {
                literal: self.text.clone(),
                position: self.span.start,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Literal),
    Add(Box<(Expr, Expr)>),
    Sub(Box<(Expr, Expr)>),
    Mul(Box<(Expr, Expr)>),
    Div(Box<(Expr, Expr)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrecedenceContext {
    NoPrecedence,
    Add,
    Mul,
    Atom,
}

impl Expr {
    pub fn precedence(&self) -> PrecedenceContext {
        match self {
            Expr::Number(_) => PrecedenceContext::Atom,
            Expr::Add(_) | Expr::Sub(_) => PrecedenceContext::Add,
            Expr::Mul(_) | Expr::Div(_) => PrecedenceContext::Mul,
        }
    }

    pub fn eval(&self) -> Result<f64, EvalError> {
        Ok(match self {
            Expr::Number(lit) => lit.value()?,
            Expr::Add(x) => x.0.eval()? + x.1.eval()?,
            Expr::Sub(x) => x.0.eval()? - x.1.eval()?,
            Expr::Mul(x) => x.0.eval()? * x.1.eval()?,
            Expr::Div(x) => x.0.eval()?.checked_div(x.1.eval()?)?,
        })
    }
}

type Fold = fn(Box<(Expr, Expr)>) -> Expr;

pub fn expr_parser() -> impl Parser<char, Expr, Error = Simple<char>> {
    let expr = recursive(|expr| {
        let number = filter(|c: &char| literal::is_literal_char(*c))
            .repeated()
            .at_least(1)
            .collect::<String>()
            .map_with_span(|text, span| Expr::Number(Literal { text, span }));

        let atom = number
            .or(expr.delimited_by(just('('), just(')')))
            .padded();

        let op = |c| just(c).padded();

        let product = atom
            .clone()
            .then(
                op('*')
                    .to(Expr::Mul as Fold)
                    .or(op('/').to(Expr::Div as Fold))
                    .then(atom)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| op(Box::new((lhs, rhs))));

        product
            .clone()
            .then(
                op('+')
                    .to(Expr::Add as Fold)
                    .or(op('-').to(Expr::Sub as Fold))
                    .then(product)
                    .repeated(),
            )
            .foldl(|lhs, (op, rhs)| op(Box::new((lhs, rhs))))
    });

    expr.then_ignore(end())
}

/// Deepest parenthesis nesting in `input`, counting only opening ones.
fn nesting_depth(input: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for c in input.chars() {
        match c {
            '(' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn convert_error(e: Simple<char>) -> ParseError {
    let position = e.span().start;
    if let SimpleReason::Unclosed { .. } = e.reason() {
        return ParseError::ExpectedClosingParenthesis { position };
    }
    if e.expected().any(|x| *x == Some(')')) {
        return ParseError::ExpectedClosingParenthesis { position };
    }
    ParseError::unexpected(e.found().copied(), position)
}

/// Parses all of `input`, refusing nesting deeper than `max_depth`.
pub fn parse(input: &str, max_depth: usize) -> Result<Expr, ParseError> {
    if nesting_depth(input) > max_depth {
        return Err(ParseError::NestingTooDeep { limit: max_depth });
    }
    expr_parser().parse(input).map_err(|errors| {
        // the parser stops at the first error it cannot recover from
        errors
            .into_iter()
            .next()
            .map_or_else(|| ParseError::unexpected(None, input.len()), convert_error)
    })
}

/// Parses and evaluates `input` with every check enabled.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    parse(input, DEFAULT_MAX_DEPTH)?.eval()
}
