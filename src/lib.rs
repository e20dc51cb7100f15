//! A line calculator for `+ - * /` over `f64` with parentheses and the usual
//! precedence.
//!
//! [`evaluate`] is the classic single-pass evaluator. [`Calculator`] picks
//! between it and the strict dialect, and [`repl`] wraps either in an
//! interactive shell.

pub mod calculator;
pub mod cursor;
pub mod div;
pub mod error;
pub mod eval;
pub mod expr;
pub mod literal;
pub mod repl;

pub use calculator::{Calculator, Dialect};
pub use error::{EvalError, ParseError};
pub use eval::{evaluate, Evaluator};
