use std::fmt::{self, Write};

use super::{Expr, PrecedenceContext};

/// Significant digits used when none are configured, as in C++ streams.
pub const DEFAULT_PRECISION: usize = 6;

/// An `f64` never carries more than 17 significant decimal digits.
pub const MAX_PRECISION: usize = 17;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).print(self)
    }
}

/// Renders a number in the shortest of fixed or scientific notation with
/// `precision` significant digits, like printf's `%g`.
pub fn format_number(value: f64, precision: usize) -> String {
    let mut out = String::new();
    Printer::new(&mut out)
        .with_precision(precision)
        .print_number(value)
        .expect("String format does not have errors");
    out
}

pub struct Printer<W: Write> {
    writer: W,
    precision: usize,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.clamp(1, MAX_PRECISION);
        self
    }

    pub fn print(&mut self, x: &Expr) -> fmt::Result {
        self.print_with_precedence(x, PrecedenceContext::NoPrecedence, false)
    }

    pub fn maybe_enter_parens(
        &mut self,
        f: impl FnOnce(&mut Self) -> fmt::Result,
        parens: bool,
    ) -> fmt::Result {
        if parens {
            self.writer.write_char('(')?;
        }
        f(self)?;
        if parens {
            self.writer.write_char(')')?;
        }
        Ok(())
    }

    /// Operators fold to the left, so a right operand of equal precedence
    /// still needs parentheses: `1-(2-3)`.
    pub fn print_with_precedence(
        &mut self,
        x: &Expr,
        p: PrecedenceContext,
        right: bool,
    ) -> fmt::Result {
        let new_ctxt = x.precedence();
        match x {
            Expr::Number(lit) => self.writer.write_str(&lit.text),
            Expr::Add(exprs) | Expr::Sub(exprs) | Expr::Mul(exprs) | Expr::Div(exprs) => {
                let s = match x {
                    Expr::Add(_) => "+",
                    Expr::Sub(_) => "-",
                    Expr::Mul(_) => "*",
                    Expr::Div(_) => "/",
                    Expr::Number(_) => unreachable!(),
                };

                self.maybe_enter_parens(
                    |this| {
                        this.print_with_precedence(&exprs.0, new_ctxt, false)?;
                        this.writer.write_str(s)?;
                        this.print_with_precedence(&exprs.1, new_ctxt, true)
                    },
                    new_ctxt < p || (right && new_ctxt == p),
                )
            }
        }
    }

    pub fn print_number(&mut self, value: f64) -> fmt::Result {
        if value.is_nan() {
            return self.writer.write_str("nan");
        }
        if value.is_infinite() {
            let sign = if value < 0.0 { "-" } else { "" };
            return write!(self.writer, "{sign}inf");
        }
        if value == 0.0 {
            let sign = if value.is_sign_negative() { "-" } else { "" };
            return write!(self.writer, "{sign}0");
        }

        let precision = self.precision;
        // rounding to the requested digits can carry into the exponent,
        // so take it from the rounded scientific form
        let sci = format!("{:.*e}", precision - 1, value);
        let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);

        if exp < -4 || exp >= precision as i32 {
            let sign = if exp < 0 { '-' } else { '+' };
            let digits = exp.unsigned_abs();
            write!(
                self.writer,
                "{}e{sign}{digits:02}",
                trim_fraction(mantissa)
            )
        } else {
            let decimals = (precision as i32 - 1 - exp) as usize;
            let fixed = format!("{value:.decimals$}");
            self.writer.write_str(trim_fraction(&fixed))
        }
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
