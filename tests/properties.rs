use calcline::expr::{self, DEFAULT_MAX_DEPTH};
use calcline::{evaluate, Calculator, Dialect, EvalError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Tree {
    Num(u32),
    Bin(Box<Tree>, char, Box<Tree>),
}

impl Tree {
    fn render(&self) -> String {
        match self {
            Tree::Num(n) => n.to_string(),
            Tree::Bin(l, op, r) => format!("({}{op}{})", l.render(), r.render()),
        }
    }

    fn value(&self) -> f64 {
        match self {
            Tree::Num(n) => f64::from(*n),
            Tree::Bin(l, op, r) => apply(l.value(), *op, r.value()),
        }
    }
}

fn apply(a: f64, op: char, b: f64) -> f64 {
    match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        _ => a / b,
    }
}

fn same(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn op() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['+', '-', '*', '/'])
}

fn tree() -> impl Strategy<Value = Tree> {
    (0u32..1000).prop_map(Tree::Num).prop_recursive(5, 48, 2, |inner| {
        (inner.clone(), op(), inner).prop_map(|(l, op, r)| Tree::Bin(Box::new(l), op, Box::new(r)))
    })
}

/// Multiplicative runs are folded first, then the additive chain, each
/// from the left.
fn chain_value(first: u32, rest: &[(char, u32)]) -> f64 {
    let mut terms = vec![('+', f64::from(first))];
    for &(op, n) in rest {
        let n = f64::from(n);
        match op {
            '*' | '/' => {
                let last = terms.last_mut().expect("starts with one term");
                last.1 = apply(last.1, op, n);
            }
            _ => terms.push((op, n)),
        }
    }
    let mut result = terms[0].1;
    for &(op, n) in &terms[1..] {
        result = apply(result, op, n);
    }
    result
}

proptest! {
    #[test]
    fn parenthesized_trees(t in tree()) {
        let input = t.render();
        let expected = t.value();
        let classic = evaluate(&input).unwrap();
        prop_assert!(same(classic, expected), "{input}: {classic} != {expected}");

        match Calculator::new(Dialect::Strict).evaluate(&input) {
            Ok(v) => prop_assert!(same(v, expected), "{input}: {v} != {expected}"),
            Err(EvalError::DivisionByZero(_)) => {}
            Err(e) => prop_assert!(false, "{input}: {e}"),
        }
    }

    #[test]
    fn flat_chains_honour_precedence(
        first in 0u32..100,
        rest in prop::collection::vec((op(), 0u32..100), 0..8),
    ) {
        let mut input = first.to_string();
        for (op, n) in &rest {
            input.push(*op);
            input.push_str(&n.to_string());
        }
        let classic = evaluate(&input).unwrap();
        let expected = chain_value(first, &rest);
        prop_assert!(same(classic, expected), "{input}: {classic} != {expected}");
    }

    #[test]
    fn reprinting_keeps_the_value(t in tree()) {
        let parsed = expr::parse(&t.render(), DEFAULT_MAX_DEPTH).unwrap();
        let reprinted = parsed.to_string();
        let again = expr::parse(&reprinted, DEFAULT_MAX_DEPTH).unwrap();
        prop_assert_eq!(parsed.eval(), again.eval(), "{}", reprinted);
    }

    #[test]
    fn classic_never_fails_without_parens(input in "[0-9.+*/a -]{0,24}") {
        prop_assert!(evaluate(&input).is_ok());
    }
}
