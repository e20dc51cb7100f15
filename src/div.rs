use std::error::Error;
use std::fmt::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DivisionByZero;

impl Display for DivisionByZero {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad("division by zero")
    }
}

impl Error for DivisionByZero {}

pub trait CheckedDiv<T = Self> {
    type Target;
    fn checked_div(self, other: T) -> Result<Self::Target, DivisionByZero>;
}

impl CheckedDiv for f64 {
    type Target = f64;
    fn checked_div(self, other: Self) -> Result<Self::Target, DivisionByZero> {
        // -0.0 compares equal as well
        if other == 0.0 {
            Err(DivisionByZero)
        } else {
            Ok(self / other)
        }
    }
}

#[test]
fn test_checked_div() {
    assert_eq!(Ok(2.5), 5.0f64.checked_div(2.0));
    assert_eq!(Err(DivisionByZero), 1.0f64.checked_div(0.0));
    assert_eq!(Err(DivisionByZero), 1.0f64.checked_div(-0.0));
}
