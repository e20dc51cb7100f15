/// Characters a number literal is scanned from. Any number of dots is
/// accepted while scanning; conversion decides what they mean.
pub fn is_literal_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Result of converting a scanned run of digits and dots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub value: f64,
    /// Bytes of the run that took part in the value.
    pub used: usize,
    /// Whether the used prefix contained a digit at all.
    pub has_digits: bool,
}

impl Conversion {
    /// True when the whole run formed one well-formed decimal number.
    pub fn is_exact(&self, run: &str) -> bool {
        self.has_digits && self.used == run.len()
    }
}

/// Converts the longest `digits* ('.' digits*)?` prefix of `run`.
///
/// A prefix without digits converts to zero, so `""` and `"."` both yield
/// `0.0` and `"3.1.4"` yields `3.1`. Literals beyond the range of `f64`
/// saturate to `f64::MAX` rather than becoming infinite.
pub fn convert(run: &str) -> Conversion {
    let bytes = run.as_bytes();
    let mut used = 0;
    let mut has_digits = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(used) {
        match b {
            b'0'..=b'9' => has_digits = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        used += 1;
    }

    let value = if has_digits {
        // digits with at most one dot always parse
        let value: f64 = run[..used].parse().unwrap_or(0.0);
        if value.is_infinite() {
            f64::MAX
        } else {
            value
        }
    } else {
        0.0
    };

    Conversion {
        value,
        used,
        has_digits,
    }
}
