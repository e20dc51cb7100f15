/// Read position over one input line.
///
/// The position is a byte offset that only ever moves forward. `None` is the
/// end-marker returned once the input is exhausted.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the current character and steps past it. At the end this keeps
    /// returning `None` without moving.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Characters consumed so far, the unit error positions are reported in.
    pub fn char_position(&self) -> usize {
        self.input[..self.pos].chars().count()
    }

    /// Everything from `start` up to the current position.
    pub fn since(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}
