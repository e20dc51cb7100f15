//! The interactive shell around a [`Calculator`].

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::calculator::{Calculator, Dialect};
use crate::expr::{format_number, DEFAULT_PRECISION};

pub const BANNER: &str = "Enter arithmetic expressions (type 'exit' to quit):";

/// What the shell should do after one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exit,
    /// Lines to print, in order.
    Print(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Session {
    calculator: Calculator,
    precision: usize,
    show_parse: bool,
}

impl Session {
    pub fn new(calculator: Calculator) -> Self {
        Self {
            calculator,
            precision: DEFAULT_PRECISION,
            show_parse: false,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Echo the parsed tree before each result. Only meaningful for the
    /// strict dialect, which is the only one that builds a tree.
    pub fn with_show_parse(mut self, show_parse: bool) -> Self {
        self.show_parse = show_parse;
        self
    }

    /// Evaluates one line, with `Err` carrying the message to show.
    pub fn eval_line(&self, line: &str) -> Result<String, String> {
        self.calculator
            .evaluate(line)
            .map(|value| format_number(value, self.precision))
            .map_err(|e| e.to_string())
    }

    pub fn process_line(&self, line: &str) -> Outcome {
        if line == "exit" {
            return Outcome::Exit;
        }

        let mut out = Vec::new();
        if self.show_parse && self.calculator.dialect() == Dialect::Strict {
            if let Ok(expr) = self.calculator.parse(line) {
                out.push(format!("Parsed: {expr}"));
            }
        }
        out.push(match self.eval_line(line) {
            Ok(value) => format!("Result: {value}"),
            Err(e) => format!("Error: {e}"),
        });
        Outcome::Print(out)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub prompt: String,
    pub history: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            history: None,
        }
    }
}

fn save_history(rl: &mut DefaultEditor, history: &Option<PathBuf>) {
    if let Some(path) = history {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Reads lines until `exit` or end of input.
pub fn run(session: &Session, settings: &Settings) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    if let Some(path) = &settings.history {
        if let Err(e) = rl.load_history(path) {
            let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    println!("{BANNER}");
    loop {
        let readline = rl.readline(&settings.prompt);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                match session.process_line(&line) {
                    Outcome::Exit => break,
                    Outcome::Print(lines) => {
                        for line in lines {
                            println!("{line}");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                save_history(&mut rl, &settings.history);
                return Err(e);
            }
        }
    }
    save_history(&mut rl, &settings.history);
    Ok(())
}
