use std::path::PathBuf;
use std::process::ExitCode;

use calcline::repl::{self, Session, Settings};
use calcline::{Calculator, Dialect};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Evaluates arithmetic expressions over real numbers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Skip whitespace and reject anything that is not a complete expression.
    #[arg(short, long)]
    strict: bool,

    /// Deepest parenthesis nesting accepted.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Significant digits in printed results.
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=17))]
    precision: u8,

    #[arg(long, default_value = "> ")]
    prompt: String,

    /// File to load line history from and save it to.
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Print the parsed expression before its result (strict only).
    #[arg(long)]
    show_parse: bool,

    /// Evaluate this expression and exit instead of starting the shell.
    expression: Option<String>,
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let dialect = if args.strict {
        Dialect::Strict
    } else {
        Dialect::Classic
    };
    let mut calculator = Calculator::new(dialect);
    if let Some(limit) = args.max_depth {
        calculator = calculator.with_max_depth(limit);
    }
    let session = Session::new(calculator)
        .with_precision(usize::from(args.precision))
        .with_show_parse(args.show_parse);

    if let Some(expression) = args.expression {
        return Ok(match session.eval_line(&expression) {
            Ok(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        });
    }

    let settings = Settings {
        prompt: args.prompt,
        history: args.history,
    };
    repl::run(&session, &settings)?;
    Ok(ExitCode::SUCCESS)
}
