mod error;
mod repl;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use rpncalc::{Extension, Session, STANDARD_NAMES};

use crate::error::CliError;
use crate::repl::Options;

/// rpncalc - evaluate arithmetic expressions with pluggable operators
#[derive(Parser, Debug)]
#[command(name = "rpncalc")]
#[command(about = "Evaluate arithmetic expressions", long_about = None)]
struct Args {
    /// Extension module to load (repeatable; default: all standard modules)
    #[arg(long = "ext", value_name = "NAME")]
    extensions: Vec<String>,

    /// Also print each expression in reverse Polish notation
    #[arg(long)]
    show_rpn: bool,

    /// Print one JSON report per expression
    #[arg(long)]
    json: bool,

    /// Print the registered operations and constants as JSON and exit
    #[arg(long)]
    list: bool,

    /// Expressions to evaluate (if none are given, reads lines from stdin)
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    use tracing_subscriber::{fmt, EnvFilter};

    // RPNCALC_LOG, then RUST_LOG, then warnings only.
    let filter = EnvFilter::try_from_env("RPNCALC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("rpncalc: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let extensions = select_extensions(&args.extensions)?;
    let mut session = Session::with_extensions(&extensions)?;

    let stdout = io::stdout();
    let mut output = stdout.lock();

    if args.list {
        let table = session.registry().describe();
        serde_json::to_writer_pretty(&mut output, &table)?;
        writeln!(output)?;
        return Ok(());
    }

    let options = Options {
        show_rpn: args.show_rpn,
        json: args.json,
    };

    if !args.expressions.is_empty() {
        for expression in &args.expressions {
            repl::evaluate_line(&mut session, expression, &mut output, options)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    repl::run_lines(&mut session, stdin.lock(), &mut output, options)
}

fn select_extensions(names: &[String]) -> Result<Vec<Box<dyn Extension>>, CliError> {
    if names.is_empty() {
        return Ok(rpncalc::standard());
    }
    names
        .iter()
        .map(|name| {
            rpncalc::by_name(name).ok_or_else(|| CliError::UnknownExtension {
                name: name.clone(),
                available: STANDARD_NAMES.join(", "),
            })
        })
        .collect()
}
