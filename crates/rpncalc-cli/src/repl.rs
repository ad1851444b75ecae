//! Line-oriented evaluation loop.

use std::io::{BufRead, Write};

use rpncalc::Session;
use tracing::debug;

use crate::error::CliError;

/// How each evaluated line is printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print the RPN form before the result.
    pub show_rpn: bool,
    /// Print one JSON report per expression instead of text.
    pub json: bool,
}

/// Evaluate lines from `input` until an empty line or end of input.
///
/// A line holding only whitespace is echoed as is, except in JSON mode where
/// it is skipped.
pub fn run_lines<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    options: Options,
) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            debug!("empty line, leaving loop");
            break;
        }
        if line.trim().is_empty() {
            if !options.json {
                writeln!(output, "{line}")?;
            }
            continue;
        }
        evaluate_line(session, &line, output, options)?;
    }
    output.flush()?;
    Ok(())
}

/// Evaluate one expression and print its outcome.
pub fn evaluate_line<W: Write>(
    session: &mut Session,
    expression: &str,
    output: &mut W,
    options: Options,
) -> Result<(), CliError> {
    if options.json {
        let report = session.report(expression);
        writeln!(output, "{}", serde_json::to_string(&report)?)?;
        return Ok(());
    }

    let result = match session.rpn(expression) {
        Ok(rpn) => {
            if options.show_rpn {
                writeln!(output, "{expression}  ->  {}", session.format_rpn(&rpn))?;
            }
            session.evaluate_rpn(&rpn)
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(value) => writeln!(output, "{expression}  ==  {value}")?,
        Err(err) => writeln!(output, "{expression}  ==  ERROR: {err}")?,
    }
    Ok(())
}
