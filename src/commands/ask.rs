//! One question, one answer.

use anyhow::{Context, Result};
use log::debug;
use std::io::{self, BufRead, Write};

use crate::chat::{Complete, CompletionError};

pub const QUESTION_PROMPT: &str = "Ask your question: ";
pub const ANSWER_PREFIX: &str = "Response: ";
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// Writes the question prompt and reads one line.
/// The line terminator is dropped; EOF yields an empty prompt. Invalid UTF-8
/// is replaced rather than rejected.
pub(crate) fn read_prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    writeln!(output, "{}", QUESTION_PROMPT)?;
    output.flush()?;

    let mut buf = Vec::new();
    input
        .read_until(b'\n', &mut buf)
        .context("Failed to read the question from standard input")?;

    let mut line = String::from_utf8_lossy(&buf).into_owned();
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Prints the answer, or the error when the completion failed.
pub(crate) fn write_outcome<W: Write>(
    output: &mut W,
    outcome: &Result<String, CompletionError>,
) -> Result<()> {
    match outcome {
        Ok(answer) => writeln!(output, "{}{}", ANSWER_PREFIX, answer)?,
        Err(e) => writeln!(output, "{}{}", ERROR_PREFIX, e)?,
    }
    output.flush()?;
    Ok(())
}

/// Core of [`ask`], generic over its input and output.
/// Completion failures are printed, not returned.
pub async fn ask_with_io<C, R, W>(completer: &C, input: &mut R, output: &mut W) -> Result<()>
where
    C: Complete,
    R: BufRead,
    W: Write,
{
    let prompt = read_prompt(input, output)?;
    debug!("Read prompt of {} bytes", prompt.len());

    let outcome = completer.complete(&prompt).await;
    write_outcome(output, &outcome)
}

/// Asks on stdin and answers on stdout.
#[tracing::instrument(skip(completer))]
pub async fn ask<C: Complete>(completer: &C) -> Result<()> {
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut stdout = io::stdout();
    ask_with_io(completer, &mut stdin_lock, &mut stdout).await
}
