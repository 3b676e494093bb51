//! Interactive prompting for values missing from the command line.

use crate::error::{InputError, Result};
use std::io::{BufRead, Write};

/// Reads answers line by line from `input`, writing prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns `value` if present, otherwise asks for it.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MissingValue` when input ends before an answer
    /// and `InputError::Prompt` if reading or writing fails.
    pub fn or_ask(&mut self, value: Option<String>, message: &str, field: &str) -> Result<String> {
        match value {
            Some(value) => Ok(value),
            None => self.ask(message, field),
        }
    }

    /// Returns `value` if present, otherwise asks for a length.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidNumber` for an answer that is not a
    /// non-negative integer.
    pub fn or_ask_length(
        &mut self,
        value: Option<usize>,
        message: &str,
        field: &str,
    ) -> Result<usize> {
        match value {
            Some(value) => Ok(value),
            None => {
                let answer = self.ask(message, field)?;
                Ok(parse_length(field, &answer)?)
            }
        }
    }

    fn ask(&mut self, message: &str, field: &str) -> Result<String> {
        write!(self.output, "{message}")
            .and_then(|()| self.output.flush())
            .map_err(|e| InputError::Prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InputError::Prompt(e.to_string()))?;
        if read == 0 {
            return Err(InputError::MissingValue {
                field: field.to_string(),
            }
            .into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).trim().to_string())
    }
}

/// Parses a sequence-length bound.
///
/// # Errors
///
/// Returns `InputError::InvalidNumber` naming `field` if `value` is not a
/// non-negative integer.
pub fn parse_length(field: &str, value: &str) -> std::result::Result<usize, InputError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| InputError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}
