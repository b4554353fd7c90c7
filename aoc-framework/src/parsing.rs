//! Utility functions and errors for parsing input.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

impl<E> ParseContextError<E>
where
    E: std::error::Error,
{
    /// Attach the string being parsed as context to an error.
    pub fn new(source: E, string: &str) -> Self {
        Self {
            string: string.to_owned(),
            source,
        }
    }
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string
        .parse::<F>()
        .map_err(|source| ParseContextError::new(source, string))
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    fn new<E>(line_index: usize, source: E) -> Self
    where
        E: Into<DynamicError>,
    {
        Self {
            line_index,
            source: source.into(),
        }
    }

    /// The zero based index of the line that failed to parse.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// Parse lines with a closure, mapping any line's error with an [`InvalidLine`].
///
/// The closure is passed the zero based line index and the line.
///
/// # Returns
///
/// An iterator of parsing results for each line.
pub fn parse_input_lines<T, E, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    E: Into<DynamicError>,
    F: FnMut(usize, &str) -> Result<T, E>,
{
    input
        .lines()
        .enumerate()
        .map(move |(index, line)| parser(index, line).map_err(|e| InvalidLine::new(index, e)))
}

/// A scanner over input lines, for input formatted as blocks of lines separated by empty lines.
///
/// Errors from parsing closures are mapped to [`InvalidLine`] with the line's index in the whole
/// input.
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    /// Create a scanner starting at the first line of the input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Skip over empty lines.
    ///
    /// # Returns
    ///
    /// The index of the next non-empty line, or `None` if the input is exhausted.
    pub fn skip_empty(&mut self) -> Option<usize> {
        while let Some((index, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                return Some(*index);
            }
            self.lines.next();
        }
        None
    }

    /// Parse the next line if it continues the current block.
    ///
    /// An empty line ends the block; it is consumed and `None` is returned. `None` is also
    /// returned when the input is exhausted.
    ///
    /// # Errors
    ///
    /// An error from the parser is returned as an [`InvalidLine`].
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        match self.lines.next() {
            Some((_, line)) if line.trim().is_empty() => Ok(None),
            Some((index, line)) => parser(index, line)
                .map(Some)
                .map_err(|e| InvalidLine::new(index, e)),
            None => Ok(None),
        }
    }

    /// Skip empty lines, then parse the next line.
    ///
    /// # Errors
    ///
    /// An error from the parser is returned as an [`InvalidLine`].
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnOnce(usize, &str) -> Result<T, E>,
    {
        if self.skip_empty().is_none() {
            return Ok(None);
        }
        self.next_in_sequence(parser)
    }

    /// Parse every remaining line of the current block, up to an empty line or the end of input.
    ///
    /// # Errors
    ///
    /// The first error from the parser is returned as an [`InvalidLine`].
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        E: Into<DynamicError>,
        F: FnMut(usize, &str) -> Result<T, E>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}
