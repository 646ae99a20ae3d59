//! Shell-style splitting of an input line
//!
//! Follows POSIX shell quoting: single quotes are literal, double quotes
//! allow `\"` and `\\` escapes, a backslash outside quotes escapes the next
//! character, and adjacent quoted and unquoted pieces join into one word.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("No closing quotation")]
    UnclosedQuote,

    #[error("No escaped character")]
    TrailingEscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Unquoted,
    Single,
    Double,
}

/// Split a line into words
pub fn split(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut word = String::new();
    // A word exists once any quote or character was seen, so `''` yields ""
    let mut in_word = false;
    let mut mode = Mode::Unquoted;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match mode {
            Mode::Unquoted => match c {
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut word));
                        in_word = false;
                    }
                }
                '\'' => {
                    mode = Mode::Single;
                    in_word = true;
                }
                '"' => {
                    mode = Mode::Double;
                    in_word = true;
                }
                '\\' => {
                    let escaped = chars.next().ok_or(TokenizeError::TrailingEscape)?;
                    word.push(escaped);
                    in_word = true;
                }
                c => {
                    word.push(c);
                    in_word = true;
                }
            },
            Mode::Single => match c {
                '\'' => mode = Mode::Unquoted,
                c => word.push(c),
            },
            Mode::Double => match c {
                '"' => mode = Mode::Unquoted,
                '\\' => {
                    let next = chars.next().ok_or(TokenizeError::UnclosedQuote)?;
                    if next != '"' && next != '\\' {
                        word.push('\\');
                    }
                    word.push(next);
                }
                c => word.push(c),
            },
        }
    }

    if mode != Mode::Unquoted {
        return Err(TokenizeError::UnclosedQuote);
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}
