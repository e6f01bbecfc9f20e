//! A module implementing tokenization of raw command lines.
//!
//! The grammar is deliberately flat: a line is split on the delimiter set
//! (space, tab, carriage return, newline) and empty fields are dropped. There is
//! no quoting, no substitution and no operators.

use std::ops::Index;
use std::slice;
use thiserror::Error;

/// Characters that separate tokens.
pub const DELIMITERS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Errors that can occur while splitting a line into tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// The line produced more tokens than the configured limit allows.
    #[error("too many arguments (limit {limit}, got {found})")]
    TooManyTokens { limit: usize, found: usize },
}

/// An ordered list of owned tokens: the program name followed by its arguments.
///
/// The list owns copies of its tokens and never borrows from the input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<String>,
}

impl TokenList {
    /// Number of tokens, program name included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The first token, conventionally the command name.
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Every token after the program name.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenList {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<String>> for TokenList {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

/// Splits command lines into [`TokenList`]s, bounded by a token limit.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    max_tokens: usize,
}

impl Tokenizer {
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Split `line` on [`DELIMITERS`], collapsing runs of delimiters.
    ///
    /// A line made only of delimiters yields an empty list. Lines with more than
    /// `max_tokens` fields are rejected as a whole; nothing is truncated.
    pub fn tokenize(&self, line: &str) -> Result<TokenList, TokenizeError> {
        let found = fields(line).count();
        if found > self.max_tokens {
            return Err(TokenizeError::TooManyTokens {
                limit: self.max_tokens,
                found,
            });
        }

        let mut tokens = Vec::with_capacity(found);
        tokens.extend(fields(line).map(str::to_owned));
        Ok(TokenList { tokens })
    }
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(DELIMITERS).filter(|field| !field.is_empty())
}
