use std::fmt;

use thiserror::Error;

use crate::parser::lexer::{Token, TokenKind};
use crate::span::Position;

/// Что парсер ожидал увидеть на месте lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    /// `F → ( E ) | Id`: подходит либо `(`, либо идентификатор
    Factor,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{}", kind),
            Self::Factor => write!(f, "'(' or identifier"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid character '{ch}' at line {line}, column {column}")]
    InvalidCharacter { ch: char, line: usize, column: usize },

    #[error("Syntax error: expected {expected}, found {found} at {position}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        position: Position,
    },

    #[error("Syntax error: unexpected trailing input {found}")]
    TrailingInput { found: Token },
}

/// Вид ошибки без полей, чтобы было удобно матчить.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCharacter,
    UnexpectedToken,
    TrailingInput,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Self::TrailingInput { .. } => ErrorKind::TrailingInput,
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
}
