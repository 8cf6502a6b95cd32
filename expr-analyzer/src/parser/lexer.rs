use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

use crate::error::AnalysisError;
use crate::span::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Id,
    Plus,       // +
    Mult,       // *
    LParen,     // (
    RParen,     // )
    EndOfInput,
}

impl TokenKind {
    /// Имя типа токена в отчётах и JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Plus => "PLUS",
            Self::Mult => "MULT",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::EndOfInput => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Токен с позицией его первого символа. После создания не меняется.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Текст токена как в исходнике; у `EndOfInput` пустой
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self { kind, lexeme: lexeme.into(), position }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "{} at {}", self.kind, self.position),
            _ => write!(f, "{} '{}' at {}", self.kind, self.lexeme, self.position),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 3)?;
        state.serialize_field("type", &self.kind)?;
        let value = match self.kind {
            TokenKind::EndOfInput => None,
            _ => Some(self.lexeme.as_str()),
        };
        state.serialize_field("value", &value)?;
        state.serialize_field("position", &self.position)?;
        state.end()
    }
}

/// Сканер с одним символом lookahead. Курсор (символы, строка, колонка)
/// принадлежит только этому экземпляру.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Следующий токен. После конца ввода всегда отдаёт `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token, AnalysisError> {
        while let Some(&ch) = self.chars.peek() {
            let position = self.position();

            let kind = match ch {
                c if c.is_whitespace() => {
                    self.bump();
                    continue;
                }
                c if c.is_alphanumeric() => {
                    let lexeme = self.scan_identifier();
                    let token = Token::new(TokenKind::Id, lexeme, position);
                    tracing::trace!(%token, "lexed");
                    return Ok(token);
                }
                '+' => TokenKind::Plus,
                '*' => TokenKind::Mult,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => {
                    return Err(AnalysisError::InvalidCharacter {
                        ch,
                        line: position.line,
                        column: position.column,
                    });
                }
            };

            self.bump();
            let token = Token::new(kind, ch, position);
            tracing::trace!(%token, "lexed");
            return Ok(token);
        }

        Ok(Token::new(TokenKind::EndOfInput, "", self.position()))
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    // Жадно: буквы и цифры, без '_'
    fn scan_identifier(&mut self) -> String {
        let mut ident = String::new();

        while let Some(&ch) = self.chars.peek() {
            if !ch.is_alphanumeric() {
                break;
            }
            ident.push(ch);
            self.bump();
        }

        ident
    }
}

/// Полный проход лексера. `EndOfInput` в результат не попадает.
pub fn tokenize(source: &str) -> Result<Vec<Token>, AnalysisError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        if token.is(TokenKind::EndOfInput) {
            break;
        }
        tokens.push(token);
    }

    Ok(tokens)
}
