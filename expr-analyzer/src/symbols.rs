use std::collections::HashMap;

use serde::Serialize;

use crate::parser::lexer::{Token, TokenKind};
use crate::span::Position;

/// Область видимости одна, плоская.
pub const GLOBAL_SCOPE: &str = "global";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolEntry {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    pub first_position: Position,
    #[serde(rename = "occurrences")]
    pub occurrence_count: usize,
    pub scope: &'static str,
}

/// Накопитель вхождений идентификаторов, ключ - лексема (с учётом регистра).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Всё, кроме `Id`, игнорируется.
    pub fn record(&mut self, token: &Token) {
        if token.kind != TokenKind::Id {
            return;
        }

        match self.symbols.get_mut(&token.lexeme) {
            Some(entry) => entry.occurrence_count += 1,
            None => {
                self.symbols.insert(
                    token.lexeme.clone(),
                    SymbolEntry {
                        kind: TokenKind::Id,
                        value: token.lexeme.clone(),
                        first_position: token.position,
                        occurrence_count: 1,
                        scope: GLOBAL_SCOPE,
                    },
                );
            }
        }
    }

    pub fn get(&self, lexeme: &str) -> Option<&SymbolEntry> {
        self.symbols.get(lexeme)
    }

    pub fn snapshot(&self) -> &HashMap<String, SymbolEntry> {
        &self.symbols
    }

    /// Записи, отсортированные по лексеме - для вывода.
    pub fn sorted(&self) -> Vec<&SymbolEntry> {
        let mut entries: Vec<&SymbolEntry> = self.symbols.values().collect();
        entries.sort_by(|a, b| a.value.cmp(&b.value));
        entries
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(lexeme: &str, column: usize) -> Token {
        Token::new(TokenKind::Id, lexeme, Position::new(1, column))
    }

    #[test]
    fn test_first_occurrence() {
        let mut table = SymbolTable::new();
        table.record(&id("a", 1));

        let entry = table.get("a").unwrap();
        assert_eq!(entry.occurrence_count, 1);
        assert_eq!(entry.first_position, Position::new(1, 1));
        assert_eq!(entry.scope, GLOBAL_SCOPE);
        assert_eq!(entry.kind, TokenKind::Id);
    }

    #[test]
    fn test_repeat_keeps_first_position() {
        let mut table = SymbolTable::new();
        table.record(&id("a", 1));
        table.record(&id("a", 3));
        table.record(&id("a", 9));

        let entry = table.get("a").unwrap();
        assert_eq!(entry.occurrence_count, 3);
        assert_eq!(entry.first_position, Position::new(1, 1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_non_identifiers_ignored() {
        let mut table = SymbolTable::new();
        table.record(&Token::new(TokenKind::Plus, "+", Position::new(1, 2)));
        table.record(&Token::new(TokenKind::EndOfInput, "", Position::new(1, 3)));

        assert!(table.is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let mut table = SymbolTable::new();
        table.record(&id("x", 1));
        table.record(&id("X", 3));

        assert_eq!(table.len(), 2);
        let sorted: Vec<&str> = table.sorted().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(sorted, vec!["X", "x"]);
    }

    #[test]
    fn test_serialization_shape() {
        let mut table = SymbolTable::new();
        table.record(&id("b", 5));
        table.record(&id("b", 7));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "b": {
                    "type": "ID",
                    "value": "b",
                    "first_position": [1, 5],
                    "occurrences": 2,
                    "scope": "global"
                }
            })
        );
    }
}
