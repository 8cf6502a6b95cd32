pub mod lexer;
pub mod parser;

use crate::error::AnalysisError;
use crate::ir::tree::ParseTreeNode;
use crate::symbols::SymbolTable;

use lexer::Lexer;

/// Итог одного прохода парсера.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub tree: Option<ParseTreeNode>,
    pub accepted: bool,
    pub error: Option<AnalysisError>,
    pub symbols: SymbolTable,
}

impl ParseOutcome {
    fn rejected(error: AnalysisError, symbols: SymbolTable) -> Self {
        Self {
            tree: None,
            accepted: false,
            error: Some(error),
            symbols,
        }
    }
}

/// Главная функция парсера - из текста в дерево разбора
pub fn parse(source: &str) -> ParseOutcome {
    match parser::Parser::new(Lexer::new(source)) {
        Ok(parser) => parser.parse(),
        Err(error) => ParseOutcome::rejected(error, SymbolTable::new()),
    }
}

#[cfg(test)]
mod property_tests;
