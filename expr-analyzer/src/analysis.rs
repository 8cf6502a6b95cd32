use serde::{Serialize, Serializer};

use crate::error::AnalysisError;
use crate::ir::tree::ParseTreeNode;
use crate::parser::{self, lexer};
use crate::parser::lexer::Token;
use crate::symbols::SymbolTable;

/// Встроенные примеры выражений.
pub const EXAMPLES: &[&str] = &[
    "3+4*5",
    "a+b*c",
    "x*(y+z)",
    "(a+b)*c",
    "1+2+3+4",
    "1*2*3*4",
];

/// Результат анализа одной строки.
///
/// При ошибке лексера `tokens` пуст, а `symbol_table` отсутствует.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    #[serde(rename = "is_accepted")]
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_table: Option<SymbolTable>,
    #[serde(serialize_with = "error_text")]
    pub error: Option<AnalysisError>,
    #[serde(rename = "parse_tree", skip_serializing_if = "Option::is_none")]
    pub tree: Option<ParseTreeNode>,
}

fn error_text<S: Serializer>(error: &Option<AnalysisError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

impl AnalysisResult {
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_deref().unwrap_or(&[])
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Анализирует одну строку: отдельный проход лексера для списка токенов
/// и независимый проход парсера (свой лексер, своя таблица символов).
pub fn analyze(input: &str) -> AnalysisResult {
    let tokens = match lexer::tokenize(input) {
        Ok(tokens) => tokens,
        Err(error) => {
            tracing::debug!(input, %error, "lexing failed");
            return AnalysisResult {
                input: input.to_string(),
                tokens: None,
                accepted: false,
                symbol_table: None,
                error: Some(error),
                tree: None,
            };
        }
    };

    let outcome = parser::parse(input);
    tracing::debug!(input, tokens = tokens.len(), accepted = outcome.accepted, "analyzed");

    AnalysisResult {
        input: input.to_string(),
        tokens: Some(tokens),
        accepted: outcome.accepted,
        symbol_table: Some(outcome.symbols),
        error: outcome.error,
        tree: outcome.tree,
    }
}

/// Пакет выражений, по одному на строку. Пустые строки пропускаются,
/// порядок сохраняется.
pub fn analyze_batch(content: &str) -> Vec<AnalysisResult> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(analyze)
        .collect()
}
