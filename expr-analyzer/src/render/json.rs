use std::io::Write;

use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::error::ReportError;
use crate::ir::tree::ParseTreeNode;
use crate::parser::lexer::Token;
use crate::symbols::SymbolTable;

use super::{RenderOptions, Renderer};

/// Запись пишется прямо в поток, без промежуточного `serde_json::Value`:
/// глубокое дерево в `Value` нельзя ни сериализовать, ни удалить без рекурсии.
#[derive(Serialize)]
struct Record<'r> {
    input: &'r str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'r [Token]>,
    is_accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol_table: Option<&'r SymbolTable>,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_tree: Option<&'r ParseTreeNode>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Document<'r> {
    Single(Record<'r>),
    Batch { results: Vec<Record<'r>> },
}

/// Одно выражение - один объект, несколько - `{"results": [...]}`.
pub struct JsonRenderer {
    options: RenderOptions,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn record<'r>(&self, result: &'r AnalysisResult) -> Record<'r> {
        Record {
            input: &result.input,
            tokens: result.tokens.as_deref(),
            is_accepted: result.accepted,
            symbol_table: result.symbol_table.as_ref(),
            error: result.error_message(),
            parse_tree: result.tree.as_ref().filter(|_| self.options.show_tree),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, results: &[AnalysisResult], out: &mut dyn Write) -> Result<(), ReportError> {
        let document = match results {
            [single] => Document::Single(self.record(single)),
            _ => Document::Batch {
                results: results.iter().map(|r| self.record(r)).collect(),
            },
        };

        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)?;
        Ok(())
    }
}
