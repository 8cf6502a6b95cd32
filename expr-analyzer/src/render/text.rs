use std::io::Write;

use crate::analysis::AnalysisResult;
use crate::error::ReportError;
use crate::ir::tree::ParseTreeNode;

use super::{RenderOptions, Renderer};

pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn render_one(&self, result: &AnalysisResult, out: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(out, "Expression: {}", result.input)?;

        match &result.error {
            None => writeln!(out, "Status: ACCEPTED")?,
            Some(error) => {
                writeln!(out, "Status: REJECTED")?;
                writeln!(out, "Error: {}", error)?;
            }
        }

        if let Some(tokens) = &result.tokens {
            writeln!(out, "Tokens:")?;
            writeln!(out, "  {:<4} {:<8} {:<12} {}", "#", "TYPE", "LEXEME", "POSITION")?;
            for (i, token) in tokens.iter().enumerate() {
                writeln!(
                    out,
                    "  {:<4} {:<8} {:<12} {}:{}",
                    i + 1,
                    token.kind,
                    token.lexeme,
                    token.position.line,
                    token.position.column
                )?;
            }
        }

        if let Some(symbols) = &result.symbol_table {
            writeln!(out, "Symbols:")?;
            if symbols.is_empty() {
                writeln!(out, "  (none)")?;
            } else {
                writeln!(out, "  {:<12} {:<6} {:<8} {}", "LEXEME", "COUNT", "FIRST", "SCOPE")?;
                for entry in symbols.sorted() {
                    let first = format!("{}:{}", entry.first_position.line, entry.first_position.column);
                    writeln!(
                        out,
                        "  {:<12} {:<6} {:<8} {}",
                        entry.value, entry.occurrence_count, first, entry.scope
                    )?;
                }
            }
        }

        if self.options.show_tree {
            if let Some(tree) = &result.tree {
                writeln!(out, "Parse tree:")?;
                write_tree(tree, out)?;
            }
        }

        Ok(())
    }
}

impl Renderer for TextRenderer {
    fn render(&self, results: &[AnalysisResult], out: &mut dyn Write) -> Result<(), ReportError> {
        for (i, result) in results.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            self.render_one(result, out)?;
        }
        Ok(())
    }
}

fn node_line(node: &ParseTreeNode) -> String {
    if node.label.is_nonterminal() {
        return node.label.to_string();
    }

    match &node.value {
        Some(value) => format!("{} ({})", node.label, value),
        None => node.label.to_string(),
    }
}

// Обход в прямом порядке по явному стеку: глубина дерева не ограничена
fn write_tree(root: &ParseTreeNode, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", node_line(root))?;

    // (узел, уровень, последний ли среди братьев)
    let mut stack: Vec<(&ParseTreeNode, usize, bool)> = Vec::new();
    push_children(&mut stack, root, 1);

    // для каждого уровня выше: остались ли у предка младшие братья
    let mut open: Vec<bool> = Vec::new();

    while let Some((node, level, last)) = stack.pop() {
        open.truncate(level - 1);

        let mut line = String::new();
        for &more in &open {
            line.push_str(if more { "│   " } else { "    " });
        }
        line.push_str(if last { "└── " } else { "├── " });
        line.push_str(&node_line(node));
        writeln!(out, "{}", line)?;

        open.push(!last);
        push_children(&mut stack, node, level + 1);
    }

    Ok(())
}

fn push_children<'t>(stack: &mut Vec<(&'t ParseTreeNode, usize, bool)>, node: &'t ParseTreeNode, level: usize) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate().rev() {
        stack.push((child, level, i == last));
    }
}
