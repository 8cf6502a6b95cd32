pub mod json;
pub mod text;

use std::io::Write;

use crate::analysis::AnalysisResult;
use crate::error::ReportError;

pub trait Renderer {
    fn render(&self, results: &[AnalysisResult], out: &mut dyn Write) -> Result<(), ReportError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Выводить ли дерево разбора
    pub show_tree: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { show_tree: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    // Dot,
}

impl Format {
    pub fn all() -> Vec<Self> {
        vec![Self::Text, Self::Json]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Text => "Token table, symbol table and ASCII parse tree",
            Self::Json => "JSON records, one per expression",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|f| f.name() == name)
    }

    pub fn create(&self, options: RenderOptions) -> Box<dyn Renderer> {
        match self {
            Self::Text => Box::new(text::TextRenderer::new(options)),
            Self::Json => Box::new(json::JsonRenderer::new(options)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lookup() {
        assert_eq!(Format::from_name("json"), Some(Format::Json));
        assert_eq!(Format::from_name("text"), Some(Format::Text));
        assert_eq!(Format::from_name("dot"), None);
    }
}
