use std::fmt;
use std::mem;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::parser::lexer::{Token, TokenKind};
use crate::{STACK_RED_ZONE, STACK_SEGMENT};

/// Метка узла: нетерминал грамматики, терминал или ε.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// E → T E'
    E,
    /// E' → + T E' | ε
    EPrime,
    /// T → F T'
    T,
    /// T' → * F T' | ε
    TPrime,
    /// F → ( E ) | Id
    F,
    Terminal(TokenKind),
    Epsilon,
}

impl Label {
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Self::E | Self::EPrime | Self::T | Self::TPrime | Self::F)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::E => f.write_str("E"),
            Self::EPrime => f.write_str("E'"),
            Self::T => f.write_str("T"),
            Self::TPrime => f.write_str("T'"),
            Self::F => f.write_str("F"),
            Self::Terminal(kind) => write!(f, "{}", kind),
            Self::Epsilon => f.write_str("ε"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Узел дерева разбора. Дети в порядке вывода, слева направо.
///
/// Глубина дерева растёт с длиной цепочек `+`/`*` и вложенностью скобок,
/// поэтому обходы ниже идут по явному стеку, а не рекурсией.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTreeNode {
    pub label: Label,
    /// Лексема, только у терминалов
    pub value: Option<String>,
    pub children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    pub fn nonterminal(label: Label) -> Self {
        Self { label, value: None, children: Vec::new() }
    }

    pub fn terminal(token: &Token) -> Self {
        Self {
            label: Label::Terminal(token.kind),
            value: Some(token.lexeme.clone()),
            children: Vec::new(),
        }
    }

    pub fn epsilon() -> Self {
        Self { label: Label::Epsilon, value: None, children: Vec::new() }
    }

    pub fn push(&mut self, child: ParseTreeNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Все листья слева направо, включая ε.
    pub fn leaves(&self) -> Vec<&ParseTreeNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                out.push(node);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }

        out
    }

    /// Листья-терминалы без ε: (тип, лексема).
    pub fn terminals(&self) -> Vec<(TokenKind, &str)> {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| match leaf.label {
                Label::Terminal(kind) => Some((kind, leaf.value.as_deref().unwrap_or(""))),
                _ => None,
            })
            .collect()
    }

    /// Выражение, собранное обратно из листьев (без пробелов).
    pub fn yield_text(&self) -> String {
        self.terminals().into_iter().map(|(_, lexeme)| lexeme).collect()
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }

        count
    }

    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }

        deepest
    }
}

// Рекурсивный drop на цепочке в сотни тысяч узлов переполнит стек
impl Drop for ParseTreeNode {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Serialize for ParseTreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("ParseTreeNode", 3)?;
            state.serialize_field("name", &self.label)?;
            state.serialize_field("value", &self.value)?;
            state.serialize_field("children", &self.children)?;
            state.end()
        })
    }
}
