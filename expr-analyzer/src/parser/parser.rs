use std::mem;

use crate::error::{AnalysisError, Expected};
use crate::ir::tree::{Label, ParseTreeNode};
use crate::symbols::SymbolTable;
use crate::{STACK_RED_ZONE, STACK_SEGMENT};
use super::lexer::{Lexer, Token, TokenKind};
use super::ParseOutcome;

/// Предиктивный разбор сверху вниз по LL(1) грамматике:
///
/// ```text
/// E  → T E'
/// E' → + T E' | ε
/// T  → F T'
/// T' → * F T' | ε
/// F  → ( E ) | Id
/// ```
///
/// Токены берутся у лексера по одному, lookahead всегда ровно один.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, AnalysisError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            symbols: SymbolTable::new(),
        })
    }

    /// Разбирает весь ввод. Ошибка обрывает разбор, дерево при этом не отдаётся.
    pub fn parse(mut self) -> ParseOutcome {
        match self.parse_input() {
            Ok(tree) => {
                tracing::debug!(nodes = tree.node_count(), "input accepted");
                ParseOutcome {
                    tree: Some(tree),
                    accepted: true,
                    error: None,
                    symbols: self.symbols,
                }
            }
            Err(error) => {
                tracing::debug!(%error, "input rejected");
                ParseOutcome::rejected(error, self.symbols)
            }
        }
    }

    fn parse_input(&mut self) -> Result<ParseTreeNode, AnalysisError> {
        let root = self.parse_expr()?;

        // E разобрано целиком; всё, что осталось до конца ввода - лишнее
        if !self.current.is(TokenKind::EndOfInput) {
            return Err(AnalysisError::TrailingInput {
                found: self.current.clone(),
            });
        }

        Ok(root)
    }

    /// E → T E'
    ///
    /// Единственная точка входа в рекурсию `F → ( E )`: при нехватке стека
    /// он наращивается в куче, так что глубина скобок ограничена только памятью.
    fn parse_expr(&mut self) -> Result<ParseTreeNode, AnalysisError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || -> Result<ParseTreeNode, AnalysisError> {
            let mut node = ParseTreeNode::nonterminal(Label::E);
            node.push(self.parse_term()?);
            node.push(self.parse_expr_prime()?);
            Ok(node)
        })
    }

    /// E' → + T E' | ε
    ///
    /// Правая рекурсия разворачивается в цикл, цепочка E' собирается справа.
    fn parse_expr_prime(&mut self) -> Result<ParseTreeNode, AnalysisError> {
        let mut links = Vec::new();

        while self.current.is(TokenKind::Plus) {
            tracing::debug!(position = %self.current.position, "E' → + T E'");
            let plus = self.eat(TokenKind::Plus)?;
            let term = self.parse_term()?;
            links.push((ParseTreeNode::terminal(&plus), term));
        }

        tracing::debug!(position = %self.current.position, "E' → ε");
        Ok(fold_chain(Label::EPrime, links))
    }

    /// T → F T'
    fn parse_term(&mut self) -> Result<ParseTreeNode, AnalysisError> {
        let mut node = ParseTreeNode::nonterminal(Label::T);
        node.push(self.parse_factor()?);
        node.push(self.parse_term_prime()?);
        Ok(node)
    }

    /// T' → * F T' | ε
    fn parse_term_prime(&mut self) -> Result<ParseTreeNode, AnalysisError> {
        let mut links = Vec::new();

        while self.current.is(TokenKind::Mult) {
            tracing::debug!(position = %self.current.position, "T' → * F T'");
            let mult = self.eat(TokenKind::Mult)?;
            let factor = self.parse_factor()?;
            links.push((ParseTreeNode::terminal(&mult), factor));
        }

        tracing::debug!(position = %self.current.position, "T' → ε");
        Ok(fold_chain(Label::TPrime, links))
    }

    /// F → ( E ) | Id
    fn parse_factor(&mut self) -> Result<ParseTreeNode, AnalysisError> {
        let mut node = ParseTreeNode::nonterminal(Label::F);

        match self.current.kind {
            TokenKind::LParen => {
                tracing::debug!(position = %self.current.position, "F → ( E )");
                let lparen = self.eat(TokenKind::LParen)?;
                node.push(ParseTreeNode::terminal(&lparen));
                node.push(self.parse_expr()?);
                let rparen = self.eat(TokenKind::RParen)?;
                node.push(ParseTreeNode::terminal(&rparen));
            }
            TokenKind::Id => {
                tracing::debug!(position = %self.current.position, "F → Id");
                let id = self.eat(TokenKind::Id)?;
                node.push(ParseTreeNode::terminal(&id));
            }
            found => {
                return Err(AnalysisError::UnexpectedToken {
                    expected: Expected::Factor,
                    found,
                    position: self.current.position,
                });
            }
        }

        Ok(node)
    }

    /// Съедает lookahead нужного типа. Идентификатор попадает в таблицу
    /// символов здесь и только здесь.
    fn eat(&mut self, expected: TokenKind) -> Result<Token, AnalysisError> {
        if !self.current.is(expected) {
            return Err(AnalysisError::UnexpectedToken {
                expected: Expected::Kind(expected),
                found: self.current.kind,
                position: self.current.position,
            });
        }

        self.symbols.record(&self.current);
        let next = self.lexer.next_token()?;
        let token = mem::replace(&mut self.current, next);
        tracing::trace!(%token, "consumed");
        Ok(token)
    }
}

/// Собирает `X → op operand X | ε` из звеньев слева направо:
/// последнее звено оказывается самым глубоким, внизу ε.
fn fold_chain(label: Label, links: Vec<(ParseTreeNode, ParseTreeNode)>) -> ParseTreeNode {
    let mut tail = ParseTreeNode::nonterminal(label);
    tail.push(ParseTreeNode::epsilon());

    for (op, operand) in links.into_iter().rev() {
        let mut node = ParseTreeNode::nonterminal(label);
        node.push(op);
        node.push(operand);
        node.push(tail);
        tail = node;
    }

    tail
}
