//! Property-based tests for the lexer and parser.
//!
//! 1. Neither pass panics on arbitrary input
//! 2. Valid expressions are accepted and their tree leaves give back the tokens
//! 3. Parsing is deterministic
//! 4. Whitespace-only input is always rejected

use proptest::prelude::*;

use super::lexer::{tokenize, TokenKind};
use super::parse;
use crate::error::ErrorKind;

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,4}"
}

fn separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "", " ", "\n", "\t "]).prop_map(str::to_string)
}

/// Выражения, порождаемые грамматикой, с произвольными пробелами между токенами.
fn valid_expression() -> impl Strategy<Value = String> {
    let leaf = identifier();
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), separator(), inner.clone())
                .prop_map(|(l, s, r)| format!("{l}{s}+{s}{r}")),
            (inner.clone(), separator(), inner.clone())
                .prop_map(|(l, s, r)| format!("{l}{s}*{s}{r}")),
            (separator(), inner).prop_map(|(s, e)| format!("({s}{e}{s})")),
        ]
    })
}

proptest! {
    #[test]
    fn never_panics(input in "\\PC{0,200}") {
        let _ = tokenize(&input);
        let _ = parse(&input);
    }

    #[test]
    fn never_panics_on_grammar_alphabet(input in "[ab1+*() \n]{0,60}") {
        let outcome = parse(&input);
        prop_assert_eq!(outcome.accepted, outcome.error.is_none());
        prop_assert_eq!(outcome.accepted, outcome.tree.is_some());
    }

    #[test]
    fn valid_expressions_round_trip(input in valid_expression()) {
        let outcome = parse(&input);
        prop_assert!(outcome.accepted, "rejected {:?}: {:?}", input, outcome.error);

        let tokens = tokenize(&input).unwrap();
        let expected: Vec<(TokenKind, &str)> =
            tokens.iter().map(|t| (t.kind, t.lexeme.as_str())).collect();
        let tree = outcome.tree.unwrap();
        prop_assert_eq!(tree.terminals(), expected);
    }

    #[test]
    fn symbol_counts_match_identifier_tokens(input in valid_expression()) {
        let outcome = parse(&input);
        let tokens = tokenize(&input).unwrap();

        let ids = tokens.iter().filter(|t| t.kind == TokenKind::Id).count();
        let counted: usize = outcome.symbols.snapshot().values().map(|e| e.occurrence_count).sum();
        prop_assert_eq!(ids, counted);

        for entry in outcome.symbols.snapshot().values() {
            let first = tokens.iter().find(|t| t.lexeme == entry.value).unwrap();
            prop_assert_eq!(first.position, entry.first_position);
        }
    }

    #[test]
    fn parsing_is_deterministic(input in "[ab1+*() ]{0,40}") {
        let first = parse(&input);
        let second = parse(&input);
        prop_assert_eq!(first.accepted, second.accepted);
        prop_assert_eq!(first.error, second.error);
        prop_assert_eq!(first.tree, second.tree);
        prop_assert_eq!(first.symbols, second.symbols);
    }

    #[test]
    fn whitespace_only_rejected(input in "[ \t\r\n]{0,20}") {
        prop_assert!(tokenize(&input).unwrap().is_empty());
        let outcome = parse(&input);
        prop_assert!(!outcome.accepted);
        prop_assert_eq!(outcome.error.map(|e| e.kind()), Some(ErrorKind::UnexpectedToken));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn long_chains_accepted(
        operands in 1usize..20_000,
        op in prop::sample::select(vec!['+', '*']),
    ) {
        let mut input = String::from("a");
        for _ in 1..operands {
            input.push(op);
            input.push('a');
        }

        let outcome = parse(&input);
        prop_assert!(outcome.accepted);
        prop_assert_eq!(outcome.symbols.get("a").map(|e| e.occurrence_count), Some(operands));
        prop_assert_eq!(outcome.tree.map(|t| t.terminals().len()), Some(2 * operands - 1));
    }

    #[test]
    fn deep_nesting_accepted(depth in 1usize..5_000, close in any::<bool>()) {
        let closing = if close { depth } else { depth - 1 };
        let input = format!("{}a{}", "(".repeat(depth), ")".repeat(closing));

        let outcome = parse(&input);
        prop_assert_eq!(outcome.accepted, close);
        if !close {
            prop_assert_eq!(outcome.error.map(|e| e.kind()), Some(ErrorKind::UnexpectedToken));
        }
    }
}
