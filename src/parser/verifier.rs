use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::{Alternative, Grammar, Nonterminal, Production, Symbol, START_SYMBOL};
use super::lexer::Token;
use super::{GrammarError, GrammarErrorType, GrammarErrors, GrammarResult, Rule};

// Accepts exactly one terminal or exactly two nonterminals
pub fn cnf_alternative(tokens: &[Token]) -> Option<Alternative> {
    match tokens {
        [Token::Symbol(Symbol::Terminal(c))] => Some(Alternative::Terminal(*c)),
        [Token::Symbol(Symbol::Nonterminal(a)), Token::Symbol(Symbol::Nonterminal(b))] => Some(Alternative::Pair(*a, *b)),
        _ => None
    }
}

fn get_rule_violations(rule: &Rule) -> GrammarErrors {
    rule.rewrite.iter()
        .filter(|tokens| cnf_alternative(tokens).is_none())
        .map(|tokens| GrammarError {
            location: rule.location.clone(),
            error: GrammarErrorType::NotCnf(tokens.iter().join(""))
        })
        .collect()
}

fn production_from_rule(rule: &Rule) -> Production {
    Production {
        lhs: rule.lhs,
        alternatives: rule.rewrite.iter().filter_map(|tokens| cnf_alternative(tokens)).collect()
    }
}

// Checks every alternative of every rule before giving up
pub(super) fn verify_rules(rules: &[Rule]) -> GrammarResult<Vec<Production>> {
    let errors = rules.iter()
        .flat_map(get_rule_violations)
        .collect_vec();

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(rules.iter().map(production_from_rule).collect())
    }
}

// Things that are legal CNF but probably not what the author meant
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Diagnostic {
    // No production has the start symbol on its left, so nothing is accepted
    MissingStart,
    // Used on a right-hand side but never defined, so it derives nothing
    UndefinedNonterminal(Nonterminal),
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MissingStart => write!(f, "No production for the start symbol `{}`", START_SYMBOL),
            Diagnostic::UndefinedNonterminal(n) => write!(f, "Could not find definition for `{}`", n),
        }
    }
}

pub fn diagnose(grammar: &Grammar) -> Vec<Diagnostic> {
    let missing_start = (!grammar.defines(START_SYMBOL)).then_some(Diagnostic::MissingStart);

    let undefined = grammar.pairs()
        .flat_map(|(_, a, b)| [a, b])
        .filter(|n| !grammar.defines(*n))
        .unique()
        .map(Diagnostic::UndefinedNonterminal);

    missing_start.into_iter().chain(undefined).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::lex_grammar;
    use crate::parser::parse;

    fn nt(c: char) -> Nonterminal {
        Nonterminal::new(c).unwrap()
    }

    #[test]
    fn cnf_shapes() {
        assert_eq!(cnf_alternative(&lex_grammar("a")), Some(Alternative::Terminal('a')));
        assert_eq!(cnf_alternative(&lex_grammar("AB")), Some(Alternative::Pair(nt('A'), nt('B'))));

        for text in ["", "A", "ab", "aB", "Ab", "ABC", "1", "A1"] {
            assert_eq!(cnf_alternative(&lex_grammar(text)), None, "`{}` should be rejected", text);
        }
    }

    #[test]
    fn diagnose_clean_grammar() {
        let grammar = parse("S -> AB, A -> a, B -> b").unwrap();
        assert_eq!(diagnose(&grammar), vec![]);
    }

    #[test]
    fn diagnose_undefined_and_missing_start() {
        let grammar = parse("A -> BC|CB|a, B -> b").unwrap();
        assert_eq!(diagnose(&grammar), vec![
            Diagnostic::MissingStart,
            Diagnostic::UndefinedNonterminal(nt('C'))
        ]);
    }
}
