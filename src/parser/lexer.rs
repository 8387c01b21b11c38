use std::fmt::Display;

use itertools::PeekingNext;

use crate::grammar::{Nonterminal, Symbol};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Token {
    Arrow,
    Or,
    Comma,
    Symbol(Symbol),
    // Anything that is neither punctuation nor a letter of either case
    Stray(char)
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Arrow => write!(f, "->"),
            Token::Or => write!(f, "|"),
            Token::Comma => write!(f, ","),
            Token::Symbol(symbol) => write!(f, "{}", symbol),
            Token::Stray(c) => write!(f, "{}", c)
        }
    }
}

pub fn remove_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn lex_symbol(c: char) -> Token {
    if let Some(nonterminal) = Nonterminal::new(c) {
        Token::Symbol(Symbol::Nonterminal(nonterminal))
    } else if c.is_lowercase() {
        Token::Symbol(Symbol::Terminal(c))
    } else {
        Token::Stray(c)
    }
}

pub fn lex_arrow(chars: &mut impl PeekingNext<Item = char>) -> Token {
    chars.next(); // Consume the dash
    match chars.peeking_next(|&c| c == '>') {
        Some(_) => Token::Arrow,
        None => Token::Stray('-')
    }
}

// Whitespace is skipped, so "A - > b" lexes the same as "A->b"
pub fn lex_grammar(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let text = remove_whitespace(text);
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c == '-' {
            tokens.push(lex_arrow(&mut chars));
        } else {
            chars.next();
            tokens.push(match c {
                '|' => Token::Or,
                ',' => Token::Comma,
                _ => lex_symbol(c)
            });
        }
    }

    tokens
}
