/*
    This module is for storing and inspecting CNF grammars
*/

use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;

// The nonterminal every membership query starts from
pub const START_SYMBOL: Nonterminal = Nonterminal(b'S');

/// An uppercase ASCII letter on either side of a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nonterminal(u8);

impl Nonterminal {
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_uppercase().then(|| Nonterminal(c as u8))
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    fn bit(self) -> u32 {
        1 << (self.0 - b'A')
    }
}

impl Display for Nonterminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// The base unit in a grammar rule, classified once when the text is lexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(Nonterminal),
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{}", c),
            Symbol::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

// A right-hand side that is already known to be in Chomsky normal form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alternative {
    Terminal(char),
    Pair(Nonterminal, Nonterminal),
}

impl Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alternative::Terminal(c) => write!(f, "{}", c),
            Alternative::Pair(a, b) => write!(f, "{}{}", a, b),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    pub lhs: Nonterminal,
    pub alternatives: Vec<Alternative>,
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.alternatives.iter().join("|"))
    }
}

/// The terminals that appear as single-symbol right-hand sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alphabet(BTreeSet<char>);

impl Alphabet {
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Alphabet(iter.into_iter().collect())
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

/// A set of nonterminals, one bit per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NonterminalSet(u32);

impl NonterminalSet {
    pub fn new() -> Self {
        NonterminalSet(0)
    }

    /// Adds `n`, returning whether it was absent before.
    pub fn insert(&mut self, n: Nonterminal) -> bool {
        let absent = !self.contains(n);
        self.0 |= n.bit();
        absent
    }

    pub fn contains(&self, n: Nonterminal) -> bool {
        self.0 & n.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    // Alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = Nonterminal> {
        let bits = self.0;
        (b'A'..=b'Z')
            .map(Nonterminal)
            .filter(move |n| bits & n.bit() != 0)
    }
}

impl FromIterator<Nonterminal> for NonterminalSet {
    fn from_iter<I: IntoIterator<Item = Nonterminal>>(iter: I) -> Self {
        let mut set = NonterminalSet::new();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

impl Display for NonterminalSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    productions: Vec<Production>,
    alphabet: Alphabet,
}

impl Grammar {
    // Merges productions sharing a left-hand side, keeping first-appearance
    // order and dropping repeated alternatives
    pub fn new(productions: impl IntoIterator<Item = Production>) -> Self {
        let mut merged: Vec<Production> = Vec::new();
        for production in productions {
            let index = match merged.iter().position(|p| p.lhs == production.lhs) {
                Some(index) => index,
                None => {
                    merged.push(Production { lhs: production.lhs, alternatives: Vec::new() });
                    merged.len() - 1
                }
            };
            let target = &mut merged[index];
            for alternative in production.alternatives {
                if !target.alternatives.contains(&alternative) {
                    target.alternatives.push(alternative);
                }
            }
        }

        let alphabet = merged.iter()
            .flat_map(|p| p.alternatives.iter())
            .filter_map(|alternative| match alternative {
                Alternative::Terminal(c) => Some(*c),
                Alternative::Pair(..) => None,
            })
            .collect();

        Grammar { productions: merged, alphabet }
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn alternatives(&self, lhs: Nonterminal) -> Option<&[Alternative]> {
        self.productions.iter()
            .find(|p| p.lhs == lhs)
            .map(|p| &p.alternatives[..])
    }

    pub fn defines(&self, lhs: Nonterminal) -> bool {
        self.alternatives(lhs).is_some()
    }

    // Every nonterminal L with a production L -> c
    pub fn producers_of(&self, c: char) -> NonterminalSet {
        self.productions.iter()
            .filter(|p| p.alternatives.contains(&Alternative::Terminal(c)))
            .map(|p| p.lhs)
            .collect()
    }

    // Every production L -> AB as (L, A, B)
    pub fn pairs(&self) -> impl Iterator<Item = (Nonterminal, Nonterminal, Nonterminal)> + '_ {
        self.productions.iter().flat_map(|p| {
            p.alternatives.iter().filter_map(move |alternative| match alternative {
                Alternative::Pair(a, b) => Some((p.lhs, *a, *b)),
                Alternative::Terminal(_) => None,
            })
        })
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.productions.iter().join("\n"))
    }
}
