/*
    This module generates random words of a grammar's language
*/

use rand::prelude::*;
use std::collections::HashMap;

use crate::grammar::*;
use crate::error_handling::*;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    #[error("No definition for nonterminal `{0}`")]
    UndefinedNonterminal(Nonterminal),
    // Every derivation from this nonterminal recurses forever
    #[error("`{0}` never derives a finite word")]
    Unproductive(Nonterminal),
}

impl ErrorType for GenerateErrorType {}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

// Height of the shortest derivation tree for every productive nonterminal
type Heights = HashMap<Nonterminal, usize>;

fn alternative_height(alternative: &Alternative, heights: &Heights) -> Option<usize> {
    match alternative {
        Alternative::Terminal(_) => Some(1),
        Alternative::Pair(a, b) => Some(1 + heights.get(a)?.max(heights.get(b)?)),
    }
}

fn shortest_heights(grammar: &Grammar) -> Heights {
    let mut heights = Heights::new();

    // Heights only ever shrink, so this reaches a fixed point
    loop {
        let mut changed = false;
        for production in grammar.productions() {
            let best = production.alternatives.iter()
                .filter_map(|alternative| alternative_height(alternative, &heights))
                .min();
            if let Some(height) = best {
                if heights.get(&production.lhs).map_or(true, |&h| height < h) {
                    heights.insert(production.lhs, height);
                    changed = true;
                }
            }
        }
        if !changed {
            return heights;
        }
    }
}

struct Generator<'a, R: Rng> {
    grammar: &'a Grammar,
    heights: Heights,
    max_depth: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng> Generator<'a, R> {
    fn generate_nonterminal(&mut self, nonterminal: Nonterminal, depth: usize, out: &mut String) -> Result<(), GenerateErrorType> {
        let grammar = self.grammar;
        let alternatives = grammar
            .alternatives(nonterminal)
            .ok_or(GenerateErrorType::UndefinedNonterminal(nonterminal))?;
        let &height = self.heights
            .get(&nonterminal)
            .ok_or(GenerateErrorType::Unproductive(nonterminal))?;

        // Past the depth limit only shortest derivations are followed, and
        // their children are strictly shorter, so generation stops
        let candidates: Vec<&Alternative> = alternatives.iter()
            .filter(|alternative| match alternative_height(alternative, &self.heights) {
                Some(h) => depth < self.max_depth || h == height,
                None => false,
            })
            .collect();

        match candidates.choose(&mut *self.rng) {
            Some(Alternative::Terminal(c)) => out.push(*c),
            Some(Alternative::Pair(a, b)) => {
                let (a, b) = (*a, *b);
                self.generate_nonterminal(a, depth + 1, out)?;
                self.generate_nonterminal(b, depth + 1, out)?;
            }
            None => return Err(GenerateErrorType::Unproductive(nonterminal)),
        }

        Ok(())
    }
}

/// Generates a random word derived from the start symbol.
pub fn generate(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    generate_with_override(grammar, START_SYMBOL, rng, max_depth)
}

// Generates a random word derived from the given nonterminal
pub fn generate_with_override(grammar: &Grammar, start: Nonterminal, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    let mut generator = Generator {
        grammar,
        heights: shortest_heights(grammar),
        max_depth,
        rng,
    };

    let mut word = String::new();
    generator.generate_nonterminal(start, 0, &mut word).map_err(|error| GenerateError {
        location: Location::Position(word.chars().count()),
        error
    })?;

    Ok(word)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;

    use super::*;
    use crate::parser::parse;
    use crate::recognizer::recognize;

    fn nt(c: char) -> Nonterminal {
        Nonterminal::new(c).unwrap()
    }

    #[test]
    fn heights() {
        let grammar = parse("S -> AB|SS, A -> a, B -> AA|SB, C -> CC").unwrap();
        let heights = shortest_heights(&grammar);

        assert_eq!(heights.get(&nt('A')), Some(&1));
        assert_eq!(heights.get(&nt('B')), Some(&2));
        assert_eq!(heights.get(&nt('S')), Some(&3));
        assert_eq!(heights.get(&nt('C')), None);
    }

    #[test]
    fn generated_words_are_members() {
        let grammars = [
            "S -> AB|BC, A -> BA|a, B -> CC|b, C -> AB|a",
            "S -> AB|BC, A -> SA|a, B -> BB|b",
            "S -> AB|SS, A -> a, B -> b",
        ];

        for text in grammars {
            let grammar = parse(text).unwrap();
            let mut rng = StdRng::seed_from_u64(7);
            for _ in 0..50 {
                let word = generate(&grammar, &mut rng, 6).unwrap();
                assert!(recognize(&grammar, &word).unwrap().accepted, "`{}` from `{}`", word, text);
            }
        }
    }

    #[test]
    fn depth_limit_terminates_recursion() {
        // Without the limit S -> SS would usually grow forever
        let grammar = parse("S -> SS|a").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let word = generate(&grammar, &mut rng, 3).unwrap();
            assert!(word.len() <= 8, "`{}` is too long", word);
        }
    }

    #[test]
    fn override_start() {
        let grammar = parse("S -> AB, A -> a, B -> b").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate_with_override(&grammar, nt('B'), &mut rng, 4), Ok("b".to_string()));
    }

    #[test]
    fn generate_failures() {
        let mut rng = StdRng::seed_from_u64(0);

        let grammar = parse("S -> AB, A -> a").unwrap();
        assert_eq!(generate(&grammar, &mut rng, 4).unwrap_err().error, GenerateErrorType::Unproductive(nt('S')));

        let grammar = parse("A -> a").unwrap();
        assert_eq!(generate(&grammar, &mut rng, 4).unwrap_err().error, GenerateErrorType::UndefinedNonterminal(nt('S')));

        let grammar = parse("S -> SS").unwrap();
        assert_eq!(generate(&grammar, &mut rng, 4).unwrap_err().error, GenerateErrorType::Unproductive(nt('S')));
    }
}
