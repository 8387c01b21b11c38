/*
    This module decides membership with the CYK algorithm
*/

use crate::error_handling::*;
use crate::grammar::*;
use crate::parser::remove_whitespace;
use crate::table::RecognitionTable;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecognizeErrorType {
    // A character of the word is not in the alphabet
    #[error("The letter `{0}` is in the word but not in the alphabet")]
    UnknownSymbol(char),
    // CNF cannot derive the empty word
    #[error("The word is empty")]
    EmptyWord,
}

impl ErrorType for RecognizeErrorType {}

pub type RecognizeError = Error<RecognizeErrorType>;
pub type RecognizeResult<T> = Result<T, RecognizeError>;

// How a nonterminal entered a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    // L -> c for the character at this position
    Terminal(char),
    // L -> AB with A over start..=split and B over split+1..=end
    Split { split: usize, left: Nonterminal, right: Nonterminal },
}

/// Watches a table being built. Only new entries are reported, in the order
/// they are added, so an observer can replay the construction.
pub trait Observer {
    fn derived(&mut self, _start: usize, _end: usize, _nonterminal: Nonterminal, _derivation: Derivation) {}

    // Called once every span ending at `end` is complete
    fn column_complete(&mut self, _end: usize, _table: &RecognitionTable) {}
}

impl Observer for () {}

// Traces every insertion through the `log` facade
pub struct LogObserver;

impl Observer for LogObserver {
    fn derived(&mut self, start: usize, end: usize, nonterminal: Nonterminal, derivation: Derivation) {
        match derivation {
            Derivation::Terminal(c) => log::trace!("({}, {}) += {} -> {}", start, end, nonterminal, c),
            Derivation::Split { split, left, right } => log::trace!(
                "({}, {}) += {} -> {}{} split after {}", start, end, nonterminal, left, right, split
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    pub word: String,
    pub table: RecognitionTable,
    pub accepted: bool,
}

// Seeds (i, i) from the terminal productions of the character at i
fn seed_cell(grammar: &Grammar, table: &mut RecognitionTable, i: usize, c: char, observer: &mut impl Observer) {
    for nonterminal in grammar.producers_of(c).iter() {
        if table.insert(i, i, nonterminal) {
            observer.derived(i, i, nonterminal, Derivation::Terminal(c));
        }
    }
}

// Fills every span ending at i, longest last, so a span may use shorter
// spans with the same end that were filled earlier in this call
fn solve_column(grammar: &Grammar, table: &mut RecognitionTable, i: usize, observer: &mut impl Observer) {
    for j in (0..i).rev() {
        for k in j..i {
            let left = table[(j, k)];
            let right = table[(k + 1, i)];
            if left.is_empty() || right.is_empty() {
                continue;
            }

            for (lhs, a, b) in grammar.pairs() {
                if left.contains(a) && right.contains(b) && table.insert(j, i, lhs) {
                    observer.derived(j, i, lhs, Derivation::Split { split: k, left: a, right: b });
                }
            }
        }
    }
}

fn build_table(grammar: &Grammar, word: &[char], observer: &mut impl Observer) -> RecognizeResult<RecognitionTable> {
    let mut table = RecognitionTable::new(word.len());

    for (i, &c) in word.iter().enumerate() {
        if !grammar.alphabet().contains(c) {
            return Err(RecognizeError {
                location: Location::Position(i),
                error: RecognizeErrorType::UnknownSymbol(c)
            });
        }

        seed_cell(grammar, &mut table, i, c, observer);
        solve_column(grammar, &mut table, i, observer);
        observer.column_complete(i, &table);
    }

    Ok(table)
}

/// Builds the recognition table for `word` and checks whether `S` derives it.
///
/// Whitespace in the word is ignored and positions in errors count the
/// remaining characters.
pub fn recognize(grammar: &Grammar, word: &str) -> RecognizeResult<Recognition> {
    recognize_with(grammar, word, &mut ())
}

pub fn recognize_with(grammar: &Grammar, word: &str, observer: &mut impl Observer) -> RecognizeResult<Recognition> {
    let word = remove_whitespace(word);
    if word.is_empty() {
        return Err(RecognizeError {
            location: Location::Position(0),
            error: RecognizeErrorType::EmptyWord
        });
    }

    let chars: Vec<char> = word.chars().collect();
    let table = build_table(grammar, &chars, observer)?;

    let accepted = table.top().is_some_and(|top| top.contains(START_SYMBOL));
    log::debug!("`{}` {} L(G)", word, if accepted { "∈" } else { "∉" });

    Ok(Recognition { word, table, accepted })
}
