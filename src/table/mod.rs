/*
    This module stores the triangular CYK recognition table
*/

use std::ops::Index;

use crate::grammar::{Nonterminal, NonterminalSet};

/// Cell `(start, end)` holds every nonterminal deriving `word[start..=end]`.
///
/// Cells are kept in one flat `n * n` arena. Cells below the diagonal
/// (`start > end`) exist so indexing stays simple but are never written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionTable {
    len: usize,
    cells: Vec<NonterminalSet>,
}

impl RecognitionTable {
    pub(crate) fn new(len: usize) -> Self {
        RecognitionTable {
            len,
            cells: vec![NonterminalSet::new(); len * len],
        }
    }

    // Length of the word the table was built for
    pub fn len(&self) -> usize {
        self.len
    }

    fn offset(&self, start: usize, end: usize) -> Option<usize> {
        (start < self.len && end < self.len).then(|| start * self.len + end)
    }

    pub fn get(&self, start: usize, end: usize) -> Option<&NonterminalSet> {
        self.offset(start, end).map(|offset| &self.cells[offset])
    }

    pub(crate) fn insert(&mut self, start: usize, end: usize, nonterminal: Nonterminal) -> bool {
        debug_assert!(start <= end, "cell ({}, {}) is below the diagonal", start, end);
        match self.offset(start, end) {
            Some(offset) => self.cells[offset].insert(nonterminal),
            None => false
        }
    }

    // The cell spanning the whole word
    pub fn top(&self) -> Option<&NonterminalSet> {
        self.len.checked_sub(1).and_then(|last| self.get(0, last))
    }

    /// Rows of the table, `row[end]` being cell `(start, end)`.
    pub fn rows(&self) -> impl Iterator<Item = &[NonterminalSet]> {
        self.cells.chunks(self.len.max(1))
    }
}

impl Index<(usize, usize)> for RecognitionTable {
    type Output = NonterminalSet;

    fn index(&self, (start, end): (usize, usize)) -> &NonterminalSet {
        match self.get(start, end) {
            Some(cell) => cell,
            None => panic!("cell ({}, {}) is outside a table of length {}", start, end, self.len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(c: char) -> Nonterminal {
        Nonterminal::new(c).unwrap()
    }

    #[test]
    fn new_table_is_empty() {
        let table = RecognitionTable::new(3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows().count(), 3);
        assert!(table.rows().flatten().all(NonterminalSet::is_empty));
    }

    #[test]
    fn insert_and_index() {
        let mut table = RecognitionTable::new(3);
        assert!(table.insert(0, 2, nt('S')));
        assert!(!table.insert(0, 2, nt('S')));
        assert!(table.insert(1, 1, nt('A')));

        assert!(table[(0, 2)].contains(nt('S')));
        assert!(table[(1, 1)].contains(nt('A')));
        assert!(table[(0, 1)].is_empty());
        assert_eq!(table.top(), Some(&table[(0, 2)]));
        assert_eq!(table.rows().nth(1).unwrap()[1], table[(1, 1)]);
    }

    #[test]
    fn out_of_range() {
        let table = RecognitionTable::new(2);
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 2), None);
        assert_eq!(RecognitionTable::new(0).top(), None);
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let table = RecognitionTable::new(2);
        let _ = table[(0, 5)];
    }
}
