/*
    Text rendering of grammars, tables and verdicts
*/

use std::fmt::Display;
use std::io::Write;

use cyk::error_handling::{Error, ErrorType};
use cyk::{Grammar, Recognition};
use itertools::Itertools;

pub fn print_errors<T: ErrorType>(out: &mut impl Write, errors: &[Error<T>]) -> std::io::Result<()> {
    for error in errors {
        writeln!(out, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", error.location, error.error)?;
    }
    Ok(())
}

pub fn print_grammar(out: &mut impl Write, grammar: &Grammar) -> std::io::Result<()> {
    writeln!(out, "Grammar:")?;
    writeln!(out, "{}", grammar)?;
    writeln!(out, "Alphabet:")?;
    writeln!(out, "{}", grammar.alphabet())
}

pub fn print_verdict(out: &mut impl Write, recognition: &Recognition) -> std::io::Result<()> {
    if recognition.accepted {
        writeln!(out, "w ∈ L(G): `{}` is in the language generated by the grammar.", recognition.word)
    } else {
        writeln!(out, "w ∉ L(G): `{}` is *not* in the language generated by the grammar.", recognition.word)
    }
}

// Grid with the word along both axes; row `start`, column `end`
pub struct TableView<'a>(pub &'a Recognition);

impl TableView<'_> {
    fn cells(&self) -> Vec<Vec<String>> {
        self.0.table.rows().enumerate()
            .map(|(start, row)| row.iter().enumerate()
                .map(|(end, cell)| match (end < start, cell.is_empty()) {
                    (true, _) => String::new(),
                    (false, true) => "∅".to_string(),
                    (false, false) => cell.iter().join(","),
                })
                .collect())
            .collect()
    }
}

impl Display for TableView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells();
        let width = cells.iter().flatten()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(1)
            .max(1);

        write!(f, "{:<3}", "")?;
        for c in self.0.word.chars() {
            write!(f, " {:<width$}", c)?;
        }
        writeln!(f)?;

        for (c, row) in self.0.word.chars().zip(cells) {
            write!(f, "{:<3}", c)?;
            for cell in row {
                write!(f, " {:<width$}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
