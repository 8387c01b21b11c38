/*
    Batch and interactive runs of the recognizer
*/

use std::io::{BufRead, Write};

use anyhow::Result;
use cyk::recognizer::LogObserver;
use cyk::{parse, recognize_with, Grammar, Recognition};

use crate::report::*;

const EXAMPLES: [(&str, &str); 3] = [
    ("S -> AB|BC, A -> BA|a, B -> CC|b, C -> AB|a", "babaa"),
    ("S -> AB|BC, A -> SA|a, B -> BB|b", "ababb"),
    ("S -> AB, A -> a, B -> b", "ba"),
];

fn print_recognition(out: &mut impl Write, recognition: &Recognition, quiet: bool) -> Result<()> {
    if !quiet {
        writeln!(out, "Word:")?;
        writeln!(out, "{}", recognition.word)?;
        writeln!(out, "Parse Table:")?;
        write!(out, "{}", TableView(recognition))?;
        writeln!(out, "Results:")?;
    }
    print_verdict(out, recognition)?;
    Ok(())
}

/// Checks every word even if an earlier one fails, writing word errors to `err`.
///
/// Returns false if any word could not be checked at all. A word outside
/// the language still counts as checked.
pub fn run_batch<'a>(
    out: &mut impl Write,
    err: &mut impl Write,
    grammar: &Grammar,
    words: impl IntoIterator<Item = &'a str>,
    quiet: bool
) -> Result<bool> {
    let mut all_ok = true;
    for word in words {
        match recognize_with(grammar, word, &mut LogObserver) {
            Ok(recognition) => print_recognition(out, &recognition, quiet)?,
            Err(error) => {
                print_errors(err, &[error])?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn print_intro(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Enter a CNF grammar G followed by an input word w. The starting left-hand side should use \
        the letter 'S' for the nonterminal letter. Terminals should be lowercase and nonterminals uppercase. \
        Whitespace does not matter.\n")?;
    writeln!(out, "Examples:")?;
    for (grammar, word) in EXAMPLES {
        writeln!(out, "G = {}", grammar)?;
        writeln!(out, "w = {}\n", word)?;
    }
    writeln!(out, "-----------------------------------------------")
}

// None once the input is exhausted
fn prompt(input: &mut impl BufRead, out: &mut impl Write, text: &str) -> Result<Option<String>> {
    write!(out, "{}", text)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Prompts for grammar and word pairs until the user answers `Y` to quitting.
///
/// A bad grammar or word only ends the current pair.
pub fn run_interactive(input: &mut impl BufRead, out: &mut impl Write, quiet: bool) -> Result<()> {
    loop {
        print_intro(out)?;

        let Some(grammar_text) = prompt(input, out, "G = ")? else { return Ok(()) };
        let Some(word) = prompt(input, out, "w = ")? else { return Ok(()) };
        writeln!(out)?;

        match parse(&grammar_text) {
            Ok(grammar) => {
                if !quiet {
                    print_grammar(out, &grammar)?;
                }
                match recognize_with(&grammar, &word, &mut LogObserver) {
                    Ok(recognition) => print_recognition(out, &recognition, quiet)?,
                    Err(error) => print_errors(out, &[error])?,
                }
            }
            Err(errors) => print_errors(out, &errors)?,
        }

        let stop = prompt(input, out, "\nQuit (Y/n)? ")?;
        writeln!(out)?;
        if stop.as_deref().map_or(true, |answer| answer == "Y") {
            return Ok(());
        }
    }
}
