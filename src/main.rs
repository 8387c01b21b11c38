mod cli;
mod report;
mod session;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cyk::generator::generate;
use cyk::parser::GrammarResult;
use cyk::{parse, parse_file, Grammar};
use rand::prelude::*;

use cli::Cli;
use report::{print_errors, print_grammar};

fn load_grammar(cli: &Cli) -> Option<GrammarResult<Grammar>> {
    match (&cli.grammar, &cli.file) {
        (Some(text), _) => Some(parse(text)),
        (None, Some(path)) => Some(parse_file(path)),
        (None, None) => None,
    }
}

fn print_samples(out: &mut impl Write, err: &mut impl Write, grammar: &Grammar, cli: &Cli, amount: u32) -> Result<bool> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..amount {
        match generate(grammar, &mut rng, cli.max_depth) {
            Ok(word) => writeln!(out, "{}", word)?,
            Err(error) => {
                print_errors(err, &[error])?;
                return Ok(false);
            }
        }
    }
    Ok(true)
}

// False when the grammar or any word could not be used. Words read from
// `input` are one per line, blank lines skipped
fn run(cli: &Cli, input: &mut impl BufRead, out: &mut impl Write, err: &mut impl Write) -> Result<bool> {
    let grammar = match load_grammar(cli) {
        Some(Ok(grammar)) => grammar,
        Some(Err(errors)) => {
            print_errors(err, &errors)?;
            return Ok(false);
        }
        None => {
            session::run_interactive(input, out, cli.quiet)?;
            return Ok(true);
        }
    };

    if !cli.quiet {
        print_grammar(out, &grammar)?;
    }

    if let Some(amount) = cli.sample {
        return print_samples(out, err, &grammar, cli, amount);
    }

    if cli.words.is_empty() {
        let lines: Vec<String> = input.lines().collect::<io::Result<_>>()?;
        let words = lines.iter().map(String::as_str).filter(|line| !line.trim().is_empty());
        session::run_batch(out, err, &grammar, words, cli.quiet)
    } else {
        session::run_batch(out, err, &grammar, cli.words.iter().map(String::as_str), cli.quiet)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();
    log::debug!("Arguments: {:?}", cli);

    let ok = run(&cli, &mut io::stdin().lock(), &mut io::stdout().lock(), &mut io::stderr())?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
