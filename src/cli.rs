use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("source").args(["grammar", "file"])))]
pub struct Cli {
    /// Words to test (default: one per line from stdin)
    #[arg(requires = "source")]
    pub words: Vec<String>,

    /// CNF grammar such as "S -> AB, A -> a, B -> b" (default: interactive)
    #[arg(short, long, value_name = "GRAMMAR")]
    pub grammar: Option<String>,

    /// File containing the grammar
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Only print verdicts, not the grammar and table
    #[arg(short, long)]
    pub quiet: bool,

    /// Print this many random words of the language
    #[arg(short = 'n', long, value_name = "AMOUNT", requires = "source", conflicts_with = "words")]
    pub sample: Option<u32>,

    /// Derivation depth after which sampling takes the shortest route
    #[arg(long, value_name = "DEPTH", default_value_t = 8, requires = "sample")]
    pub max_depth: usize,

    /// Seed for sampling
    #[arg(long, requires = "sample")]
    pub seed: Option<u64>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let cli = Cli::parse_from(["cyk", "-g", "S -> AB, A -> a, B -> b", "ab", "ba", "-vv"]);
        assert_eq!(cli.grammar.as_deref(), Some("S -> AB, A -> a, B -> b"));
        assert_eq!(cli.words, vec!["ab", "ba"]);
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.max_depth, 8);
    }

    #[test]
    fn grammar_and_file_conflict() {
        assert!(Cli::try_parse_from(["cyk", "-g", "S -> a", "-f", "g.cnf"]).is_err());
    }

    #[test]
    fn batch_options_need_a_grammar() {
        let lines = vec![
            vec!["cyk", "ab"],
            vec!["cyk", "-n", "3"],
            vec!["cyk", "--seed", "7"],
        ];

        for line in lines {
            assert!(Cli::try_parse_from(&line).is_err(), "{:?}", line);
        }
    }

    #[test]
    fn sampling_options() {
        let cli = Cli::parse_from(["cyk", "-f", "g.cnf", "-n", "3", "--seed", "7", "--max-depth", "4"]);
        assert_eq!(cli.sample, Some(3));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.max_depth, 4);

        assert!(Cli::try_parse_from(["cyk", "-f", "g.cnf", "-n", "3", "ab"]).is_err());
        assert!(Cli::try_parse_from(["cyk", "-f", "g.cnf", "--seed", "7", "ab"]).is_err());
        assert!(Cli::try_parse_from(["cyk", "-f", "g.cnf", "--max-depth", "4"]).is_err());
    }
}
