/*
    This module parses CNF grammars written as `S -> AB|a, A -> a`
*/

mod lexer;
mod verifier;

use std::fs;
use std::path::Path;

use itertools::Itertools;

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;
use verifier::verify_rules;

pub use lexer::remove_whitespace;
pub use verifier::{diagnose, Diagnostic};

// Ways the text can fail to split into `LHS -> RHS|RHS` groups
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum Malformation {
    // Nothing between two commas, or around a lone comma
    #[error("empty production group")]
    EmptyGroup,
    // The group starts with something other than a nonterminal
    #[error("expected a single uppercase nonterminal before `->`")]
    MissingNonterminal,
    // More than one symbol before the arrow
    #[error("left-hand side must be exactly one nonterminal")]
    LongLeftSide,
    #[error("expected `->` after the nonterminal")]
    MissingArrow,
    // A second arrow usually means a missing comma between groups
    #[error("unexpected `->`, is a comma missing?")]
    UnexpectedArrow,
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarErrorType {
    #[error("Malformed grammar: {0}")]
    Malformed(Malformation),
    #[error("Not in Chomsky normal form: `{0}` must be one terminal or two nonterminals")]
    NotCnf(String),
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for GrammarErrorType {}

impl PartialEq for GrammarErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GrammarErrorType::Malformed(a), GrammarErrorType::Malformed(b)) => a == b,
            (GrammarErrorType::NotCnf(a), GrammarErrorType::NotCnf(b)) => a == b,
            (GrammarErrorType::FileError(a), GrammarErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => false
        }
    }
}

pub type GrammarError = Error<GrammarErrorType>;
pub type GrammarErrors = Errors<GrammarErrorType>;

pub type Result<T> = std::result::Result<T, GrammarErrorType>;
pub type GrammarResult<T> = std::result::Result<T, GrammarErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    lhs: Nonterminal,
    rewrite: Vec<Vec<Token>>,
    location: Location
}

fn parse_rewrite(tokens: &[Token]) -> Result<Vec<Vec<Token>>> {
    if tokens.contains(&Token::Arrow) {
        return Err(GrammarErrorType::Malformed(Malformation::UnexpectedArrow));
    }

    Ok(tokens.split(|t| *t == Token::Or).map(<[Token]>::to_vec).collect())
}

fn parse_group(tokens: &[Token], location: Location) -> Result<Rule> {
    let malformed = GrammarErrorType::Malformed;

    let lhs = match tokens.first() {
        Some(Token::Symbol(Symbol::Nonterminal(n))) => Ok(*n),
        Some(_) => Err(malformed(Malformation::MissingNonterminal)),
        None => Err(malformed(Malformation::EmptyGroup))
    }?;

    let arrow = tokens.iter()
        .position(|t| *t == Token::Arrow)
        .ok_or(malformed(Malformation::MissingArrow))?;
    if arrow > 1 {
        return Err(malformed(Malformation::LongLeftSide));
    }

    let rewrite = parse_rewrite(&tokens[arrow + 1..])?;

    Ok(Rule {
        lhs,
        rewrite,
        location
    })
}

fn grammar_from_rules(rules: Vec<Rule>) -> GrammarResult<Grammar> {
    let productions = verify_rules(&rules)?;
    Ok(Grammar::new(productions))
}

/// Parses and validates grammar text.
///
/// Every group is checked for structure first and all malformed groups are
/// reported together. Only a well-formed grammar is then checked for CNF,
/// again reporting every offending alternative.
pub fn parse(text: &str) -> GrammarResult<Grammar> {
    let tokens = lex_grammar(text);

    let (rules, errors): (Vec<_>, Vec<_>) = tokens
        .split(|t| *t == Token::Comma)
        .enumerate()
        .map(|(num, group)| {
            let location = Location::Group(num + 1);
            parse_group(group, location.clone())
                .map_err(|error| GrammarError { location, error })
        })
        .partition_result();

    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = grammar_from_rules(rules)?;

    log::debug!("Grammar:\n{}", grammar);
    log::debug!("Alphabet: {}", grammar.alphabet());
    for diagnostic in diagnose(&grammar) {
        log::warn!("{}", diagnostic);
    }

    Ok(grammar)
}

fn is_rule_line(line: &&str) -> bool {
    !line.trim_start().starts_with(';')
}

// Blanks out comment lines so line numbers still match the file
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| if is_rule_line(&line) { line } else { "" })
        .join("\n")
}

// Line of the first character of each comma-separated group, counted from 1
fn group_lines(text: &str) -> Vec<usize> {
    let mut lines = Vec::new();
    let mut line = 1;
    for group in text.split(',') {
        let leading = group.len() - group.trim_start().len();
        lines.push(line + group[..leading].matches('\n').count());
        line += group.matches('\n').count();
    }
    lines
}

fn locate_in_file(error: GrammarError, path: &Path, lines: &[usize]) -> GrammarError {
    let location = match error.location {
        Location::Group(group) => Location::File {
            file: path.to_path_buf(),
            line: lines.get(group - 1).copied().unwrap_or(0)
        },
        location => location
    };
    GrammarError { location, error: error.error }
}

/// Reads a grammar file. Lines starting with `;` are comments.
///
/// Errors are reported as `file:line` of the group they were found in.
pub fn parse_file(path: &Path) -> GrammarResult<Grammar> {
    let text = fs::read_to_string(path).map_err(|e| vec![GrammarError {
        location: Location::File { file: path.to_path_buf(), line: 0 },
        error: GrammarErrorType::FileError(e)
    }])?;
    let text = strip_comments(&text);

    parse(&text).map_err(|errors| {
        let lines = group_lines(&text);
        errors.into_iter()
            .map(|error| locate_in_file(error, path, &lines))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use std::iter::zip;
    use std::path::PathBuf;

    use super::*;

    fn nt(c: char) -> Nonterminal {
        Nonterminal::new(c).unwrap()
    }

    fn malformed(group: usize, malformation: Malformation) -> GrammarError {
        GrammarError {
            location: Location::Group(group),
            error: GrammarErrorType::Malformed(malformation)
        }
    }

    fn not_cnf(group: usize, text: &str) -> GrammarError {
        GrammarError {
            location: Location::Group(group),
            error: GrammarErrorType::NotCnf(text.to_string())
        }
    }

    #[test]
    fn parse_normal_group() {
        let tokens = lex_grammar("S -> AB|a");
        let rule = parse_group(&tokens, Location::Group(1)).unwrap();

        assert_eq!(rule.lhs, nt('S'));
        assert_eq!(rule.rewrite.len(), 2);
        assert_eq!(rule.rewrite[1], vec![Token::Symbol(Symbol::Terminal('a'))]);
    }

    #[test]
    fn parse_malformed_group() {
        let lines = vec![
            "",
            "-> a",
            "s -> a",
            "AB -> a",
            "S a",
            "S",
            "SA ->",
            "S -> a -> b"
        ];
        let answers = vec![
            Malformation::EmptyGroup,
            Malformation::MissingNonterminal,
            Malformation::MissingNonterminal,
            Malformation::LongLeftSide,
            Malformation::MissingArrow,
            Malformation::MissingArrow,
            Malformation::LongLeftSide,
            Malformation::UnexpectedArrow
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(
                parse_group(&lex_grammar(line), Location::Group(1)).unwrap_err(),
                GrammarErrorType::Malformed(answer)
            );
        }
    }

    #[test]
    fn parse_normal_grammar() {
        let grammar = parse("S -> AB|BC, A -> BA|a, B -> CC|b, C -> AB|a").unwrap();

        assert_eq!(grammar.to_string(), "S -> AB|BC\nA -> BA|a\nB -> CC|b\nC -> AB|a");
        assert_eq!(grammar.alphabet().to_string(), "{a, b}");
        assert_eq!(grammar.alternatives(nt('B')), Some(&[
            Alternative::Pair(nt('C'), nt('C')),
            Alternative::Terminal('b')
        ][..]));
    }

    #[test]
    fn whitespace_is_insignificant() {
        let spaced = parse("  S - >A B |\tb ,\n A->a ").unwrap();
        let packed = parse("S->AB|b,A->a").unwrap();
        assert_eq!(spaced, packed);
    }

    #[test]
    fn missing_comma_is_malformed() {
        assert_eq!(parse("S -> AB A -> a").unwrap_err(), vec![
            malformed(1, Malformation::UnexpectedArrow)
        ]);
    }

    #[test]
    fn every_malformed_group_is_reported() {
        assert_eq!(parse("S -> AB,, a -> b, A -> ABC").unwrap_err(), vec![
            malformed(2, Malformation::EmptyGroup),
            malformed(3, Malformation::MissingNonterminal)
        ]);
        assert_eq!(parse("S -> a,").unwrap_err(), vec![
            malformed(2, Malformation::EmptyGroup)
        ]);
    }

    #[test]
    fn three_symbols_are_not_cnf() {
        let errors = parse("S -> ABC").unwrap_err();
        assert_eq!(errors, vec![not_cnf(1, "ABC")]);
        assert!(matches!(errors[0].error, GrammarErrorType::NotCnf(_)));
    }

    #[test]
    fn every_non_cnf_alternative_is_reported() {
        assert_eq!(parse("S -> AB|aB|, A -> a|A|ab, B -> b1|b").unwrap_err(), vec![
            not_cnf(1, "aB"),
            not_cnf(1, ""),
            not_cnf(2, "A"),
            not_cnf(2, "ab"),
            not_cnf(3, "b1")
        ]);
    }

    #[test]
    fn empty_right_side_is_not_cnf() {
        assert_eq!(parse("S ->").unwrap_err(), vec![not_cnf(1, "")]);
    }

    #[test]
    fn structure_is_checked_before_cnf() {
        let errors = parse("S -> ABC, -> a").unwrap_err();
        assert_eq!(errors, vec![malformed(2, Malformation::MissingNonterminal)]);
    }

    #[test]
    fn parse_normal_file() {
        let grammar = parse_file(&PathBuf::from("example_data/babaa.cnf")).unwrap();
        assert_eq!(grammar, parse("S -> AB|BC, A -> BA|a, B -> CC|b, C -> AB|a").unwrap());
    }

    #[test]
    fn parse_malformed_file() {
        let path = PathBuf::from("example_data/not_cnf.cnf");
        let at_line = |line| Location::File { file: path.clone(), line };

        assert_eq!(parse_file(&path).unwrap_err(), vec![
            GrammarError { location: at_line(2), error: GrammarErrorType::NotCnf("ABC".to_string()) },
            GrammarError { location: at_line(5), error: GrammarErrorType::NotCnf("Ab".to_string()) }
        ]);
    }

    #[test]
    fn file_errors_name_the_line() {
        let path = PathBuf::from("example_data/malformed.cnf");
        let errors = parse_file(&path).unwrap_err();

        assert_eq!(errors, vec![
            GrammarError {
                location: Location::File { file: path.clone(), line: 4 },
                error: GrammarErrorType::Malformed(Malformation::MissingNonterminal)
            },
            GrammarError {
                location: Location::File { file: path.clone(), line: 5 },
                error: GrammarErrorType::Malformed(Malformation::EmptyGroup)
            }
        ]);
        assert_eq!(errors[0].location.to_string(), "example_data/malformed.cnf:4");
    }

    #[test]
    fn group_start_lines() {
        let lines = vec![
            "S -> AB, A -> a",
            "S -> AB,\nA -> a,\n\n  B -> b",
            "\n\nS -> a,"
        ];
        let answers = vec![
            vec![1, 1],
            vec![1, 2, 4],
            vec![3, 3]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(group_lines(line), answer);
        }
    }

    #[test]
    fn comments_keep_line_numbers() {
        assert_eq!(strip_comments("; note\nS -> a\n  ; more\n"), "\nS -> a\n");
    }

    #[test]
    fn parse_missing_file() {
        let path = PathBuf::from("example_data/does_not_exist.cnf");
        assert_eq!(parse_file(&path).unwrap_err(), vec![GrammarError {
            location: Location::File { file: path.clone(), line: 0 },
            error: GrammarErrorType::FileError(std::io::ErrorKind::NotFound.into())
        }]);
    }
}
