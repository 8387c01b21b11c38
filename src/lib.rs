pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod table;
pub mod recognizer;
pub mod generator;

pub use grammar::{Grammar, Nonterminal, NonterminalSet, START_SYMBOL};
pub use parser::{parse, parse_file};
pub use recognizer::{recognize, recognize_with, Observer, Recognition};
pub use table::RecognitionTable;
