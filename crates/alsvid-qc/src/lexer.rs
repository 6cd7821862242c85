//! Lexer for the `.qc` circuit description format.

use logos::Logos;

/// Tokens of the line-oriented `.qc` format.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    /// Wire declaration directive.
    #[token(".v")]
    DeclWires,

    /// Primary-input directive.
    #[token(".i")]
    DeclInputs,

    /// Output directive (accepted, unused by the core).
    #[token(".o")]
    DeclOutputs,

    #[token("BEGIN")]
    Begin,

    #[token("END")]
    End,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    /// Statement separator; the format is line-oriented.
    #[token("\n")]
    Newline,

    /// A gate, sub-circuit, or wire name. Dagger spellings carry a
    /// trailing `*` (`S*`, `T*`); bare numbers are legal wire names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*\*?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Name(String),
}
