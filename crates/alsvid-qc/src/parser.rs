//! Recursive-descent parser for the `.qc` format.

use logos::Logos;

use crate::ast::{Definition, Program, Stmt};
use crate::error::{FormatError, FormatResult};
use crate::lexer::Token;

/// Parse a `.qc` source into a [`Program`].
pub fn parse_program(source: &str) -> FormatResult<Program> {
    let mut tokens = Vec::new();
    let mut line = 1;
    for result in Token::lexer(source) {
        match result {
            Ok(token) => {
                tokens.push((token.clone(), line));
                if token == Token::Newline {
                    line += 1;
                }
            }
            Err(()) => return Err(FormatError::LexerError { line }),
        }
    }
    Parser {
        tokens,
        pos: 0,
    }
    .program()
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |(_, l)| *l)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        self.pos += 1;
        token
    }

    fn skip_newlines(&mut self) {
        while self.peek() == Some(&Token::Newline) {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: &str) -> FormatError {
        match self.peek() {
            Some(token) => FormatError::UnexpectedToken {
                line: self.line(),
                expected: expected.to_string(),
                found: format!("{token:?}"),
            },
            None => FormatError::UnexpectedEof(expected.to_string()),
        }
    }

    /// Names up to the end of the current line.
    fn name_list(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        while let Some(Token::Name(name)) = self.peek() {
            names.push(name.clone());
            self.pos += 1;
        }
        names
    }

    fn program(&mut self) -> FormatResult<Program> {
        let mut program = Program::default();
        let mut saw_main = false;

        loop {
            self.skip_newlines();
            match self.peek() {
                None => break,
                Some(Token::DeclWires) => {
                    self.pos += 1;
                    program.wires.extend(self.name_list());
                }
                Some(Token::DeclInputs) => {
                    self.pos += 1;
                    program.inputs.extend(self.name_list());
                }
                Some(Token::DeclOutputs) => {
                    // Accepted for compatibility; the core derives outputs.
                    self.pos += 1;
                    self.name_list();
                }
                Some(Token::Begin) => {
                    self.pos += 1;
                    match self.peek() {
                        // `BEGIN name(params)` opens a definition.
                        Some(Token::Name(_)) => {
                            let definition = self.definition()?;
                            program.definitions.push(definition);
                        }
                        // Bare `BEGIN` opens the main body.
                        _ => {
                            program.body = self.block()?;
                            saw_main = true;
                        }
                    }
                }
                Some(_) => return Err(self.unexpected(".v, .i, .o, or BEGIN")),
            }
        }

        if !saw_main {
            return Err(FormatError::UnexpectedEof("BEGIN".to_string()));
        }
        Ok(program)
    }

    fn definition(&mut self) -> FormatResult<Definition> {
        let Some(Token::Name(name)) = self.bump() else {
            return Err(self.unexpected("sub-circuit name"));
        };
        let params = if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let params = self.name_list();
            if self.peek() != Some(&Token::RParen) {
                return Err(self.unexpected(")"));
            }
            self.pos += 1;
            params
        } else {
            // `BEGIN name a b` without parentheses is also accepted.
            self.name_list()
        };
        let body = self.block()?;
        Ok(Definition { name, params, body })
    }

    /// Statements until the matching END.
    fn block(&mut self) -> FormatResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            self.skip_newlines();
            match self.peek() {
                Some(Token::End) => {
                    self.pos += 1;
                    return Ok(stmts);
                }
                Some(Token::Name(_)) => {
                    let Some(Token::Name(name)) = self.bump() else {
                        unreachable!("peeked a name");
                    };
                    let args = self.name_list();
                    stmts.push(Stmt { name, args });
                    match self.peek() {
                        Some(Token::Newline) | Some(Token::End) | None => {}
                        Some(_) => return Err(self.unexpected("end of statement")),
                    }
                }
                Some(_) => return Err(self.unexpected("gate statement or END")),
                None => return Err(FormatError::UnexpectedEof("END".to_string())),
            }
        }
    }
}
