//! The formula compiler: drives the [`resolver`](crate::internal::resolver) token stream into
//! a sequence of compiled formulas, one [`parser::FormulaParser`] at a time, recovering from
//! malformed formulas instead of aborting the whole input.

pub mod parser;
pub mod precedence;

use serde::Serialize;

use crate::internal::command::CommandList;
use crate::internal::resolver::{StringResolver, VariableTable};
use crate::internal::token::TokenKind;
use parser::{ExpressionError, FormulaParser};

/// The kind of recoverable parse failure recorded for one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Expression,
}

/// A recoverable per-formula parse failure. Rendering it as `<source>:<line>: error: <kind>`
/// text is left to a caller that knows what to call "the source".
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: u32,
}

/// Compiles a whole input into a list of formulas and a variable table, recovering from
/// malformed formulas by discarding them and resuming at the next delimiter.
pub struct FormulaCompiler<'a> {
    resolver: StringResolver<'a>,
}

impl<'a> FormulaCompiler<'a> {
    pub fn new(input: &'a str) -> Self {
        FormulaCompiler { resolver: StringResolver::new(input) }
    }

    /// Consumes the whole input, returning every successfully compiled formula alongside the
    /// variable table and any diagnostics recorded along the way.
    pub fn compile(mut self) -> (Vec<CommandList>, VariableTable, Vec<Diagnostic>) {
        let mut formulas = Vec::new();
        let mut diagnostics = Vec::new();
        let mut parser = FormulaParser::new();
        let mut recovering = false;
        let mut has_tokens = false;
        let mut formula_line = 1;

        loop {
            let token = self.resolver.next_token();
            if recovering {
                match token.kind {
                    TokenKind::Delim => {
                        recovering = false;
                        parser = FormulaParser::new();
                        has_tokens = false;
                        formula_line = token.line;
                        continue;
                    }
                    TokenKind::Eof => break,
                    _ => continue,
                }
            }

            match token.kind {
                TokenKind::ErrLex => {
                    // Lexical errors recover at the very next token: the bad character is
                    // simply dropped, the formula under construction is not abandoned.
                    log::warn!("line {}: lexical error near {:?}", token.line, token.text);
                    diagnostics.push(Diagnostic { kind: DiagnosticKind::Lexical, line: token.line });
                    continue;
                }
                TokenKind::Delim | TokenKind::Eof => {
                    let is_eof = token.kind == TokenKind::Eof;
                    if has_tokens {
                        let eof_token = crate::internal::token::Token::new(TokenKind::Eof, token.line);
                        match parser.finish(&eof_token) {
                            Ok(commands) => formulas.push(commands),
                            Err(ExpressionError(kind)) => {
                                log::warn!("line {formula_line}: {kind:?} error");
                                diagnostics.push(Diagnostic { kind, line: formula_line });
                            }
                        }
                    }
                    if is_eof {
                        break;
                    }
                    parser = FormulaParser::new();
                    has_tokens = false;
                    formula_line = token.line;
                }
                _ => {
                    has_tokens = true;
                    if let Err(ExpressionError(kind)) = parser.feed(&token) {
                        log::warn!("line {formula_line}: {kind:?} error");
                        diagnostics.push(Diagnostic { kind, line: formula_line });
                        recovering = true;
                    }
                }
            }
        }

        (formulas, self.resolver.into_variables(), diagnostics)
    }
}
