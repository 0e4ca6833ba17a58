//! # Raw scanner
//!
//! The lowest lexical layer. Converts an input string into a stream of
//! [`Token`](crate::internal::token::Token)s drawn from the small fixed alphabet of single
//! character symbols plus one greedy identifier class. This layer never looks at keywords:
//! `NOT`, `AND`, `OR`, `XOR`, `FALSE`, and `TRUE` all come through as plain [`TokenKind::String`]
//! here, same as any user variable name. Folding those into the right token kind (and interning
//! variable names) is [`crate::internal::resolver::StringResolver`]'s job, one layer up.
//!
//! Built on `logos` for the scan itself; only line tracking needs a hand-written callback,
//! since a raw token's line number has to survive past end of input (for `Eof`, which keeps
//! reporting the last line forever once the stream is exhausted).

use logos::{Lexer, Logos, Skip};

use crate::internal::token::{Token, TokenKind};

fn bump_line(lex: &mut Lexer<RawToken>) -> Skip {
    lex.extras += 1;
    Skip
}

/// Raw lexical classes. Never exposed outside this module; [`RawScanner`] translates every
/// variant into a [`Token`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = u32)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[regex(r"\n", bump_line)]
    Newline,

    #[token("0")]
    False,
    #[token("1")]
    True,
    #[token("~")]
    Not,
    #[token("&")]
    And,
    #[token("|")]
    Or,
    #[token("^")]
    Xor,
    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    #[token(";")]
    Delim,

    /// `[A-Za-z_][A-Za-z0-9_]*`, reclassified one layer up.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Scans a whole input string, one [`Token`] at a time, never stopping at end of input.
pub struct RawScanner<'a> {
    lexer: Lexer<'a, RawToken>,
    exhausted: bool,
}

impl<'a> RawScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        RawScanner { lexer: RawToken::lexer(input), exhausted: false }
    }

    /// Produce the next token. Once the input is fully consumed this returns `Eof`
    /// on every subsequent call, at the line the input ended on.
    pub fn next_token(&mut self) -> Token {
        if self.exhausted {
            return Token::new(TokenKind::Eof, self.lexer.extras + 1);
        }
        match self.lexer.next() {
            None => {
                self.exhausted = true;
                Token::new(TokenKind::Eof, self.lexer.extras + 1)
            }
            Some(Ok(raw)) => {
                let line = self.lexer.extras + 1;
                match raw {
                    RawToken::Newline => unreachable!("newline is skipped by the lexer"),
                    RawToken::False => Token::new(TokenKind::False, line),
                    RawToken::True => Token::new(TokenKind::True, line),
                    RawToken::Not => Token::new(TokenKind::Not, line),
                    RawToken::And => Token::new(TokenKind::And, line),
                    RawToken::Or => Token::new(TokenKind::Or, line),
                    RawToken::Xor => Token::new(TokenKind::Xor, line),
                    RawToken::LPar => Token::new(TokenKind::LPar, line),
                    RawToken::RPar => Token::new(TokenKind::RPar, line),
                    RawToken::Delim => Token::new(TokenKind::Delim, line),
                    RawToken::Ident => Token::with_text(TokenKind::String, line, self.lexer.slice()),
                }
            }
            Some(Err(())) => {
                let line = self.lexer.extras + 1;
                Token::with_text(TokenKind::ErrLex, line, self.lexer.slice())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut s = RawScanner::new(input);
        let mut out = Vec::new();
        loop {
            let tok = s.next_token();
            if tok.is_eof() {
                out.push(tok.kind);
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn scans_symbols() {
        assert_eq!(
            kinds("0 1 ~ & | ^ ( ) ;"),
            vec![
                TokenKind::False,
                TokenKind::True,
                TokenKind::Not,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Xor,
                TokenKind::LPar,
                TokenKind::RPar,
                TokenKind::Delim,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_pass_through_as_string() {
        let mut s = RawScanner::new("AND a_1");
        let first = s.next_token();
        assert_eq!(first.kind, TokenKind::String);
        assert_eq!(first.text.as_deref(), Some("AND"));
        let second = s.next_token();
        assert_eq!(second.kind, TokenKind::String);
        assert_eq!(second.text.as_deref(), Some("a_1"));
    }

    #[test]
    fn tracks_line_numbers() {
        let mut s = RawScanner::new("a\nb\n");
        let a = s.next_token();
        assert_eq!(a.line, 1);
        let b = s.next_token();
        assert_eq!(b.line, 2);
        let eof = s.next_token();
        assert!(eof.is_eof());
        assert_eq!(eof.line, 3);
    }

    #[test]
    fn reports_lexical_error() {
        let mut s = RawScanner::new("a @ b");
        assert_eq!(s.next_token().kind, TokenKind::String);
        let err = s.next_token();
        assert_eq!(err.kind, TokenKind::ErrLex);
        assert_eq!(err.text.as_deref(), Some("@"));
        assert_eq!(s.next_token().kind, TokenKind::String);
    }

    #[test]
    fn eof_is_sticky() {
        let mut s = RawScanner::new("0");
        assert_eq!(s.next_token().kind, TokenKind::False);
        assert!(s.next_token().is_eof());
        assert!(s.next_token().is_eof());
        assert!(s.next_token().is_eof());
    }
}
