//! The per-formula operator-precedence parser.
//!
//! Drives a shift/reduce stack against [`precedence::TABLE`](super::precedence), emitting a
//! [`CommandList`] as it reduces. One [`FormulaParser`] is good for exactly one formula: feed
//! it every token up to (but not including) the terminating `;`, then call [`FormulaParser::finish`]
//! with a synthetic end-of-formula token.

use crate::internal::command::{Command, CommandList};
use crate::internal::compiler::precedence::{self, PrecOp, StackItem};
use crate::internal::compiler::DiagnosticKind;
use crate::internal::token::Token;

/// What happened after feeding one token.
pub enum FeedOutcome {
    /// The formula is not finished yet; feed more tokens.
    Continue,
    /// Only returned in response to the synthetic end-of-formula token: the formula is
    /// complete and well-formed.
    Accepted,
}

/// A parse/expression error within a single formula, classified by what went wrong (not by
/// which method noticed it — both `feed` and `finish` can raise either kind). Recovery
/// (discarding tokens to the next delimiter) is the compiler's job, not this parser's.
#[derive(Debug)]
pub struct ExpressionError(pub DiagnosticKind);

pub struct FormulaParser {
    stack: Vec<StackItem>,
    commands: CommandList,
    errored: bool,
}

impl FormulaParser {
    pub fn new() -> Self {
        FormulaParser { stack: vec![StackItem::Bottom], commands: CommandList::new(), errored: false }
    }

    fn top_terminal_index(&self) -> usize {
        let top = self.stack.len() - 1;
        if self.stack[top].is_terminal() {
            top
        } else {
            top - 1
        }
    }

    fn insert_lt(&mut self) {
        if self.stack.last().expect("stack never empty").is_terminal() {
            self.stack.push(StackItem::Lt);
        } else {
            let expr = self.stack.pop().expect("non-terminal top is Expr");
            self.stack.push(StackItem::Lt);
            self.stack.push(expr);
        }
    }

    /// Pops the stack top, failing with an [`Expression`](DiagnosticKind::Expression)
    /// diagnostic if it isn't the symbol a reduction handle expects there.
    fn expect_pop(&mut self, pred: impl FnOnce(&StackItem) -> bool) -> Result<StackItem, ExpressionError> {
        match self.stack.pop() {
            Some(item) if pred(&item) => Ok(item),
            _ => Err(ExpressionError(DiagnosticKind::Expression)),
        }
    }

    fn reduce(&mut self) -> Result<(), ExpressionError> {
        let idx = self.top_terminal_index();
        match &self.stack[idx] {
            StackItem::Operand(_) => {
                let operand = self.stack.pop().expect("operand is the stack top");
                let cmd = match operand {
                    StackItem::Operand(cmd) => cmd,
                    _ => unreachable!(),
                };
                self.expect_pop(|i| matches!(i, StackItem::Lt))?;
                self.commands.push(cmd);
            }
            StackItem::RPar => {
                self.stack.pop(); // ')' itself
                self.expect_pop(|i| matches!(i, StackItem::Expr))?;
                self.expect_pop(|i| matches!(i, StackItem::LPar))?;
                self.expect_pop(|i| matches!(i, StackItem::Lt))?;
            }
            StackItem::Not => {
                self.expect_pop(|i| matches!(i, StackItem::Expr))?;
                self.expect_pop(|i| matches!(i, StackItem::Not))?;
                self.expect_pop(|i| matches!(i, StackItem::Lt))?;
                self.commands.push(Command::Not);
            }
            StackItem::And | StackItem::Or | StackItem::Xor => {
                self.expect_pop(|i| matches!(i, StackItem::Expr))?;
                let op = self.expect_pop(|i| precedence::binop_for(i).is_some())?;
                let binop = precedence::binop_for(&op).expect("checked above");
                self.expect_pop(|i| matches!(i, StackItem::Expr))?;
                self.expect_pop(|i| matches!(i, StackItem::Lt))?;
                self.commands.push(Command::Binop(binop));
            }
            StackItem::Bottom | StackItem::Lt | StackItem::Expr => {
                unreachable!("these symbols never trigger a reduce")
            }
        }
        self.stack.push(StackItem::Expr);
        Ok(())
    }

    fn is_valid(&self) -> bool {
        let idx = self.top_terminal_index();
        matches!(self.stack[idx], StackItem::Bottom)
            && matches!(self.stack.last(), Some(StackItem::Expr))
            && !self.errored
    }

    /// Feed one non-end-of-formula token.
    pub fn feed(&mut self, token: &Token) -> Result<FeedOutcome, ExpressionError> {
        loop {
            let idx = self.top_terminal_index();
            match precedence::lookup(&self.stack[idx], token) {
                PrecOp::Lt => {
                    self.insert_lt();
                    self.stack.push(precedence::token_to_stack_item(token));
                    return Ok(FeedOutcome::Continue);
                }
                PrecOp::Eq => {
                    self.stack.push(precedence::token_to_stack_item(token));
                    return Ok(FeedOutcome::Continue);
                }
                PrecOp::Gt => {
                    if let Err(err) = self.reduce() {
                        self.errored = true;
                        return Err(err);
                    }
                }
                PrecOp::Inv => {
                    self.errored = true;
                    return Err(ExpressionError(DiagnosticKind::Syntax));
                }
                PrecOp::Accept => {
                    unreachable!("Accept only occurs for the synthetic end-of-formula token")
                }
            }
        }
    }

    /// Feed the synthetic end-of-formula token. Consumes any trailing reductions and checks
    /// the final stack shape.
    pub fn finish(mut self, eof: &Token) -> Result<CommandList, ExpressionError> {
        loop {
            let idx = self.top_terminal_index();
            match precedence::lookup(&self.stack[idx], eof) {
                PrecOp::Gt => {
                    self.reduce()?;
                }
                PrecOp::Accept => {
                    return if self.is_valid() {
                        Ok(self.commands)
                    } else {
                        Err(ExpressionError(DiagnosticKind::Expression))
                    };
                }
                PrecOp::Inv => return Err(ExpressionError(DiagnosticKind::Syntax)),
                PrecOp::Lt | PrecOp::Eq => {
                    unreachable!("the end-of-formula column never shifts")
                }
            }
        }
    }
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::token::TokenKind;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, 1)
    }

    fn var(id: usize) -> Token {
        Token::var(1, id)
    }

    fn run(tokens: &[Token]) -> Result<CommandList, ExpressionError> {
        let mut p = FormulaParser::new();
        for t in tokens {
            p.feed(t)?;
        }
        p.finish(&tok(TokenKind::Eof))
    }

    #[test]
    fn single_variable() {
        let cl = run(&[var(0)]).unwrap();
        assert_eq!(cl.as_slice(), &[Command::PushVar(0)]);
    }

    #[test]
    fn negation() {
        let cl = run(&[tok(TokenKind::Not), var(0)]).unwrap();
        assert_eq!(cl.as_slice(), &[Command::PushVar(0), Command::Not]);
    }

    #[test]
    fn conjunction() {
        let cl = run(&[var(0), tok(TokenKind::And), var(1)]).unwrap();
        assert_eq!(
            cl.as_slice(),
            &[Command::PushVar(0), Command::PushVar(1), Command::Binop(crate::internal::command::BinOp::And)]
        );
    }

    #[test]
    fn parenthesized_grouping_drops_parens() {
        let cl = run(&[tok(TokenKind::LPar), var(0), tok(TokenKind::RPar)]).unwrap();
        assert_eq!(cl.as_slice(), &[Command::PushVar(0)]);
    }

    #[test]
    fn mixed_precedence_is_left_to_right() {
        // a & b | c  ==  (a & b) | c  (equal precedence, left-to-right)
        let cl = run(&[var(0), tok(TokenKind::And), var(1), tok(TokenKind::Or), var(2)]).unwrap();
        use crate::internal::command::BinOp;
        assert_eq!(
            cl.as_slice(),
            &[
                Command::PushVar(0),
                Command::PushVar(1),
                Command::Binop(BinOp::And),
                Command::PushVar(2),
                Command::Binop(BinOp::Or),
            ]
        );
    }

    #[test]
    fn not_binds_tighter_than_binary_ops() {
        // ~a & b == (~a) & b
        let cl = run(&[tok(TokenKind::Not), var(0), tok(TokenKind::And), var(1)]).unwrap();
        use crate::internal::command::BinOp;
        assert_eq!(
            cl.as_slice(),
            &[Command::PushVar(0), Command::Not, Command::PushVar(1), Command::Binop(BinOp::And)]
        );
    }

    #[test]
    fn unmatched_paren_is_a_syntax_error() {
        // the stray '(' is only noticed once end-of-formula is reached, but its PrecOp::Inv
        // pairing makes it a syntax error, not an expression one
        let mut p = FormulaParser::new();
        p.feed(&tok(TokenKind::LPar)).unwrap();
        p.feed(&var(0).clone()).unwrap();
        let err = p.finish(&tok(TokenKind::Eof)).unwrap_err();
        assert_eq!(err.0, DiagnosticKind::Syntax);
    }

    #[test]
    fn dangling_operator_is_an_expression_error() {
        // "a &" with nothing following fails to find its second operand at reduce time
        let mut p = FormulaParser::new();
        p.feed(&var(0)).unwrap();
        p.feed(&tok(TokenKind::And)).unwrap();
        let err = p.finish(&tok(TokenKind::Eof)).unwrap_err();
        assert_eq!(err.0, DiagnosticKind::Expression);
    }

    #[test]
    fn parenthesization_is_closed_under_reparsing() {
        let plain = run(&[var(0), tok(TokenKind::And), var(1)]).unwrap();
        let wrapped = run(&[
            tok(TokenKind::LPar),
            var(0),
            tok(TokenKind::And),
            var(1),
            tok(TokenKind::RPar),
        ])
        .unwrap();
        assert_eq!(plain.as_slice(), wrapped.as_slice());
    }
}
