//! The operator-precedence table driving [`super::parser::FormulaParser`].
//!
//! Eight terminal classes, laid out in the same row/column order the table is usually drawn
//! in: `XOR, OR, AND, NOT, (, ), i, $` — where `i` stands for any operand (a constant or a
//! variable) and `$` stands for the stack bottom / end of formula.

use crate::internal::command::{BinOp, Command};
use crate::internal::token::{Token, TokenKind};

/// What the table cell says to do for a given (stack top terminal, input terminal) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecOp {
    /// Shift: insert a `<` marker after the last terminal, then push the input token.
    Lt,
    /// Shift without a marker (only `( (` uses this).
    Eq,
    /// Reduce the handle under the stack top, then re-examine the same input token.
    Gt,
    /// This pairing can never appear in a well-formed formula.
    Inv,
    /// Only reachable at end of formula: accept if the stack holds exactly `$ EXPR`.
    Accept,
}

use PrecOp::*;

#[rustfmt::skip]
const TABLE: [[PrecOp; 8]; 8] = [
    /*            XOR  OR   AND  NOT  (    )    i    $   */
    /* XOR */    [Gt,  Gt,  Gt,  Lt,  Lt,  Gt,  Lt,  Gt],
    /* OR  */    [Gt,  Gt,  Gt,  Lt,  Lt,  Gt,  Lt,  Gt],
    /* AND */    [Gt,  Gt,  Gt,  Lt,  Lt,  Gt,  Lt,  Gt],
    /* NOT */    [Gt,  Gt,  Gt,  Lt,  Lt,  Gt,  Lt,  Gt],
    /* (   */    [Lt,  Lt,  Lt,  Lt,  Lt,  Eq,  Lt,  Inv],
    /* )   */    [Gt,  Gt,  Gt,  Gt,  Inv, Gt,  Inv, Gt],
    /* i   */    [Gt,  Gt,  Gt,  Gt,  Inv, Gt,  Inv, Gt],
    /* $   */    [Lt,  Lt,  Lt,  Lt,  Lt,  Inv, Lt,  Accept],
];

/// A stack symbol: either a real parse-tree terminal (with payload for operands), one of the
/// two parser-internal markers (`<` and the `EXPR` non-terminal).
#[derive(Debug, Clone)]
pub enum StackItem {
    Bottom,
    LPar,
    RPar,
    Not,
    And,
    Or,
    Xor,
    Operand(Command),
    /// The `<` shift marker.
    Lt,
    /// The `EXPR` non-terminal produced by a reduction.
    Expr,
}

impl StackItem {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StackItem::Expr)
    }

    /// Row/column index into [`TABLE`] for this symbol, when used as a terminal.
    pub fn table_index(&self) -> usize {
        match self {
            StackItem::Xor => 0,
            StackItem::Or => 1,
            StackItem::And => 2,
            StackItem::Not => 3,
            StackItem::LPar => 4,
            StackItem::RPar => 5,
            StackItem::Operand(_) => 6,
            StackItem::Bottom => 7,
            StackItem::Lt | StackItem::Expr => {
                unreachable!("Lt/Expr are never looked up in the precedence table")
            }
        }
    }
}

pub fn token_column(kind: TokenKind) -> usize {
    match kind {
        TokenKind::Xor => 0,
        TokenKind::Or => 1,
        TokenKind::And => 2,
        TokenKind::Not => 3,
        TokenKind::LPar => 4,
        TokenKind::RPar => 5,
        TokenKind::False | TokenKind::True | TokenKind::Var => 6,
        TokenKind::Eof | TokenKind::Delim => 7,
        TokenKind::String | TokenKind::ErrLex => {
            unreachable!("String/ErrLex never reach the formula parser")
        }
    }
}

pub fn lookup(top_terminal: &StackItem, input: &Token) -> PrecOp {
    TABLE[top_terminal.table_index()][token_column(input.kind)]
}

/// Builds the [`StackItem`] to shift for a non-end-of-formula input token.
pub fn token_to_stack_item(token: &Token) -> StackItem {
    match token.kind {
        TokenKind::Xor => StackItem::Xor,
        TokenKind::Or => StackItem::Or,
        TokenKind::And => StackItem::And,
        TokenKind::Not => StackItem::Not,
        TokenKind::LPar => StackItem::LPar,
        TokenKind::RPar => StackItem::RPar,
        TokenKind::False => StackItem::Operand(Command::PushConst(false)),
        TokenKind::True => StackItem::Operand(Command::PushConst(true)),
        TokenKind::Var => StackItem::Operand(Command::PushVar(
            token.var_id.expect("Var token without a resolved var_id"),
        )),
        other => unreachable!("{other:?} is never shifted onto the parser stack"),
    }
}

pub fn binop_for(item: &StackItem) -> Option<BinOp> {
    match item {
        StackItem::And => Some(BinOp::And),
        StackItem::Or => Some(BinOp::Or),
        StackItem::Xor => Some(BinOp::Xor),
        _ => None,
    }
}
