//! Executes a compiled [`CommandList`] against an [`Assignment`].

use crate::internal::assignment::Assignment;
use crate::internal::command::{BinOp, Command, CommandList};

/// Runs `commands` against `assignment`, returning the formula's truth value.
///
/// # Panics
///
/// Panics if the command list does not leave exactly one boolean on the stack. That can only
/// happen if the compiler produced a malformed command list — a broken invariant, not a user
/// error, so this is not a recoverable `Result`.
pub fn evaluate(commands: &CommandList, assignment: &Assignment) -> bool {
    let mut stack: Vec<bool> = Vec::with_capacity(commands.as_slice().len());
    for cmd in commands.as_slice() {
        match cmd {
            Command::PushConst(b) => stack.push(*b),
            Command::PushVar(id) => stack.push(assignment.bit(*id)),
            Command::Not => {
                let top = stack.pop().expect("evaluator stack underflow on Not");
                stack.push(!top);
            }
            Command::Binop(op) => {
                let rhs = stack.pop().expect("evaluator stack underflow on Binop rhs");
                let lhs = stack.pop().expect("evaluator stack underflow on Binop lhs");
                let result = match op {
                    BinOp::And => lhs & rhs,
                    BinOp::Or => lhs | rhs,
                    BinOp::Xor => lhs ^ rhs,
                };
                stack.push(result);
            }
        }
    }
    assert_eq!(stack.len(), 1, "evaluator did not reduce to a single value");
    stack[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::assignment::LongAssignment;

    fn assign(bits: u64, len: usize) -> Assignment<'static> {
        Assignment::Exhaustive(LongAssignment::new(bits, len))
    }

    #[test]
    fn const_true() {
        let mut cl = CommandList::new();
        cl.push(Command::PushConst(true));
        assert!(evaluate(&cl, &assign(0, 0)));
    }

    #[test]
    fn variable_and_not() {
        // ~a, a = false -> true
        let mut cl = CommandList::new();
        cl.push(Command::PushVar(0));
        cl.push(Command::Not);
        assert!(evaluate(&cl, &assign(0b0, 1)));
        assert!(!evaluate(&cl, &assign(0b1, 1)));
    }

    #[test]
    fn binary_and_or_xor() {
        // a & b, a=1 b=1
        let mut and_cl = CommandList::new();
        and_cl.push(Command::PushVar(0));
        and_cl.push(Command::PushVar(1));
        and_cl.push(Command::Binop(BinOp::And));
        assert!(evaluate(&and_cl, &assign(0b11, 2)));
        assert!(!evaluate(&and_cl, &assign(0b01, 2)));

        // a | b, a=0 b=1
        let mut or_cl = CommandList::new();
        or_cl.push(Command::PushVar(0));
        or_cl.push(Command::PushVar(1));
        or_cl.push(Command::Binop(BinOp::Or));
        assert!(evaluate(&or_cl, &assign(0b10, 2)));
        assert!(!evaluate(&or_cl, &assign(0b00, 2)));

        // a ^ b, a=1 b=1 -> false
        let mut xor_cl = CommandList::new();
        xor_cl.push(Command::PushVar(0));
        xor_cl.push(Command::PushVar(1));
        xor_cl.push(Command::Binop(BinOp::Xor));
        assert!(!evaluate(&xor_cl, &assign(0b11, 2)));
        assert!(evaluate(&xor_cl, &assign(0b01, 2)));
    }

    #[test]
    #[should_panic(expected = "evaluator did not reduce to a single value")]
    fn malformed_command_list_panics() {
        let mut cl = CommandList::new();
        cl.push(Command::PushConst(true));
        cl.push(Command::PushConst(false));
        evaluate(&cl, &assign(0, 0));
    }
}
