use super::*;
use crate::eval::lower::lower_to_bytecode;
use crate::tree::node::{BinaryOp, ExprNode};

fn run(e: &ExprNode) -> Result<i64, EvalError> {
    eval_program(&lower_to_bytecode(e))
}

fn bin(a: i64, op: BinaryOp, b: i64) -> ExprNode {
    ExprNode::binary(ExprNode::literal(a), op, ExprNode::literal(b))
}

#[test]
fn high_multiply_of_small_operands_is_zero() {
    assert_eq!(run(&bin(3, BinaryOp::HighMul, 5)), Ok(0));
}

#[test]
fn high_multiply_keeps_upper_half() {
    assert_eq!(mul_hi(i64::MAX, i64::MAX), 0x3fff_ffff_ffff_ffff);
    assert_eq!(mul_hi(i64::MIN, i64::MIN), 0x4000_0000_0000_0000);
    assert_eq!(mul_hi(i64::MIN, 1), -1);
    assert_eq!(mul_hi(1 << 32, 1 << 32), 1);
    // Sign-extended: a small negative product still has an all-ones upper half.
    assert_eq!(mul_hi(-3, 5), -1);
    assert_eq!(mul_hi(-3, 0), 0);
}

#[test]
fn remainder_follows_dividend() {
    assert_eq!(run(&bin(-7, BinaryOp::Rem, 3)), Ok(-1));
    assert_eq!(run(&bin(7, BinaryOp::Rem, -3)), Ok(1));
    assert_eq!(run(&bin(i64::MIN, BinaryOp::Rem, -1)), Ok(0));
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(run(&bin(-7, BinaryOp::Div, 2)), Ok(-3));
    assert_eq!(run(&bin(7, BinaryOp::Div, -2)), Ok(-3));
    assert_eq!(run(&bin(i64::MIN, BinaryOp::Div, -1)), Ok(i64::MIN));
}

#[test]
fn zero_divisor_faults() {
    assert_eq!(run(&bin(1, BinaryOp::Div, 0)), Err(EvalError::DivisionByZero));
    assert_eq!(run(&bin(1, BinaryOp::Rem, 0)), Err(EvalError::RemainderByZero));

    // The fault propagates out of any enclosing expression.
    let nested = ExprNode::binary(
        ExprNode::literal(0),
        BinaryOp::Mul,
        ExprNode::grouped(bin(5, BinaryOp::Div, 0)),
    );
    assert_eq!(run(&nested), Err(EvalError::DivisionByZero));
}

#[test]
fn ring_operators_wrap() {
    assert_eq!(run(&bin(i64::MAX, BinaryOp::Add, 1)), Ok(i64::MIN));
    assert_eq!(run(&bin(i64::MIN, BinaryOp::Sub, 1)), Ok(i64::MAX));
    assert_eq!(run(&bin(i64::MAX, BinaryOp::Mul, 2)), Ok(-2));
    assert_eq!(
        run(&ExprNode::negate(ExprNode::literal(i64::MIN))),
        Ok(i64::MIN)
    );
}

#[test]
fn grouping_is_transparent() {
    let e = ExprNode::grouped(ExprNode::grouped(ExprNode::literal(-12)));
    assert_eq!(run(&e), Ok(-12));
}

#[test]
fn stack_reuse_clears_previous_state() {
    let mut stack = vec![1, 2, 3];
    let p = lower_to_bytecode(&bin(2, BinaryOp::Sub, 5));
    assert_eq!(eval_program_with_stack(&p, &mut stack), Ok(-3));
    assert!(stack.is_empty());
}

#[test]
fn malformed_programs_are_reported() {
    let mut p = lower_to_bytecode(&ExprNode::literal(1));
    p.ops.push(crate::eval::bytecode::Op::Add);
    assert!(matches!(eval_program(&p), Err(EvalError::Malformed(_))));

    let mut p = lower_to_bytecode(&ExprNode::literal(1));
    p.consts.clear();
    assert!(matches!(eval_program(&p), Err(EvalError::Malformed(_))));
}
