//! Stack machine with the target language's 64-bit integer semantics.
//!
//! - `+`, `-`, `*` and negation wrap in two's complement.
//! - `/` truncates toward zero; `i64::MIN / -1` wraps to `i64::MIN`.
//! - `%` takes the sign of the dividend; `i64::MIN % -1` is `0`.
//! - `*>>` is the upper half of the exact 128-bit product.
//! - A zero divisor is a fault, never a value.

use crate::eval::bytecode::{BytecodeProgram, Op};

/// Fault raised while evaluating reference semantics.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Right operand of `/` was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Right operand of `%` was zero.
    #[error("remainder by zero")]
    RemainderByZero,

    /// Malformed program (internal).
    #[error("malformed program: {0}")]
    Malformed(String),
}

pub(crate) fn eval_program(p: &BytecodeProgram) -> Result<i64, EvalError> {
    let mut stack: Vec<i64> = Vec::with_capacity(16);
    eval_program_with_stack(p, &mut stack)
}

pub(crate) fn eval_program_with_stack(
    p: &BytecodeProgram,
    stack: &mut Vec<i64>,
) -> Result<i64, EvalError> {
    stack.clear();

    for &op in &p.ops {
        match op {
            Op::PushConst(idx) => {
                let c = p
                    .consts
                    .get(idx.0 as usize)
                    .ok_or_else(|| EvalError::Malformed("const idx out of range".to_owned()))?;
                stack.push(*c);
            }
            Op::Neg => {
                let v = pop(stack)?;
                stack.push(v.wrapping_neg());
            }
            Op::Add => bin(stack, |a, b| Ok(a.wrapping_add(b)))?,
            Op::Sub => bin(stack, |a, b| Ok(a.wrapping_sub(b)))?,
            Op::Mul => bin(stack, |a, b| Ok(a.wrapping_mul(b)))?,
            Op::Div => bin(stack, div)?,
            Op::Rem => bin(stack, rem)?,
            Op::MulHi => bin(stack, |a, b| Ok(mul_hi(a, b)))?,
        }
    }

    if stack.len() != 1 {
        return Err(EvalError::Malformed(format!(
            "stack has {} values at end of program",
            stack.len()
        )));
    }
    pop(stack)
}

/// Truncating division.
pub(crate) fn div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

/// Remainder after truncating division; the sign follows the dividend.
pub(crate) fn rem(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::RemainderByZero);
    }
    Ok(a.wrapping_rem(b))
}

/// Upper 64 bits of the signed 128-bit product.
pub(crate) fn mul_hi(a: i64, b: i64) -> i64 {
    ((i128::from(a) * i128::from(b)) >> 64) as i64
}

fn pop(stack: &mut Vec<i64>) -> Result<i64, EvalError> {
    stack
        .pop()
        .ok_or_else(|| EvalError::Malformed("stack underflow".to_owned()))
}

fn bin(
    stack: &mut Vec<i64>,
    f: impl FnOnce(i64, i64) -> Result<i64, EvalError>,
) -> Result<(), EvalError> {
    let b = pop(stack)?;
    let a = pop(stack)?;
    stack.push(f(a, b)?);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/vm.rs"]
mod tests;
