use crate::eval::lower::lower_to_bytecode;
use crate::eval::vm::{EvalError, eval_program};
use crate::expression::parser::parse_reference;
use crate::foundation::error::FuzzResult;
use crate::tree::node::ExprNode;

/// Evaluate a tree under the target language's 64-bit semantics.
///
/// Returns the fault instead of a value when a `/` or `%` divisor is zero.
pub fn evaluate(node: &ExprNode) -> Result<i64, EvalError> {
    eval_program(&lower_to_bytecode(node))
}

/// Parse and evaluate a string produced by
/// [`render_reference`](crate::render_reference).
pub fn evaluate_reference(src: &str) -> FuzzResult<i64> {
    let node = parse_reference(src)?;
    Ok(evaluate(&node)?)
}
