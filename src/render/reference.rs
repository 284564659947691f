use std::fmt;

use crate::tree::node::{BinaryOp, ExprNode};

/// Display adapter printing a tree in the reference dialect.
///
/// The dialect mirrors the target syntax node for node, but every literal is
/// an explicit 64-bit constant and the operators whose semantics differ from
/// plain integer arithmetic are spelled as calls:
///
/// | node            | reference form        |
/// |-----------------|-----------------------|
/// | literal `v`     | `i64(v)`              |
/// | `-e`            | `-e`                  |
/// | `(e)`           | `(e)`                 |
/// | `a + b` etc.    | `(a + b)` (wrapping)  |
/// | `a / b`         | `div(a, b)`           |
/// | `a % b`         | `fmod(a, b)`          |
/// | `a *>> b`       | `mulhi(a, b)`         |
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSyntax<'a>(pub &'a ExprNode);

impl fmt::Display for ReferenceSyntax<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ExprNode::Literal(v) => write!(f, "i64({v})"),
            ExprNode::Negate(child) => write!(f, "-{}", ReferenceSyntax(child)),
            ExprNode::Grouped(child) => write!(f, "({})", ReferenceSyntax(child)),
            ExprNode::Binary { op, left, right } => {
                let (l, r) = (ReferenceSyntax(left), ReferenceSyntax(right));
                match reference_call(*op) {
                    Some(func) => write!(f, "{func}({l}, {r})"),
                    None => write!(f, "({l} {} {r})", op.symbol()),
                }
            }
        }
    }
}

/// Function name used for `op` in the reference dialect, or `None` when the
/// operator is written infix.
pub(crate) fn reference_call(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => None,
        BinaryOp::Div => Some("div"),
        BinaryOp::Rem => Some("fmod"),
        BinaryOp::HighMul => Some("mulhi"),
    }
}

/// Render `node` in the reference dialect understood by
/// [`evaluate_reference`](crate::evaluate_reference).
pub fn render_reference(node: &ExprNode) -> String {
    ReferenceSyntax(node).to_string()
}
