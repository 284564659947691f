use std::fmt;

use crate::tree::node::ExprNode;

/// Display adapter printing a tree in the target language's syntax.
///
/// Binary nodes are always fully parenthesized; no precedence-based
/// simplification is attempted.
#[derive(Debug, Clone, Copy)]
pub struct TargetSyntax<'a>(pub &'a ExprNode);

impl fmt::Display for TargetSyntax<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ExprNode::Literal(v) => write!(f, "{v}"),
            ExprNode::Negate(child) => write!(f, "-{}", TargetSyntax(child)),
            ExprNode::Grouped(child) => write!(f, "({})", TargetSyntax(child)),
            ExprNode::Binary { op, left, right } => write!(
                f,
                "({} {} {})",
                TargetSyntax(left),
                op.symbol(),
                TargetSyntax(right)
            ),
        }
    }
}

/// Render `node` in the target language's surface syntax.
pub fn render_target(node: &ExprNode) -> String {
    TargetSyntax(node).to_string()
}
