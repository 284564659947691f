use crate::eval::bytecode::{BytecodeProgram, Op};
use crate::tree::node::{BinaryOp, ExprNode};

/// Flatten a tree into postfix bytecode, left operand first.
///
/// Grouping has no semantic effect and emits nothing.
pub(crate) fn lower_to_bytecode(node: &ExprNode) -> BytecodeProgram {
    let mut p = BytecodeProgram::new();
    lower_node(node, &mut p);
    p
}

fn lower_node(node: &ExprNode, out: &mut BytecodeProgram) {
    match node {
        ExprNode::Literal(v) => {
            let idx = out.push_const(*v);
            out.ops.push(Op::PushConst(idx));
        }
        ExprNode::Negate(child) => {
            lower_node(child, out);
            out.ops.push(Op::Neg);
        }
        ExprNode::Grouped(child) => lower_node(child, out),
        ExprNode::Binary { op, left, right } => {
            lower_node(left, out);
            lower_node(right, out);
            out.ops.push(match op {
                BinaryOp::Add => Op::Add,
                BinaryOp::Sub => Op::Sub,
                BinaryOp::Mul => Op::Mul,
                BinaryOp::Div => Op::Div,
                BinaryOp::Rem => Op::Rem,
                BinaryOp::HighMul => Op::MulHi,
            });
        }
    }
}
