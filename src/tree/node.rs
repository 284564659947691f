use std::fmt;

/// Binary operators of the target language.
///
/// `Add`, `Sub` and `Mul` wrap on overflow; `Div` and `Rem` truncate toward
/// zero; `HighMul` (`*>>`) yields the upper 64 bits of the 128-bit product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `*>>`
    HighMul,
}

impl BinaryOp {
    /// Every operator, in symbol order.
    pub const ALL: [BinaryOp; 6] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Rem,
        BinaryOp::HighMul,
    ];

    /// The operator's token in the target language.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::HighMul => "*>>",
        }
    }

    /// Inverse of [`BinaryOp::symbol`].
    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == s)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An immutable arithmetic expression tree.
///
/// Each child is owned by exactly one parent. Trees are built by the
/// generator (or by hand, or by the parsers) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    /// A 64-bit signed integer literal.
    Literal(i64),
    /// `-child`.
    Negate(Box<ExprNode>),
    /// `(left op right)`.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<ExprNode>,
        /// Right operand.
        right: Box<ExprNode>,
    },
    /// `(child)`. Explicit parentheses with no semantic effect.
    Grouped(Box<ExprNode>),
}

impl ExprNode {
    /// Build a [`ExprNode::Literal`].
    pub fn literal(value: i64) -> Self {
        Self::Literal(value)
    }

    /// Build a [`ExprNode::Negate`].
    pub fn negate(child: ExprNode) -> Self {
        Self::Negate(Box::new(child))
    }

    /// Build a [`ExprNode::Binary`].
    pub fn binary(left: ExprNode, op: BinaryOp, right: ExprNode) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a [`ExprNode::Grouped`].
    pub fn grouped(child: ExprNode) -> Self {
        Self::Grouped(Box::new(child))
    }

    /// Number of edges on the longest root-to-leaf path. A literal has depth 0.
    pub fn depth(&self) -> u32 {
        match self {
            ExprNode::Literal(_) => 0,
            ExprNode::Negate(child) | ExprNode::Grouped(child) => 1 + child.depth(),
            ExprNode::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        match self {
            ExprNode::Literal(_) => 1,
            ExprNode::Negate(child) | ExprNode::Grouped(child) => 1 + child.node_count(),
            ExprNode::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Number of [`ExprNode::Binary`] nodes.
    pub fn binary_count(&self) -> usize {
        self.ops().len()
    }

    /// Binary operators in pre-order.
    pub fn ops(&self) -> Vec<BinaryOp> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if let ExprNode::Binary { op, .. } = n {
                out.push(*op);
            }
        });
        out
    }

    /// Literal values in pre-order (left to right).
    pub fn literals(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if let ExprNode::Literal(v) = n {
                out.push(*v);
            }
        });
        out
    }

    /// Visit every node in pre-order, left child before right child.
    pub fn walk(&self, f: &mut impl FnMut(&ExprNode)) {
        f(self);
        match self {
            ExprNode::Literal(_) => {}
            ExprNode::Negate(child) | ExprNode::Grouped(child) => child.walk(f),
            ExprNode::Binary { left, right, .. } => {
                left.walk(f);
                right.walk(f);
            }
        }
    }
}
