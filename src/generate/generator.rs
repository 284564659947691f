//! Random expression-tree generation.
//!
//! Every call draws exactly one `f64` in `[0, 1)` and picks a node shape from
//! fixed thresholds, then recurses with the depth budget reduced by one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tree::node::{BinaryOp, ExprNode};

/// Draws below this produce a literal.
pub const LITERAL_THRESHOLD: f64 = 0.2;
/// Draws below this (and at or above [`LITERAL_THRESHOLD`]) produce a negation.
pub const NEGATE_THRESHOLD: f64 = 0.3;
/// Draws below this (and at or above [`NEGATE_THRESHOLD`]) produce a binary node.
/// Everything else produces a grouped node.
pub const BINARY_THRESHOLD: f64 = 0.9;

/// Operator multiset, drawn by uniform index. `+` appears twice.
pub const BINARY_OPS: [BinaryOp; 7] = [
    BinaryOp::Add,
    BinaryOp::Mul,
    BinaryOp::HighMul,
    BinaryOp::Div,
    BinaryOp::Rem,
    BinaryOp::Add,
    BinaryOp::Sub,
];

/// Bound of the small literal range, `[-SMALL_LITERAL_BOUND, SMALL_LITERAL_BOUND]`.
pub const SMALL_LITERAL_BOUND: i64 = 1000;

/// Range literal leaves are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralRange {
    /// `[-1000, 1000]`.
    Small,
    /// The whole `i64` domain.
    #[default]
    Full,
}

impl LiteralRange {
    /// Map the boolean "use full range" switch onto a range.
    pub fn from_full_range(full: bool) -> Self {
        if full { Self::Full } else { Self::Small }
    }

    /// Inclusive bounds of the range.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::Small => (-SMALL_LITERAL_BOUND, SMALL_LITERAL_BOUND),
            Self::Full => (i64::MIN, i64::MAX),
        }
    }

    /// Whether `v` lies in the range.
    pub fn contains(self, v: i64) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&v)
    }
}

/// Recursive tree generator over a borrowed random source.
///
/// The generator owns no randomness of its own: callers pass a seeded RNG so
/// that a corpus can be reproduced from its seed.
pub struct ExprGenerator<'a, R: ?Sized> {
    rng: &'a mut R,
    range: LiteralRange,
}

impl<'a, R: Rng + ?Sized> ExprGenerator<'a, R> {
    /// Create a new generator drawing literals from `range`.
    pub fn new(rng: &'a mut R, range: LiteralRange) -> Self {
        Self { rng, range }
    }

    /// Generate a tree whose depth is at most `max_depth`.
    pub fn generate(&mut self, max_depth: u32) -> ExprNode {
        let switch: f64 = self.rng.random();

        if max_depth == 0 || switch < LITERAL_THRESHOLD {
            // Leaves at the depth floor always use the small range.
            let range = if max_depth == 0 {
                LiteralRange::Small
            } else {
                self.range
            };
            return ExprNode::Literal(self.literal(range));
        }

        let depth = max_depth - 1;
        if switch < NEGATE_THRESHOLD {
            ExprNode::negate(self.generate(depth))
        } else if switch < BINARY_THRESHOLD {
            let left = self.generate(depth);
            let op = BINARY_OPS[self.rng.random_range(0..BINARY_OPS.len())];
            let right = self.generate(depth);
            ExprNode::binary(left, op, right)
        } else {
            ExprNode::grouped(self.generate(depth))
        }
    }

    fn literal(&mut self, range: LiteralRange) -> i64 {
        let (lo, hi) = range.bounds();
        self.rng.random_range(lo..=hi)
    }
}

/// Generate one tree of depth at most `max_depth`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, max_depth: u32, range: LiteralRange) -> ExprNode {
    ExprGenerator::new(rng, range).generate(max_depth)
}
