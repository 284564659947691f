//! exprfuzz generates differential test cases for compilers and interpreters
//! of languages with fixed-width signed 64-bit integer arithmetic.
//!
//! A case is one random expression tree rendered twice:
//!
//! - in the target language's surface syntax ([`render_target`]), and
//! - in a reference dialect ([`render_reference`]) whose evaluation
//!   ([`evaluate_reference`]) reproduces the target's exact integer
//!   semantics: wraparound, truncating division and remainder, and the
//!   high-multiply operator `*>>`.
//!
//! The expected value and the target rendering are paired by
//! [`generate_case`] and written out with [`emit_case`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod case;
mod eval;
mod expression;
mod foundation;
mod generate;
mod render;
mod tree;

pub use crate::case::driver::{CaseOptions, FaultPolicy, MAX_DEPTH, TestCase, generate_case};
pub use crate::case::emit::{EmitFormat, emit_case, template_lines};
pub use crate::eval::evaluate::{evaluate, evaluate_reference};
pub use crate::eval::vm::EvalError;
pub use crate::expression::error::ParseError;
pub use crate::expression::parser::parse_reference;
pub use crate::foundation::error::{FuzzError, FuzzResult};
pub use crate::generate::generator::{
    BINARY_OPS, BINARY_THRESHOLD, ExprGenerator, LITERAL_THRESHOLD, LiteralRange,
    NEGATE_THRESHOLD, SMALL_LITERAL_BOUND, generate,
};
pub use crate::render::reference::{ReferenceSyntax, render_reference};
pub use crate::render::target::{TargetSyntax, render_target};
pub use crate::tree::node::{BinaryOp, ExprNode};

impl ExprNode {
    /// Render this tree in the target language's surface syntax.
    pub fn render_target(&self) -> String {
        render_target(self)
    }

    /// Render this tree in the reference dialect.
    pub fn render_reference(&self) -> String {
        render_reference(self)
    }
}
