use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::eval::evaluate::evaluate_reference;
use crate::foundation::error::{FuzzError, FuzzResult};
use crate::generate::generator::{LiteralRange, generate};
use crate::render::reference::render_reference;
use crate::render::target::render_target;
use crate::tree::node::ExprNode;

/// Largest accepted `max_depth`.
///
/// A node has 1.4 children on average, so the expected tree size grows
/// like `1.4^max_depth`: about 30 nodes at the default depth of 10, about
/// 50 000 at 32, and beyond memory well before 64.
pub const MAX_DEPTH: u32 = 32;

/// What to do when a generated expression faults under reference evaluation.
///
/// The generator never steers away from zero divisors, so a fault means the
/// whole tree is unusable as a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Discard the tree and draw a fresh one, up to `max_attempts` times.
    #[default]
    Regenerate,
    /// Surface the fault to the caller.
    Fail,
}

/// Options for producing one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseOptions {
    /// Depth budget handed to the generator, at most [`MAX_DEPTH`].
    pub max_depth: u32,
    /// Literal range above the depth floor.
    pub range: LiteralRange,
    /// Fault handling.
    pub fault_policy: FaultPolicy,
    /// Trees drawn before giving up under [`FaultPolicy::Regenerate`].
    pub max_attempts: u32,
}

impl Default for CaseOptions {
    fn default() -> Self {
        Self {
            max_depth: 10,
            range: LiteralRange::Full,
            fault_policy: FaultPolicy::Regenerate,
            max_attempts: 64,
        }
    }
}

impl CaseOptions {
    /// Reject option combinations that can never produce a case.
    pub fn validate(&self) -> FuzzResult<()> {
        if self.max_attempts == 0 {
            return Err(FuzzError::config("max_attempts must be at least 1"));
        }
        if self.max_depth > MAX_DEPTH {
            return Err(FuzzError::config(format!(
                "max_depth {} exceeds the limit of {MAX_DEPTH}",
                self.max_depth
            )));
        }
        Ok(())
    }
}

/// One expected value paired with both renderings of the same tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// Value of the expression under reference semantics.
    pub expected: i64,
    /// Target-language rendering.
    pub target: String,
    /// Reference-dialect rendering.
    pub reference: String,
    /// Trees drawn to obtain this case, including this one.
    pub attempts: u32,
    #[serde(skip)]
    tree: ExprNode,
}

impl TestCase {
    /// Render a tree and take the expected value from its reference rendering.
    ///
    /// Fails with [`FuzzError::Evaluation`] when the expression divides by
    /// zero, or with [`FuzzError::Parse`] when the rendering nests too deeply
    /// to be read back.
    pub fn from_tree(tree: ExprNode) -> FuzzResult<Self> {
        let reference = render_reference(&tree);
        let expected = evaluate_reference(&reference)?;
        Ok(Self {
            expected,
            target: render_target(&tree),
            reference,
            attempts: 1,
            tree,
        })
    }

    /// The tree both renderings came from.
    pub fn tree(&self) -> &ExprNode {
        &self.tree
    }
}

/// Generate, evaluate and render one test case.
#[tracing::instrument(skip(rng, opts), fields(max_depth = opts.max_depth, range = ?opts.range))]
pub fn generate_case<R: Rng + ?Sized>(rng: &mut R, opts: &CaseOptions) -> FuzzResult<TestCase> {
    opts.validate()?;

    for attempt in 1..=opts.max_attempts {
        let tree = generate(rng, opts.max_depth, opts.range);
        tracing::trace!(attempt, nodes = tree.node_count(), "generated tree");

        match TestCase::from_tree(tree) {
            Ok(mut case) => {
                case.attempts = attempt;
                return Ok(case);
            }
            Err(FuzzError::Evaluation(fault)) => match opts.fault_policy {
                FaultPolicy::Fail => return Err(fault.into()),
                FaultPolicy::Regenerate => {
                    tracing::debug!(attempt, %fault, "discarding faulting expression");
                }
            },
            Err(err) => return Err(err),
        }
    }

    Err(FuzzError::generation(format!(
        "no fault-free expression after {} attempts",
        opts.max_attempts
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/case/driver.rs"]
mod tests;
