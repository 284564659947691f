use super::*;
use crate::eval::evaluate::evaluate;
use crate::eval::vm::EvalError;
use crate::expression::parser::MAX_NESTING;
use crate::tree::node::BinaryOp;
use rand::SeedableRng;

fn rng(seed: u64) -> rand::rngs::StdRng {
    rand::rngs::StdRng::seed_from_u64(seed)
}

#[test]
fn renderings_agree_with_expected_value() {
    let opts = CaseOptions::default();
    let mut r = rng(1);
    for _ in 0..50 {
        let case = generate_case(&mut r, &opts).unwrap();
        assert_eq!(evaluate_reference(&case.reference).unwrap(), case.expected);
        assert_eq!(case.target, render_target(case.tree()));
        assert!(case.attempts >= 1);
    }
}

#[test]
fn depth_zero_case_is_a_bare_literal() {
    let opts = CaseOptions {
        max_depth: 0,
        range: LiteralRange::Small,
        ..CaseOptions::default()
    };
    let case = generate_case(&mut rng(3), &opts).unwrap();
    assert!((-1000..=1000).contains(&case.expected));
    assert_eq!(case.target, case.expected.to_string());
    assert_eq!(case.reference, format!("i64({})", case.expected));
    assert_eq!(case.attempts, 1);
}

/// Find a seed whose first tree faults, so the policies can be observed.
fn faulting_seed(opts: &CaseOptions) -> u64 {
    (0..10_000)
        .find(|&seed| {
            let tree = generate(&mut rng(seed), opts.max_depth, opts.range);
            evaluate(&tree).is_err()
        })
        .expect("some seed produces a zero divisor")
}

#[test]
fn fail_policy_surfaces_the_fault() {
    let opts = CaseOptions {
        max_depth: 4,
        range: LiteralRange::Small,
        fault_policy: FaultPolicy::Fail,
        ..CaseOptions::default()
    };
    let seed = faulting_seed(&opts);
    let err = generate_case(&mut rng(seed), &opts).unwrap_err();
    assert!(err.as_eval_fault().is_some(), "{err}");
}

#[test]
fn regenerate_policy_retries_past_the_fault() {
    let opts = CaseOptions {
        max_depth: 4,
        range: LiteralRange::Small,
        ..CaseOptions::default()
    };
    let seed = faulting_seed(&opts);
    let case = generate_case(&mut rng(seed), &opts).unwrap();
    assert!(case.attempts >= 2);
    assert_eq!(evaluate(case.tree()), Ok(case.expected));
}

#[test]
fn regenerate_policy_gives_up_after_max_attempts() {
    let opts = CaseOptions {
        max_depth: 4,
        range: LiteralRange::Small,
        max_attempts: 1,
        ..CaseOptions::default()
    };
    let seed = faulting_seed(&opts);
    let err = generate_case(&mut rng(seed), &opts).unwrap_err();
    assert!(matches!(err, FuzzError::Generation(_)), "{err}");
}

#[test]
fn zero_attempts_is_a_config_error() {
    let opts = CaseOptions {
        max_attempts: 0,
        ..CaseOptions::default()
    };
    let err = generate_case(&mut rng(0), &opts).unwrap_err();
    assert!(matches!(err, FuzzError::Config(_)), "{err}");
}

#[test]
fn from_tree_reports_division_by_zero() {
    let tree = ExprNode::binary(ExprNode::literal(1), BinaryOp::Div, ExprNode::literal(0));
    let err = TestCase::from_tree(tree).unwrap_err();
    assert_eq!(err.as_eval_fault(), Some(&EvalError::DivisionByZero));
}

#[test]
fn expected_value_comes_from_the_reference_rendering() {
    let tree = ExprNode::binary(
        ExprNode::negate(ExprNode::literal(i64::MIN)),
        BinaryOp::HighMul,
        ExprNode::grouped(ExprNode::literal(3)),
    );
    let case = TestCase::from_tree(tree).unwrap();
    assert_eq!(case.reference, "mulhi(-i64(-9223372036854775808), (i64(3)))");
    assert_eq!(case.expected, -2);
    assert_eq!(evaluate_reference(&case.reference).unwrap(), case.expected);
}

#[test]
fn from_tree_rejects_trees_the_reference_cannot_read_back() {
    let mut tree = ExprNode::literal(1);
    for _ in 0..MAX_NESTING + 88 {
        tree = ExprNode::negate(tree);
    }
    assert_eq!(evaluate(&tree), Ok(1));
    let err = TestCase::from_tree(tree).unwrap_err();
    match err {
        FuzzError::Parse(inner) => assert_eq!(inner.offset, MAX_NESTING),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn depth_above_the_cap_is_a_config_error() {
    let at_cap = CaseOptions {
        max_depth: MAX_DEPTH,
        ..CaseOptions::default()
    };
    assert!(at_cap.validate().is_ok());

    let opts = CaseOptions {
        max_depth: MAX_DEPTH + 1,
        ..CaseOptions::default()
    };
    let err = generate_case(&mut rng(0), &opts).unwrap_err();
    assert!(matches!(err, FuzzError::Config(_)), "{err}");
    assert!(err.to_string().contains("max_depth"), "{err}");
}

#[test]
fn deepest_allowed_tree_reads_back() {
    let mut tree = ExprNode::literal(7);
    for _ in 0..MAX_DEPTH {
        tree = ExprNode::negate(tree);
    }
    assert_eq!(tree.depth(), MAX_DEPTH);
    let case = TestCase::from_tree(tree).unwrap();
    assert_eq!(case.expected, 7);
    assert_eq!(case.reference, format!("{}i64(7)", "-".repeat(MAX_DEPTH as usize)));
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: CaseOptions =
        serde_json::from_str(r#"{ "max_depth": 3, "fault_policy": "fail" }"#).unwrap();
    assert_eq!(opts.max_depth, 3);
    assert_eq!(opts.fault_policy, FaultPolicy::Fail);
    assert_eq!(opts.range, LiteralRange::Full);
    assert_eq!(opts.max_attempts, 64);

    assert!(serde_json::from_str::<CaseOptions>(r#"{ "depth": 3 }"#).is_err());
}
