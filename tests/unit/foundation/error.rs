use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FuzzError::from(ParseError::new(0, "x"))
            .to_string()
            .contains("parse error:")
    );
    assert!(
        FuzzError::generation("x")
            .to_string()
            .contains("generation error:")
    );
    assert!(FuzzError::config("x").to_string().contains("config error:"));
    assert!(
        FuzzError::from(EvalError::DivisionByZero)
            .to_string()
            .contains("evaluation error:")
    );
}

#[test]
fn parse_errors_keep_offset() {
    let err = FuzzError::from(ParseError::new(7, "unexpected token"));
    let msg = err.to_string();
    assert!(msg.contains("byte 7"), "{msg}");
    assert!(msg.contains("unexpected token"), "{msg}");
    match err {
        FuzzError::Parse(inner) => {
            assert_eq!(inner.offset, 7);
            assert_eq!(inner.message, "unexpected token");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn eval_fault_is_recoverable_from_top_level_error() {
    let err = FuzzError::from(EvalError::RemainderByZero);
    assert_eq!(err.as_eval_fault(), Some(&EvalError::RemainderByZero));
    assert_eq!(FuzzError::config("x").as_eval_fault(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FuzzError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
