use natreg::{
    ast::BinaryOp,
    operators,
    value::{Quantity, Value},
    NatRegError,
};
use pretty_assertions::assert_eq;

fn sample_values() -> Vec<Value> {
    vec![
        Value::literal_set("abc"),
        Value::regex("abc"),
        Value::number(3.0),
        Value::sequence(vec![Some(Value::regex("a"))]),
        Value::constant("^"),
        Value::modifier(Some(Value::regex("a")), |s| format!("({s})")),
        Value::alternation(vec![Value::regex("a"), Value::regex("b")]),
        Value::repetition(Value::regex("a"), Quantity::Exactly(2)),
    ]
}

#[test]
fn emission_per_kind() {
    let emitted: Vec<String> = sample_values().iter().map(Value::to_regex).collect();
    assert_eq!(
        emitted,
        vec![
            "[abc]",
            "abc",
            "3",
            "a",
            "^",
            "(a)",
            "(?:(?:a)|(?:b))",
            "(?:a{2})",
        ]
    );
}

#[test]
fn empty_slots_emit_nothing() {
    let sequence = Value::sequence(vec![Some(Value::regex("a")), None, Some(Value::regex("b"))]);
    assert_eq!(sequence.to_regex(), "ab");

    let modifier = Value::modifier(None, |s| format!("(?:{s})+"));
    assert_eq!(modifier.to_regex(), "(?:)+");
}

#[test]
fn quantity_rendering() {
    assert_eq!(Quantity::Exactly(3).to_string(), "{3}");
    assert_eq!(Quantity::AtLeast(1).to_string(), "{1,}");
    assert_eq!(Quantity::AtMost(4).to_string(), "{0,4}");
    assert_eq!(Quantity::Between(2, 5).to_string(), "{2,5}");
}

#[test]
fn literal_set_addition_concatenates() {
    let sum = operators::add(&Value::literal_set("a-z"), &Value::literal_set(r"\d")).unwrap();
    assert_eq!(sum.to_regex(), r"[a-z\d]");
}

#[test]
fn literal_set_subtraction_is_ordered_and_idempotent() {
    let left = Value::literal_set("hello world");
    let right = Value::literal_set("lo");
    let once = operators::subtract(&left, &right).unwrap();
    assert_eq!(once.to_regex(), "[he wrd]");
    let twice = operators::subtract(&once, &right).unwrap();
    assert_eq!(twice.to_regex(), once.to_regex());
}

#[test]
fn number_operators_follow_float_arithmetic() {
    let a = Value::number(0.1);
    let b = Value::number(0.2);
    let sum = operators::apply(BinaryOp::Add, &a, &b).unwrap();
    assert_eq!(sum.as_number(), Some(0.1 + 0.2));
    let difference = operators::apply(BinaryOp::Sub, &a, &b).unwrap();
    assert_eq!(difference.as_number(), Some(0.1 - 0.2));
}

#[test]
fn sequence_addition_keeps_slots() {
    let left = Value::sequence(vec![Some(Value::constant("^")), None]);
    let right = Value::sequence(vec![Some(Value::constant("$"))]);
    let sum = operators::add(&left, &right).unwrap();
    assert_eq!(sum.to_regex(), "^$");
}

#[test]
fn mismatched_kinds_never_combine() {
    let values = sample_values();
    for (i, left) in values.iter().enumerate() {
        for (j, right) in values.iter().enumerate() {
            if i == j {
                continue;
            }
            for op in [BinaryOp::Add, BinaryOp::Sub] {
                match operators::apply(op, left, right) {
                    Err(NatRegError::ArgumentType { message }) => {
                        assert!(message.contains("two different types"), "{message}");
                        assert!(message.contains(left.kind_name()), "{message}");
                        assert!(message.contains(right.kind_name()), "{message}");
                    }
                    other => panic!(
                        "{} {} {} should fail, got {other:?}",
                        left.kind_name(),
                        op.symbol(),
                        right.kind_name()
                    ),
                }
            }
        }
    }
}

#[test]
fn unsupported_same_kind_pairs_fail() {
    for value in [
        Value::constant("^"),
        Value::alternation(vec![Value::regex("a")]),
        Value::repetition(Value::regex("a"), Quantity::AtLeast(1)),
    ] {
        assert!(operators::add(&value, &value).is_err());
        assert!(operators::subtract(&value, &value).is_err());
    }
}

#[test]
fn forbidden_subtractions_have_their_own_messages() {
    let strings = operators::subtract(&Value::regex("a"), &Value::regex("b")).unwrap_err();
    assert_eq!(strings.to_string(), "cannot subtract two strings");

    let sequence = Value::sequence(Vec::new());
    let sequences = operators::subtract(&sequence, &sequence).unwrap_err();
    assert_eq!(sequences.to_string(), "cannot subtract two sequences");
}
