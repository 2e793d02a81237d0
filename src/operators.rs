//! `+` and `-` on evaluated values.
//!
//! Operators are only defined between values of the same kind. There is no
//! coercion: every other pairing is an argument-type error.

use indexmap::IndexSet;

use crate::{
    ast::BinaryOp,
    diagnostics::{NatRegError, Result},
    value::{Value, ValueKind},
};

pub fn apply(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => subtract(left, right),
    }
}

pub fn add(left: &Value, right: &Value) -> Result<Value> {
    use ValueKind::*;
    match (left.kind(), right.kind()) {
        (LiteralSet(a), LiteralSet(b)) => Ok(Value::literal_set(format!("{a}{b}"))),
        (Number(a), Number(b)) => Ok(Value::number(a + b)),
        (Regex(a), Regex(b)) => Ok(Value::regex(format!("{a}{b}"))),
        (Sequence(a), Sequence(b)) => Ok(Value::sequence(a.iter().chain(b).cloned().collect())),
        (
            LiteralSet(_) | Number(_) | Regex(_) | Sequence(_) | Constant(_) | Modifier(_)
            | Alternation(_) | Repetition { .. },
            _,
        ) => Err(mismatch("add", left, right)),
    }
}

pub fn subtract(left: &Value, right: &Value) -> Result<Value> {
    use ValueKind::*;
    match (left.kind(), right.kind()) {
        (LiteralSet(a), LiteralSet(b)) => Ok(Value::literal_set(set_difference(a, b))),
        (Number(a), Number(b)) => Ok(Value::number(a - b)),
        (Regex(_), Regex(_)) => Err(NatRegError::argument_type("cannot subtract two strings")),
        (Sequence(_), Sequence(_)) => {
            Err(NatRegError::argument_type("cannot subtract two sequences"))
        }
        (
            LiteralSet(_) | Number(_) | Regex(_) | Sequence(_) | Constant(_) | Modifier(_)
            | Alternation(_) | Repetition { .. },
            _,
        ) => Err(mismatch("subtract", left, right)),
    }
}

/// Characters of `left` absent from `right`, first occurrence order, no duplicates.
fn set_difference(left: &str, right: &str) -> String {
    let removed: IndexSet<char> = right.chars().collect();
    left.chars()
        .filter(|ch| !removed.contains(ch))
        .collect::<IndexSet<char>>()
        .into_iter()
        .collect()
}

fn mismatch(verb: &str, left: &Value, right: &Value) -> NatRegError {
    NatRegError::argument_type(format!(
        "cannot {verb} two different types of expressions ({} and {})",
        left.kind_name(),
        right.kind_name()
    ))
}
