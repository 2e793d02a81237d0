//! Built-in procedures and character sets seeded into a fresh environment.

use crate::{
    diagnostics::{NatRegError, Result},
    environment::{Arity, Environment},
    value::{Quantity, Value, ValueKind},
};

pub fn install(env: &mut Environment) {
    install_procedures(env);
    install_ascii_sets(env);
}

pub fn install_procedures(env: &mut Environment) {
    constant(env, &["start of line"], "^");
    constant(env, &["end of line"], "$");
    constant(env, &["word boundary"], r"\b");

    modifier(env, &["capture group"], |s| format!("({s})"));
    modifier(env, &["group", "content of group", "group content"], |s| {
        format!("(?:{s})")
    });
    quantifier(env, &["zero or more", "any amount", "any amount of times"], |s| {
        format!("(?:{s})*")
    });
    quantifier(env, &["one or more", "at least one", "at least once"], |s| {
        format!("(?:{s})+")
    });
    quantifier(
        env,
        &["once or none", "at most once", "optional", "optionally", "once at most"],
        |s| format!("(?:{s})?"),
    );
    env.register_procedure(&["lazy", "as few as possible"], Arity::Exact(1), |args| {
        let inner = &args[0];
        match inner.kind() {
            // The bound sits inside the group, so the lazy marker must too.
            ValueKind::Repetition { base, quantity } => {
                let quantity = *quantity;
                Ok(Value::modifier(Some(base.clone()), move |s| {
                    format!("(?:{s}{quantity}?)")
                }))
            }
            _ if inner.is_quantified() => {
                Ok(Value::modifier(Some(inner.clone()), |s| format!("{s}?")))
            }
            _ => Err(NatRegError::argument_type(format!(
                "expected a repetition to make lazy, but got {}",
                inner.kind_name()
            ))),
        }
    });
    modifier(env, &["followed by", "lookahead"], |s| format!("(?={s})"));
    modifier(env, &["not followed by", "negative lookahead"], |s| {
        format!("(?!{s})")
    });
    modifier(env, &["preceded by", "lookbehind"], |s| format!("(?<={s})"));
    modifier(env, &["not preceded by", "negative lookbehind"], |s| {
        format!("(?<!{s})")
    });

    env.register_procedure(&["exactly n", "n times"], Arity::Exact(2), |args| {
        let count = expect_count(&args[1], "repetition count")?;
        Ok(Value::repetition(args[0].clone(), Quantity::Exactly(count)))
    });
    env.register_procedure(&["n or more", "at least n"], Arity::Exact(2), |args| {
        let min = expect_count(&args[1], "range minimum")?;
        Ok(Value::repetition(args[0].clone(), Quantity::AtLeast(min)))
    });
    env.register_procedure(&["up to n"], Arity::Exact(2), |args| {
        let max = expect_count(&args[1], "range maximum")?;
        Ok(Value::repetition(args[0].clone(), Quantity::AtMost(max)))
    });
    env.register_procedure(&["between n and m"], Arity::Exact(3), |args| {
        let min = expect_count(&args[1], "range minimum")?;
        let max = expect_count(&args[2], "range maximum")?;
        if min > max {
            return Err(NatRegError::argument_type(format!(
                "range minimum {min} is greater than range maximum {max}"
            )));
        }
        Ok(Value::repetition(args[0].clone(), Quantity::Between(min, max)))
    });

    env.register_procedure(&["one of", "either", "or"], Arity::AtLeast(2), |args| {
        Ok(Value::alternation(args.to_vec()))
    });
}

pub fn install_ascii_sets(env: &mut Environment) {
    let sets = [
        ("any alphanumeric", "a-zA-Z0-9"),
        ("any lowercase", "a-z"),
        ("any uppercase", "A-Z"),
        ("any numeral", "0-9"),
        ("any digit", r"\d"),
        ("any line break", r"\r\n"),
        ("any newline", r"\r\n"),
        ("lowercase alphanumeric", "a-z0-9"),
        ("uppercase alphanumeric", "A-Z0-9"),
        ("any word character", r"\w"),
        ("any whitespace", r"\s"),
    ];
    for (name, characters) in sets {
        env.register_value(name, Value::literal_set(characters));
    }
    env.register_value("any number", Value::constant(r"(?:[0-9]+(?:\.[0-9]+)?)"));
}

fn constant(env: &mut Environment, names: &[&str], text: &'static str) {
    env.register_procedure(names, Arity::Exact(0), move |_| Ok(Value::constant(text)));
}

fn modifier(env: &mut Environment, names: &[&str], transform: fn(&str) -> String) {
    env.register_procedure(names, Arity::Exact(1), move |args| {
        Ok(Value::modifier(Some(args[0].clone()), transform))
    });
}

fn quantifier(env: &mut Environment, names: &[&str], transform: fn(&str) -> String) {
    env.register_procedure(names, Arity::Exact(1), move |args| {
        Ok(Value::quantifier(Some(args[0].clone()), transform))
    });
}

/// Extracts a non-negative whole number usable as a repetition bound.
fn expect_count(value: &Value, role: &str) -> Result<u32> {
    let Some(n) = value.as_number() else {
        return Err(NatRegError::argument_type(format!(
            "expected an integer, but got {} for {role}",
            value.kind_name()
        )));
    };
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(NatRegError::argument_type(format!(
            "expected an integer number, but got {n} for {role}"
        )));
    }
    if n < 0.0 || n > f64::from(u32::MAX) {
        return Err(NatRegError::argument_type(format!(
            "expected a non-negative integer, but got {n} for {role}"
        )));
    }
    Ok(n as u32)
}
