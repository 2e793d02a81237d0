use crate::{
    ast::{Expr, ExprKind, Program, Stmt, StmtKind},
    diagnostics::{NatRegError, Result},
    environment::Environment,
    operators, parser, stdlib,
    value::Value,
};

/// Compiles one NatReg source text against a freshly seeded environment.
pub fn compile(source: &str) -> Result<String> {
    Compiler::new().compile_source(source)
}

/// Program driver. Owns the environment that `define` statements extend.
pub struct Compiler {
    env: Environment,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Creates a compiler whose environment holds the standard library.
    pub fn new() -> Self {
        let mut env = Environment::new();
        stdlib::install(&mut env);
        Self { env }
    }

    pub fn with_environment(env: Environment) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn compile_source(&mut self, source: &str) -> Result<String> {
        let program = parser::parse_program(source).map_err(NatRegError::from)?;
        self.compile_program(&program)
    }

    /// Runs every statement in order and returns the concatenated `match` output.
    pub fn compile_program(&mut self, program: &Program) -> Result<String> {
        let mut output = String::new();
        for stmt in &program.items {
            if let Some(emitted) = self.execute_statement(stmt)? {
                output.push_str(&emitted);
            }
        }
        Ok(output)
    }

    fn execute_statement(&mut self, stmt: &Stmt) -> Result<Option<String>> {
        match &stmt.kind {
            StmtKind::Define { name, value } => {
                let name = strip_delimiters(name);
                let value = evaluate(value, &self.env)?;
                tracing::debug!(name, kind = value.kind_name(), "define");
                self.env.register_value(name, value);
                Ok(None)
            }
            StmtKind::Match(expr) => {
                let emitted = evaluate(expr, &self.env)?.to_regex();
                tracing::debug!(%emitted, "match");
                Ok(Some(emitted))
            }
        }
    }
}

/// Evaluates an expression. Never mutates the environment.
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value> {
    match &expr.kind {
        ExprKind::Regex(raw) => Ok(Value::regex(unescape_string(strip_delimiters(raw)))),
        ExprKind::LiteralSet(raw) => Ok(Value::literal_set(strip_delimiters(raw))),
        ExprKind::Number(text) => text
            .parse::<f64>()
            .map(Value::number)
            .map_err(|_| NatRegError::LiteralParse { text: text.clone() }),
        ExprKind::Sequence(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(Some(evaluate(element, env)?));
            }
            Ok(Value::sequence(values))
        }
        ExprKind::Reference { words, args } => {
            let name = words.join(" ");
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(evaluate(arg, env)?);
            }
            env.resolve(&name, &values)
        }
        ExprKind::Binary { op, left, right } => {
            let left = evaluate(left, env)?;
            let right = evaluate(right, env)?;
            operators::apply(*op, &left, &right)
        }
    }
}

/// Drops one leading and one trailing delimiter character.
fn strip_delimiters(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Resolves `\"` and `\\` inside a string literal; other backslashes are kept.
fn unescape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\\')) => out.push(next),
            Some(next) => {
                out.push(ch);
                out.push(next);
            }
            None => out.push(ch),
        }
    }
    out
}
