use std::{fmt, rc::Rc};

/// String transform carried by a modifier value.
pub type Transform = Rc<dyn Fn(&str) -> String>;

/// Result of evaluating an expression. Cheap to clone, immutable once built.
#[derive(Clone)]
pub struct Value(pub Rc<ValueKind>);

#[derive(Clone)]
pub enum ValueKind {
    /// Characters and ranges that sit inside `[...]`.
    LiteralSet(String),
    /// Literal text, escaped on emission.
    Regex(String),
    Number(f64),
    /// Empty slots emit nothing.
    Sequence(Vec<Option<Value>>),
    /// Emitted verbatim.
    Constant(String),
    Modifier(Modifier),
    Alternation(Vec<Value>),
    Repetition { base: Value, quantity: Quantity },
}

#[derive(Clone)]
pub struct Modifier {
    pub inner: Option<Value>,
    pub transform: Transform,
    /// Set when the transform ends in a greedy quantifier (`*`, `+`, `?`).
    pub quantifier: bool,
}

/// Validated repetition bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Exactly(u32),
    AtLeast(u32),
    AtMost(u32),
    Between(u32, u32),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Exactly(n) => write!(f, "{{{n}}}"),
            Quantity::AtLeast(n) => write!(f, "{{{n},}}"),
            Quantity::AtMost(n) => write!(f, "{{0,{n}}}"),
            Quantity::Between(min, max) => write!(f, "{{{min},{max}}}"),
        }
    }
}

impl Value {
    pub fn new(kind: ValueKind) -> Self {
        Self(Rc::new(kind))
    }

    pub fn literal_set(characters: impl Into<String>) -> Self {
        Self::new(ValueKind::LiteralSet(characters.into()))
    }

    pub fn regex(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Regex(text.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::new(ValueKind::Number(value))
    }

    pub fn sequence(values: Vec<Option<Value>>) -> Self {
        Self::new(ValueKind::Sequence(values))
    }

    pub fn constant(text: impl Into<String>) -> Self {
        Self::new(ValueKind::Constant(text.into()))
    }

    pub fn modifier(inner: Option<Value>, transform: impl Fn(&str) -> String + 'static) -> Self {
        Self::new(ValueKind::Modifier(Modifier {
            inner,
            transform: Rc::new(transform),
            quantifier: false,
        }))
    }

    /// A modifier whose transform appends a greedy quantifier.
    pub fn quantifier(inner: Option<Value>, transform: impl Fn(&str) -> String + 'static) -> Self {
        Self::new(ValueKind::Modifier(Modifier {
            inner,
            transform: Rc::new(transform),
            quantifier: true,
        }))
    }

    pub fn alternation(values: Vec<Value>) -> Self {
        Self::new(ValueKind::Alternation(values))
    }

    pub fn repetition(base: Value, quantity: Quantity) -> Self {
        Self::new(ValueKind::Repetition { base, quantity })
    }

    pub fn kind(&self) -> &ValueKind {
        &self.0
    }

    pub fn kind_name(&self) -> &'static str {
        match &*self.0 {
            ValueKind::LiteralSet(_) => "literal set",
            ValueKind::Regex(_) => "string",
            ValueKind::Number(_) => "number",
            ValueKind::Sequence(_) => "sequence",
            ValueKind::Constant(_) => "constant",
            ValueKind::Modifier(_) => "modifier",
            ValueKind::Alternation(_) => "alternation",
            ValueKind::Repetition { .. } => "repetition",
        }
    }

    /// True when the emission ends in a greedy quantifier that can be made lazy.
    pub fn is_quantified(&self) -> bool {
        match &*self.0 {
            ValueKind::Repetition { .. } => true,
            ValueKind::Modifier(modifier) => modifier.quantifier,
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match &*self.0 {
            ValueKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Renders the value as a regex pattern.
    pub fn to_regex(&self) -> String {
        match &*self.0 {
            ValueKind::LiteralSet(characters) => format!("[{characters}]"),
            ValueKind::Regex(text) => regex::escape(text),
            ValueKind::Number(n) => regex::escape(&n.to_string()),
            ValueKind::Sequence(values) => values.iter().map(emit_slot).collect(),
            ValueKind::Constant(text) => text.clone(),
            ValueKind::Modifier(modifier) => (modifier.transform)(&emit_slot(&modifier.inner)),
            ValueKind::Alternation(values) => {
                let branches: Vec<String> = values
                    .iter()
                    .map(|value| format!("(?:{})", value.to_regex()))
                    .collect();
                format!("(?:{})", branches.join("|"))
            }
            ValueKind::Repetition { base, quantity } => {
                format!("(?:{}{quantity})", base.to_regex())
            }
        }
    }
}

fn emit_slot(slot: &Option<Value>) -> String {
    slot.as_ref().map(Value::to_regex).unwrap_or_default()
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            ValueKind::LiteralSet(characters) => write!(f, "LiteralSet({characters:?})"),
            ValueKind::Regex(text) => write!(f, "Regex({text:?})"),
            ValueKind::Number(n) => write!(f, "Number({n})"),
            ValueKind::Sequence(values) => f.debug_list().entries(values.iter()).finish(),
            ValueKind::Constant(text) => write!(f, "Constant({text:?})"),
            ValueKind::Modifier(modifier) => f
                .debug_struct("Modifier")
                .field("inner", &modifier.inner)
                .field("quantifier", &modifier.quantifier)
                .finish_non_exhaustive(),
            ValueKind::Alternation(values) => f.debug_tuple("Alternation").field(values).finish(),
            ValueKind::Repetition { base, quantity } => f
                .debug_struct("Repetition")
                .field("base", base)
                .field("quantity", quantity)
                .finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_regex())
    }
}
