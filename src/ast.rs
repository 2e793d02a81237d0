use crate::diagnostics::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: SourceSpan,
}

/// Expression nodes. Literal variants hold the raw source text, delimiters included.
#[derive(Debug, Clone)]
pub enum ExprKind {
    Regex(String),
    Number(String),
    LiteralSet(String),
    Sequence(Vec<Expr>),
    Reference {
        words: Vec<String>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `name` is the raw quoted string literal.
    Define { name: String, value: Expr },
    Match(Expr),
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub items: Vec<Stmt>,
}
