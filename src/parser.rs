use crate::{
    ast::{BinaryOp, Expr, ExprKind, Program, Stmt, StmtKind},
    diagnostics::{Diagnostic, DiagnosticKind, SourceSpan},
    lexer::{Keyword, Lexer, Token, TokenKind},
};

pub fn parse_program(source: &str) -> Result<Program, Diagnostic> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    fn parse_program(&mut self) -> Result<Program, Diagnostic> {
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.parse_statement()?);
        }
        Ok(Program { items })
    }

    fn parse_statement(&mut self) -> Result<Stmt, Diagnostic> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| self.error_eof("expected statement"))?;
        match token.kind {
            TokenKind::Keyword(Keyword::Define) => self.parse_define(),
            TokenKind::Keyword(Keyword::Match) => self.parse_match(),
            _ => Err(self
                .error(&token, "expected `define` or `match`")
                .with_note(format!("found `{}`", token.lexeme))),
        }
    }

    fn parse_define(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.consume_keyword(Keyword::Define)?.span.start;
        let name = self.consume(TokenKind::String, "expected quoted name after `define`")?;
        self.consume(TokenKind::Assign, "expected `=` after definition name")?;
        let value = self.parse_expression()?;
        self.consume_optional_semicolon();
        Ok(Stmt {
            span: SourceSpan {
                start,
                end: value.span.end,
            },
            kind: StmtKind::Define {
                name: name.lexeme,
                value,
            },
        })
    }

    fn parse_match(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.consume_keyword(Keyword::Match)?.span.start;
        let expr = self.parse_expression()?;
        self.consume_optional_semicolon();
        Ok(Stmt {
            span: SourceSpan {
                start,
                end: expr.span.end,
            },
            kind: StmtKind::Match(expr),
        })
    }

    fn parse_expression(&mut self) -> Result<Expr, Diagnostic> {
        let mut expr = self.parse_primary()?;
        loop {
            let op = if self.matches(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.matches(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_primary()?;
            expr = Expr {
                span: SourceSpan {
                    start: expr.span.start,
                    end: right.span.end,
                },
                kind: ExprKind::Binary {
                    op,
                    left: Box::new(expr),
                    right: Box::new(right),
                },
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, Diagnostic> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| self.error_eof("expected expression"))?;
        let kind = match token.kind {
            TokenKind::String => ExprKind::Regex(self.advance().lexeme),
            TokenKind::Number => ExprKind::Number(self.advance().lexeme),
            TokenKind::LiteralSet => ExprKind::LiteralSet(self.advance().lexeme),
            TokenKind::Word => return self.parse_reference(),
            TokenKind::LParen => return self.parse_parenthesized(),
            _ => return Err(self.error(&token, "expected expression")),
        };
        Ok(Expr {
            kind,
            span: token.span,
        })
    }

    fn parse_reference(&mut self) -> Result<Expr, Diagnostic> {
        let first = self.advance();
        let start = first.span.start;
        let mut end = first.span.end;
        let mut words = vec![first.lexeme];
        while self.check(TokenKind::Word) {
            let word = self.advance();
            end = word.span.end;
            words.push(word.lexeme);
        }
        let mut args = Vec::new();
        if self.matches(TokenKind::LParen) {
            args = self.parse_arguments()?;
            end = self.previous().span.end;
        }
        Ok(Expr {
            span: SourceSpan { start, end },
            kind: ExprKind::Reference { words, args },
        })
    }

    /// Parses a comma separated list up to and including the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, Diagnostic> {
        let mut args = Vec::new();
        if self.matches(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.matches(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RParen, "expected `)` to close argument list")?;
        Ok(args)
    }

    fn parse_parenthesized(&mut self) -> Result<Expr, Diagnostic> {
        let lparen = self.advance();
        let mut elements = self.parse_arguments()?;
        let span = SourceSpan {
            start: lparen.span.start,
            end: self.previous().span.end,
        };
        if elements.len() == 1 {
            let mut inner = elements.remove(0);
            inner.span = span;
            return Ok(inner);
        }
        Ok(Expr {
            span,
            kind: ExprKind::Sequence(elements),
        })
    }

    fn consume_optional_semicolon(&mut self) {
        let _ = self.matches(TokenKind::Semicolon);
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self
                .peek()
                .map(|tok| self.error(tok, message))
                .unwrap_or_else(|| self.error_eof(message)))
        }
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> Result<Token, Diagnostic> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::Keyword(keyword.clone()) {
                Ok(self.advance())
            } else {
                Err(self.error(token, &format!("expected keyword `{keyword:?}`")))
            }
        } else {
            Err(self.error_eof("unexpected end of input"))
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        if let Some(token) = self.peek() {
            token.kind == kind
        } else {
            false
        }
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous().clone()
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Eof) | None)
    }

    fn error(&self, token: &Token, message: &str) -> Diagnostic {
        let message = if token.kind == TokenKind::Eof {
            format!("{message} (reached end of input)")
        } else {
            message.to_string()
        };
        Diagnostic::new(DiagnosticKind::Parser, message).with_span(token.span)
    }

    fn error_eof(&self, message: &str) -> Diagnostic {
        Diagnostic::new(DiagnosticKind::Parser, message.to_string())
    }
}
