use crate::diagnostics::{Diagnostic, DiagnosticKind, SourceSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    Define,
    Match,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    String,
    LiteralSet,
    Keyword(Keyword),
    LParen,
    RParen,
    Comma,
    Semicolon,
    Assign,
    Plus,
    Minus,
    Unknown,
    Eof,
}

/// A lexed token. `lexeme` is the exact source slice, so string and set
/// literals keep their delimiters.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: SourceSpan,
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current: usize,
    peeked: Option<(usize, char)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices(),
            current: 0,
            peeked: None,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = if let Some((idx, ch)) = self.peeked.take() {
            Some((idx, ch))
        } else {
            self.chars.next()
        };
        if let Some((idx, ch)) = next {
            self.current = idx + ch.len_utf8();
            Some((idx, ch))
        } else {
            None
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        self.peeked
    }

    fn collect_while<F>(&mut self, mut predicate: F)
    where
        F: FnMut(char) -> bool,
    {
        while let Some((_, ch)) = self.peek() {
            if predicate(ch) {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), Diagnostic> {
        loop {
            let mut progressed = false;

            while let Some((_, ch)) = self.peek() {
                if ch.is_whitespace() {
                    self.bump();
                    progressed = true;
                } else {
                    break;
                }
            }

            let mut handled_comment = false;
            if let Some((start, '/')) = self.peek() {
                if let Some((_, next)) = self.chars.clone().next() {
                    if next == '/' {
                        self.bump();
                        self.bump();
                        while let Some((_, ch)) = self.peek() {
                            if ch == '\n' {
                                break;
                            }
                            self.bump();
                        }
                        handled_comment = true;
                    } else if next == '*' {
                        self.bump();
                        self.bump();
                        let mut closed = false;
                        while let Some((_, ch)) = self.bump() {
                            if ch == '*' {
                                if let Some((_, '/')) = self.peek() {
                                    self.bump();
                                    closed = true;
                                    break;
                                }
                            }
                        }
                        if !closed {
                            return Err(Diagnostic::new(
                                DiagnosticKind::Lexer,
                                "unterminated block comment",
                            )
                            .with_span(SourceSpan {
                                start,
                                end: self.current,
                            }));
                        }
                        handled_comment = true;
                    }
                }
                if !handled_comment {
                    self.peeked = Some((start, '/'));
                }
            }

            if handled_comment {
                progressed = true;
            }

            if !progressed {
                break;
            }
        }
        Ok(())
    }

    fn word_or_keyword(&mut self, start: usize) -> Token {
        self.collect_while(|ch| ch.is_alphanumeric() || ch == '_');
        let end = self.current;
        let lexeme = self.source[start..end].to_string();
        let kind = keyword_for(&lexeme).unwrap_or(TokenKind::Word);
        Token {
            kind,
            lexeme,
            span: SourceSpan { start, end },
        }
    }

    fn number_literal(&mut self, start: usize) -> Token {
        let mut seen_dot = false;
        while let Some((_, ch)) = self.peek() {
            match ch {
                '0'..='9' | '_' => {
                    self.bump();
                }
                '.' if !seen_dot => {
                    seen_dot = true;
                    self.bump();
                }
                _ => break,
            }
        }
        self.simple_token(start, TokenKind::Number)
    }

    /// Scans up to and including `close`. A backslash keeps the following
    /// character inside the literal, so `[\]]` is a single set and `"\""`
    /// a single string.
    fn delimited(
        &mut self,
        start: usize,
        close: char,
        kind: TokenKind,
        what: &str,
    ) -> Result<Token, Diagnostic> {
        while let Some((_, ch)) = self.bump() {
            if ch == close {
                return Ok(self.simple_token(start, kind));
            }
            if ch == '\\' {
                self.bump();
            }
        }
        Err(
            Diagnostic::new(DiagnosticKind::Lexer, format!("unterminated {what}"))
                .with_span(SourceSpan {
                    start,
                    end: self.current,
                }),
        )
    }

    fn simple_token(&mut self, start: usize, kind: TokenKind) -> Token {
        let end = self.current;
        Token {
            kind,
            lexeme: self.source[start..end].to_string(),
            span: SourceSpan { start, end },
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments()?;
            let (start, ch) = match self.bump() {
                Some(pair) => pair,
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Eof,
                        lexeme: String::new(),
                        span: SourceSpan {
                            start: self.current,
                            end: self.current,
                        },
                    });
                    break;
                }
            };

            let token = match ch {
                ch if ch.is_alphabetic() || ch == '_' => self.word_or_keyword(start),
                '0'..='9' => self.number_literal(start),
                '"' => self.delimited(start, '"', TokenKind::String, "string literal")?,
                '[' => self.delimited(start, ']', TokenKind::LiteralSet, "literal set")?,
                '(' => self.simple_token(start, TokenKind::LParen),
                ')' => self.simple_token(start, TokenKind::RParen),
                ',' => self.simple_token(start, TokenKind::Comma),
                ';' => self.simple_token(start, TokenKind::Semicolon),
                '=' => self.simple_token(start, TokenKind::Assign),
                '+' => self.simple_token(start, TokenKind::Plus),
                '-' => self.simple_token(start, TokenKind::Minus),
                _ => self.simple_token(start, TokenKind::Unknown),
            };
            tokens.push(token);
        }
        Ok(tokens)
    }
}

fn keyword_for(word: &str) -> Option<TokenKind> {
    let keyword = match word {
        "define" => Keyword::Define,
        "match" => Keyword::Match,
        _ => return None,
    };
    Some(TokenKind::Keyword(keyword))
}
