//! Type notation: a compact C#-like syntax for writing type expressions.
//!
//! # Syntax
//!
//! Primaries:
//! - `dynamic`: the dynamic type
//! - `object`, `Object`, `System.Object`: the explicit object type
//! - `Name`, `Ns.Name`: any other named type or type parameter
//! - `Name<A, B>`: generic type
//! - `Outer<T>.Inner<U, V>`: nested generic type (one merged argument list)
//! - `(A, B, ...)`: tuple, at least two elements
//!
//! Suffixes, applied left to right to everything before them:
//! - `[]`, `[,]`, ...: array of rank `commas + 1`
//! - `*`: pointer
//! - `?`: nullable value type (`System.Nullable<T>`)
//!
//! Suffixes compose strictly left to right, so `T[][,]` is a rank-2 array
//! whose elements are `T[]`.
//!
//! Argument-less levels of a dotted path are folded into the following
//! level's name: `Outer3.Inner3<dynamic>` is the single level
//! `Outer3.Inner3` with one argument.
//!
//! # Example
//!
//! ```text
//! Outer<T>.Inner<int, T>.InnerInner<Outer<dynamic>>
//! (dynamic, object, dynamic)
//! int*[]
//! ```

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use logos::Logos;

use crate::types::{GenericSegment, GenericType, TypeExpr};

/// Maximum nesting of arguments, tuples and suffixes.
pub const MAX_NESTING: usize = 256;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("*")]
    Star,

    #[token("?")]
    Question,

    // Optional metadata arity suffix: List`1
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(`[0-9]+)?", |lex| lex.slice())]
    Ident(&'src str),
}

/// Syntax error with the byte span it applies to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}..{}", .span.start, .span.end)]
pub struct NotationError {
    pub message: String,
    pub span: Range<usize>,
}

impl NotationError {
    fn new(message: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Render the error against its source using annotate-snippets.
    pub fn render(&self, source: &str) -> String {
        let start = self.span.start.min(source.len());
        // Zero-width spans are widened to one char so the caret is visible.
        let end = if self.span.end <= start {
            (start + 1).min(source.len())
        } else {
            self.span.end.min(source.len())
        };

        let snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..end).label(&self.message));
        let report = vec![Level::ERROR.primary_title(&self.message).element(snippet)];

        Renderer::plain().render(&report).to_string()
    }
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    input: &'src str,
    depth: usize,
}

impl<'src> Parser<'src> {
    fn new(input: &'src str) -> Result<Self, NotationError> {
        let mut tokens = Vec::new();
        for (result, span) in Token::lexer(input).spanned() {
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(_) => {
                    return Err(NotationError::new(
                        format!("unexpected character: {:?}", &input[span.clone()]),
                        span,
                    ));
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            input,
            depth: 0,
        })
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| s.clone())
            .unwrap_or(self.input.len()..self.input.len())
    }

    fn error_here(&self, message: impl Into<String>) -> NotationError {
        NotationError::new(message, self.current_span())
    }

    fn expect(&mut self, expected: Token<'src>, what: &str) -> Result<(), NotationError> {
        let span = self.current_span();
        match self.advance() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(NotationError::new(
                format!("expected {what}, got {}", describe(&t)),
                span,
            )),
            None => Err(NotationError::new(format!("expected {what}, got end of input"), span)),
        }
    }

    fn enter(&mut self) -> Result<(), NotationError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error_here(format!("nesting deeper than {MAX_NESTING} levels")));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_type(&mut self) -> Result<TypeExpr, NotationError> {
        self.enter()?;
        let primary = self.parse_primary()?;
        let ty = self.parse_suffixes(primary)?;
        self.leave();
        Ok(ty)
    }

    fn parse_primary(&mut self) -> Result<TypeExpr, NotationError> {
        match self.peek() {
            Some(Token::LParen) => self.parse_tuple(),
            Some(Token::Ident(_)) => self.parse_path(),
            Some(t) => Err(self.error_here(format!("expected type, got {}", describe(t)))),
            None => Err(self.error_here("expected type, got end of input")),
        }
    }

    fn parse_tuple(&mut self) -> Result<TypeExpr, NotationError> {
        let start = self.current_span().start;
        self.expect(Token::LParen, "'('")?;
        let elements = self.parse_list(Token::RParen, "')'")?;
        if elements.len() < 2 {
            let end = self.tokens[..self.pos]
                .last()
                .map_or(start, |(_, s)| s.end);
            return Err(NotationError::new(
                "tuple needs at least 2 elements",
                start..end,
            ));
        }
        Ok(TypeExpr::Tuple(elements))
    }

    /// Comma-separated types up to and including `close`.
    fn parse_list(
        &mut self,
        close: Token<'src>,
        close_name: &str,
    ) -> Result<Vec<TypeExpr>, NotationError> {
        let mut items = vec![self.parse_type()?];
        loop {
            match self.peek() {
                Some(Token::Comma) => {
                    self.advance();
                    items.push(self.parse_type()?);
                }
                Some(t) if *t == close => {
                    self.advance();
                    return Ok(items);
                }
                Some(t) => {
                    return Err(self.error_here(format!(
                        "expected ',' or {close_name}, got {}",
                        describe(t)
                    )));
                }
                None => {
                    return Err(
                        self.error_here(format!("expected ',' or {close_name}, got end of input"))
                    );
                }
            }
        }
    }

    fn parse_path(&mut self) -> Result<TypeExpr, NotationError> {
        let mut segments: Vec<GenericSegment> = Vec::new();
        // Argument-less names waiting to be folded into the next level.
        let mut pending: Vec<&'src str> = Vec::new();

        loop {
            let span = self.current_span();
            let name = match self.advance() {
                Some(Token::Ident(name)) => name,
                Some(t) => {
                    return Err(NotationError::new(
                        format!("expected identifier, got {}", describe(&t)),
                        span,
                    ));
                }
                None => {
                    return Err(NotationError::new("expected identifier, got end of input", span));
                }
            };
            pending.push(name);

            if matches!(self.peek(), Some(Token::LAngle)) {
                self.advance();
                let args = self.parse_list(Token::RAngle, "'>'")?;
                segments.push(GenericSegment::new(pending.join("."), args));
                pending.clear();
            }

            if matches!(self.peek(), Some(Token::Dot)) {
                self.advance();
            } else {
                break;
            }
        }

        if segments.is_empty() {
            return Ok(TypeExpr::named(pending.join(".")));
        }
        if !pending.is_empty() {
            // Trailing non-generic levels, e.g. `Outer<T>.Inner`.
            segments.push(GenericSegment::new(pending.join("."), Vec::new()));
        }
        GenericType::new(segments)
            .map(TypeExpr::Generic)
            .map_err(|e| self.error_here(e.to_string()))
    }

    /// Each suffix wraps `ty` in one more node, so each counts as a level.
    fn parse_suffixes(&mut self, mut ty: TypeExpr) -> Result<TypeExpr, NotationError> {
        let mut levels = 0;
        loop {
            let suffix = self.peek().cloned();
            if matches!(suffix, Some(Token::LBracket | Token::Star | Token::Question)) {
                self.enter()?;
                levels += 1;
            }
            match suffix {
                Some(Token::LBracket) => {
                    self.advance();
                    let mut rank = 1;
                    while matches!(self.peek(), Some(Token::Comma)) {
                        self.advance();
                        rank += 1;
                    }
                    self.expect(Token::RBracket, "']'")?;
                    ty = TypeExpr::Array(Box::new(ty), rank);
                }
                Some(Token::Star) => {
                    self.advance();
                    ty = TypeExpr::pointer(ty);
                }
                Some(Token::Question) => {
                    self.advance();
                    ty = TypeExpr::nullable(ty);
                }
                _ => break,
            }
        }
        self.depth -= levels;
        Ok(ty)
    }

    fn parse_all(&mut self) -> Result<TypeExpr, NotationError> {
        let ty = self.parse_type()?;
        if let Some(t) = self.peek() {
            return Err(self.error_here(format!("unexpected {} after type", describe(t))));
        }
        Ok(ty)
    }
}

fn describe(token: &Token<'_>) -> String {
    match token {
        Token::Dot => "'.'".to_string(),
        Token::Comma => "','".to_string(),
        Token::LAngle => "'<'".to_string(),
        Token::RAngle => "'>'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::LBracket => "'['".to_string(),
        Token::RBracket => "']'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Question => "'?'".to_string(),
        Token::Ident(name) => format!("identifier `{name}`"),
    }
}

/// Parse type notation into a `TypeExpr`.
pub fn parse_type(input: &str) -> Result<TypeExpr, NotationError> {
    let mut parser = Parser::new(input)?;
    parser.parse_all()
}

impl std::str::FromStr for TypeExpr {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}
