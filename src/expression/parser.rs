use crate::expression::error::ParseError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};
use crate::tree::node::{BinaryOp, ExprNode};

/// Nesting limit on `-`, parentheses and call arguments.
pub(crate) const MAX_NESTING: usize = 512;

/// Parse a reference-dialect expression back into a tree.
///
/// This is the inverse of [`render_reference`](crate::render_reference) for
/// every tree of depth below 512: `parse_reference(&render_reference(&t)) ==
/// Ok(t)`. Each tree level is one level of nesting, so deeper renderings are
/// rejected with a [`ParseError`]. Trees within [`MAX_DEPTH`](crate::MAX_DEPTH)
/// always read back.
pub fn parse_reference(src: &str) -> Result<ExprNode, ParseError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        nesting: 0,
    };
    let expr = p.parse_expr()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        // Eof is sticky.
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ParseError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> Result<ExprNode, ParseError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(ParseError::new(
                self.span().start,
                "expression nested too deeply",
            ));
        }
        let e = self.parse_unary();
        self.nesting -= 1;
        e
    }

    fn parse_unary(&mut self) -> Result<ExprNode, ParseError> {
        if self.consume(TokenKind::Minus) {
            return Ok(ExprNode::negate(self.parse_expr()?));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<ExprNode, ParseError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::LParen => self.parse_paren(),
            TokenKind::Ident(name) => self.parse_call(&name, t.span),
            other => Err(ParseError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }

    /// After `(`: either `(e)` or `(a op b)` with an infix wrapping operator.
    fn parse_paren(&mut self) -> Result<ExprNode, ParseError> {
        let inner = self.parse_expr()?;
        if self.consume(TokenKind::RParen) {
            return Ok(ExprNode::grouped(inner));
        }

        let t = self.bump().clone();
        let op = match t.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            other => {
                return Err(ParseError::new(
                    t.span.start,
                    format!("expected ')' or one of '+', '-', '*', found {other:?}"),
                ));
            }
        };
        let right = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(ExprNode::binary(inner, op, right))
    }

    fn parse_call(&mut self, name: &str, span: Span) -> Result<ExprNode, ParseError> {
        let op = match name {
            "i64" => return self.parse_literal(),
            "div" => BinaryOp::Div,
            "fmod" => BinaryOp::Rem,
            "mulhi" => BinaryOp::HighMul,
            _ => {
                return Err(ParseError::new(
                    span.start,
                    format!("unknown function '{name}'"),
                ));
            }
        };
        self.expect(TokenKind::LParen)?;
        let left = self.parse_expr()?;
        self.expect(TokenKind::Comma)?;
        let right = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(ExprNode::binary(left, op, right))
    }

    /// After `i64`: `(` `-`? digits `)`.
    fn parse_literal(&mut self) -> Result<ExprNode, ParseError> {
        self.expect(TokenKind::LParen)?;
        let negative = self.consume(TokenKind::Minus);
        let t = self.bump().clone();
        let magnitude = match t.kind {
            TokenKind::Int(m) => m,
            other => {
                return Err(ParseError::new(
                    t.span.start,
                    format!("expected integer literal, found {other:?}"),
                ));
            }
        };
        let value = if negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        };
        let Some(value) = value else {
            return Err(ParseError::new(
                t.span.start,
                "integer literal out of range for i64",
            ));
        };
        self.expect(TokenKind::RParen)?;
        Ok(ExprNode::Literal(value))
    }
}
