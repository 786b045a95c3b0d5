use crate::error::CompileError;
use crate::expression::ast::{BinaryOp, Expr, UnaryOp};
use crate::expression::lexer::{Span, Token, TokenKind, lex};

pub(crate) fn parse_expr(src: &str) -> Result<Expr, CompileError> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let expr = p.parse_ternary()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        self.pos += 1;
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), CompileError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(CompileError::new(
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

    fn parse_ternary(&mut self) -> Result<Expr, CompileError> {
        let cond = self.parse_or()?;
        if self.consume(TokenKind::Question) {
            let then_branch = self.parse_ternary()?;
            self.expect(TokenKind::Colon)?;
            let else_branch = self.parse_ternary()?;
            return Ok(Expr::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }
        Ok(cond)
    }

    fn parse_or(&mut self) -> Result<Expr, CompileError> {
        let mut e = self.parse_and()?;
        while self.consume(TokenKind::OrOr) {
            let r = self.parse_and()?;
            e = Expr::Binary {
                op: BinaryOp::Or,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_and(&mut self) -> Result<Expr, CompileError> {
        let mut e = self.parse_equality()?;
        while self.consume(TokenKind::AndAnd) {
            let r = self.parse_equality()?;
            e = Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_equality(&mut self) -> Result<Expr, CompileError> {
        let mut e = self.parse_comparison()?;
        loop {
            let op = if self.consume(TokenKind::EqEq) {
                BinaryOp::Eq
            } else if self.consume(TokenKind::Ne) {
                BinaryOp::Ne
            } else {
                break;
            };
            let r = self.parse_comparison()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_comparison(&mut self) -> Result<Expr, CompileError> {
        let mut e = self.parse_term()?;
        loop {
            let op = if self.consume(TokenKind::Lt) {
                BinaryOp::Lt
            } else if self.consume(TokenKind::Le) {
                BinaryOp::Le
            } else if self.consume(TokenKind::Gt) {
                BinaryOp::Gt
            } else if self.consume(TokenKind::Ge) {
                BinaryOp::Ge
            } else {
                break;
            };
            let r = self.parse_term()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_term(&mut self) -> Result<Expr, CompileError> {
        let mut e = self.parse_factor()?;
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let r = self.parse_factor()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, CompileError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else if self.consume(TokenKind::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, CompileError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        if self.consume(TokenKind::Bang) {
            let e = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                expr: Box::new(e),
            });
        }
        // Unary plus is a no-op in an all-numeric grammar.
        if self.consume(TokenKind::Plus) {
            return self.parse_unary();
        }
        self.parse_pow()
    }

    fn parse_pow(&mut self) -> Result<Expr, CompileError> {
        let base = self.parse_postfix()?;
        if self.consume(TokenKind::StarStar) {
            // Right-associative; the exponent may carry its own unary sign.
            let exp = self.parse_unary()?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exp),
            });
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, CompileError> {
        let e = self.parse_primary()?;

        if self.peek().kind == TokenKind::LParen {
            let func = match e {
                Expr::Ident(name) => name,
                _ => {
                    return Err(CompileError::new(
                        self.span().start,
                        "call target must be an identifier",
                    ));
                }
            };
            self.bump();
            let args = self.parse_args()?;
            return Ok(Expr::Call { func, args });
        }

        Ok(e)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, CompileError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_ternary()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, CompileError> {
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(s) => Ok(Expr::Ident(s)),
            TokenKind::LParen => {
                let e = self.parse_ternary()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(CompileError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arithmetic_precedence() {
        let e = parse_expr("1+2*3").unwrap();
        match e {
            Expr::Binary {
                op: BinaryOp::Add,
                right,
                ..
            } => assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            )),
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn parses_calls() {
        let e = parse_expr("min(1, 2)").unwrap();
        match e {
            Expr::Call { func, args } => {
                assert_eq!(func, "min");
                assert_eq!(args.len(), 2);
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn parses_empty_argument_list() {
        let e = parse_expr("min()").unwrap();
        match e {
            Expr::Call { args, .. } => assert!(args.is_empty()),
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn pow_is_right_associative_and_tighter_than_unary() {
        let e = parse_expr("-2**2").unwrap();
        assert!(matches!(
            e,
            Expr::Unary {
                op: UnaryOp::Neg,
                ..
            }
        ));

        let e = parse_expr("2**3**2").unwrap();
        match e {
            Expr::Binary {
                op: BinaryOp::Pow,
                right,
                ..
            } => assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinaryOp::Pow,
                    ..
                }
            )),
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn ternary_is_right_associative() {
        let e = parse_expr("t ? 1 : i ? 2 : 3").unwrap();
        match e {
            Expr::Ternary { else_branch, .. } => {
                assert!(matches!(*else_branch, Expr::Ternary { .. }));
            }
            other => panic!("unexpected ast: {other:?}"),
        }
    }

    #[test]
    fn rejects_dangling_operator() {
        let err = parse_expr("t+").unwrap_err();
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(parse_expr("1 2").is_err());
        assert!(parse_expr("(t").is_err());
        assert!(parse_expr("").is_err());
    }

    #[test]
    fn rejects_call_on_non_identifier() {
        assert!(parse_expr("1(2)").is_err());
        assert!(parse_expr("(1+2)(3)").is_err());
    }
}
