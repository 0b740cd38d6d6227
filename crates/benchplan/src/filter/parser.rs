//! Recursive-descent parser for flag matrix filter expressions.
//!
//! ```text
//! or_expr    := and_expr ("or" and_expr)*
//! and_expr   := not_expr ("and" not_expr)*
//! not_expr   := "not" not_expr | comparison
//! comparison := primary (comp_op primary)*
//! comp_op    := "==" | "!=" | "<" | "<=" | ">" | ">=" | "in" | "not" "in"
//! primary    := literal | name | "(" or_expr ")" | "[" list "]" | "-" number
//! ```

use serde_yaml::Value;

use super::lexer::{Spanned, Token};
use super::{CompareOp, Expr, FilterEvaluationError};

/// Maximum depth of the parsed tree. `not`, parentheses, lists and each
/// extra operand of an `and`/`or`/comparison chain count one level.
pub(crate) const MAX_DEPTH: usize = 128;

pub(crate) struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn enter(&mut self) -> Result<(), FilterEvaluationError> {
        if self.depth >= MAX_DEPTH {
            return Err(FilterEvaluationError::Syntax {
                position: self.position(),
                message: format!("expression nested deeper than {MAX_DEPTH} levels"),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, FilterEvaluationError>,
    ) -> Result<T, FilterEvaluationError> {
        self.enter()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|s| &s.token)
            .unwrap_or(&Token::Eof)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|s| s.position)
            .unwrap_or(0)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> FilterEvaluationError {
        FilterEvaluationError::Syntax {
            position: self.position(),
            message: format!("expected {expected}, found {}", self.current()),
        }
    }

    fn expect(&mut self, expected: Token, description: &str) -> Result<(), FilterEvaluationError> {
        if *self.current() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(description))
        }
    }

    /// Parses a complete expression; trailing tokens are an error.
    pub fn parse(&mut self) -> Result<Expr, FilterEvaluationError> {
        let expr = self.parse_or()?;
        if *self.current() != Token::Eof {
            return Err(self.unexpected("end of expression"));
        }
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr, FilterEvaluationError> {
        let base = self.depth;
        let mut left = self.parse_and()?;
        while *self.current() == Token::Or {
            self.advance();
            self.enter()?;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, FilterEvaluationError> {
        let base = self.depth;
        let mut left = self.parse_not()?;
        while *self.current() == Token::And {
            self.advance();
            self.enter()?;
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        self.depth = base;
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, FilterEvaluationError> {
        if *self.current() == Token::Not {
            self.advance();
            let inner = self.nested(Self::parse_not)?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn compare_op(&self) -> Option<(CompareOp, usize)> {
        let op = match self.current() {
            Token::Eq => CompareOp::Eq,
            Token::Ne => CompareOp::Ne,
            Token::Lt => CompareOp::Lt,
            Token::Le => CompareOp::Le,
            Token::Gt => CompareOp::Gt,
            Token::Ge => CompareOp::Ge,
            Token::In => CompareOp::In,
            Token::Not => {
                let next = self.tokens.get(self.pos + 1).map(|s| &s.token);
                return (next == Some(&Token::In)).then_some((CompareOp::NotIn, 2));
            }
            _ => return None,
        };
        Some((op, 1))
    }

    // Chained comparisons (`1 < a <= 4`) become a conjunction of pairs.
    fn parse_comparison(&mut self) -> Result<Expr, FilterEvaluationError> {
        let base = self.depth;
        let first = self.parse_primary()?;
        let mut left = first.clone();
        let mut chain: Option<Expr> = None;

        while let Some((op, width)) = self.compare_op() {
            for _ in 0..width {
                self.advance();
            }
            self.enter()?;
            let right = self.parse_primary()?;
            let link = Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right.clone()),
            };
            chain = Some(match chain {
                Some(prev) => Expr::And(Box::new(prev), Box::new(link)),
                None => link,
            });
            left = right;
        }

        self.depth = base;
        Ok(chain.unwrap_or(first))
    }

    fn parse_primary(&mut self) -> Result<Expr, FilterEvaluationError> {
        match self.current().clone() {
            Token::Int(n) => {
                self.advance();
                Ok(Expr::Literal(Value::from(n)))
            }
            Token::Float(n) => {
                self.advance();
                Ok(Expr::Literal(Value::from(n)))
            }
            Token::Str(s) => {
                self.advance();
                Ok(Expr::Literal(Value::String(s)))
            }
            Token::True => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(false)))
            }
            Token::Null => {
                self.advance();
                Ok(Expr::Literal(Value::Null))
            }
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Name(name))
            }
            Token::Minus => {
                self.advance();
                match self.current().clone() {
                    Token::Int(n) => {
                        self.advance();
                        Ok(Expr::Literal(Value::from(-n)))
                    }
                    Token::Float(n) => {
                        self.advance();
                        Ok(Expr::Literal(Value::from(-n)))
                    }
                    _ => Err(self.unexpected("a number after `-`")),
                }
            }
            Token::LParen => {
                self.advance();
                let inner = self.nested(Self::parse_or)?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            Token::LBracket => {
                self.advance();
                let mut items = Vec::new();
                while *self.current() != Token::RBracket {
                    items.push(self.nested(Self::parse_or)?);
                    if *self.current() == Token::Comma {
                        self.advance();
                    } else {
                        break;
                    }
                }
                self.expect(Token::RBracket, "`]`")?;
                Ok(Expr::List(items))
            }
            _ => Err(self.unexpected("a value or flag name")),
        }
    }
}
