//! Tokenizer for flag matrix filter expressions.

use std::fmt;

use super::FilterEvaluationError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    True,
    False,
    Null,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Minus,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    In,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "`{name}`"),
            Token::Int(n) => write!(f, "{n}"),
            Token::Float(n) => write!(f, "{n}"),
            Token::Str(s) => write!(f, "{s:?}"),
            Token::True => write!(f, "True"),
            Token::False => write!(f, "False"),
            Token::Null => write!(f, "None"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::LBracket => write!(f, "`[`"),
            Token::RBracket => write!(f, "`]`"),
            Token::Comma => write!(f, "`,`"),
            Token::Minus => write!(f, "`-`"),
            Token::Eq => write!(f, "`==`"),
            Token::Ne => write!(f, "`!=`"),
            Token::Lt => write!(f, "`<`"),
            Token::Le => write!(f, "`<=`"),
            Token::Gt => write!(f, "`>`"),
            Token::Ge => write!(f, "`>=`"),
            Token::And => write!(f, "`and`"),
            Token::Or => write!(f, "`or`"),
            Token::Not => write!(f, "`not`"),
            Token::In => write!(f, "`in`"),
            Token::Eof => write!(f, "end of expression"),
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub position: usize,
}

pub(crate) struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn error(&self, position: usize, message: impl Into<String>) -> FilterEvaluationError {
        FilterEvaluationError::Syntax {
            position,
            message: message.into(),
        }
    }

    fn read_string(&mut self, quote: char) -> Result<String, FilterEvaluationError> {
        let start = self.pos;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.advance() {
            match ch {
                c if c == quote => return Ok(result),
                '\\' => match self.advance() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some(c) => result.push(c),
                    None => break,
                },
                c => result.push(c),
            }
        }
        Err(self.error(start, "unterminated string literal"))
    }

    fn read_number(&mut self) -> Result<Token, FilterEvaluationError> {
        let start = self.pos;
        let mut text = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() || ch == '_' {
                if ch != '_' {
                    text.push(ch);
                }
                self.advance();
            } else if ch == '.' && !is_float && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                text.push(ch);
                self.advance();
            } else if matches!(ch, 'e' | 'E') {
                is_float = true;
                text.push(ch);
                self.advance();
                if let Some(sign @ ('+' | '-')) = self.current() {
                    text.push(sign);
                    self.advance();
                }
            } else {
                break;
            }
        }

        if is_float {
            text.parse()
                .map(Token::Float)
                .map_err(|_| self.error(start, format!("invalid number `{text}`")))
        } else {
            text.parse()
                .map(Token::Int)
                .map_err(|_| self.error(start, format!("invalid number `{text}`")))
        }
    }

    fn read_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        match word.as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "in" => Token::In,
            "True" | "true" => Token::True,
            "False" | "false" => Token::False,
            "None" | "null" => Token::Null,
            _ => Token::Ident(word),
        }
    }

    fn next_token(&mut self) -> Result<Spanned, FilterEvaluationError> {
        self.skip_whitespace();
        let position = self.pos;

        let Some(ch) = self.current() else {
            return Ok(Spanned {
                token: Token::Eof,
                position,
            });
        };

        let token = match ch {
            '\'' | '"' => Token::Str(self.read_string(ch)?),
            c if c.is_ascii_digit() => self.read_number()?,
            c if c.is_alphabetic() || c == '_' => self.read_word(),
            _ => {
                self.advance();
                let next = self.current();
                let two = |lexer: &mut Self, token| {
                    lexer.advance();
                    token
                };
                match (ch, next) {
                    ('(', _) => Token::LParen,
                    (')', _) => Token::RParen,
                    ('[', _) => Token::LBracket,
                    (']', _) => Token::RBracket,
                    (',', _) => Token::Comma,
                    ('-', _) => Token::Minus,
                    ('=', Some('=')) => two(self, Token::Eq),
                    ('!', Some('=')) => two(self, Token::Ne),
                    ('<', Some('=')) => two(self, Token::Le),
                    ('>', Some('=')) => two(self, Token::Ge),
                    ('&', Some('&')) => two(self, Token::And),
                    ('|', Some('|')) => two(self, Token::Or),
                    ('<', _) => Token::Lt,
                    ('>', _) => Token::Gt,
                    ('!', _) => Token::Not,
                    ('=', _) => return Err(self.error(position, "`=` is not a comparison; use `==`")),
                    (c, _) => return Err(self.error(position, format!("unexpected character `{c}`"))),
                }
            }
        };

        Ok(Spanned { token, position })
    }

    /// Tokenizes the whole input, ending with [`Token::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, FilterEvaluationError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }
}
