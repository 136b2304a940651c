//! Arithmetic expression evaluation.
//!
//! When a query segment is not a plain code, the engine tries to read it
//! as arithmetic: `12.5*3`, `(8+4)/2`, `2^10`. Evaluation is best-effort
//! and silent: a parse error or a non-finite result simply produces no
//! math result, never an error the user sees.
//!
//! Grammar (recursive descent, precedence climbing):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := power (('*' | '/' | '%') power)*
//! power   := unary ('^' power)?          // right-associative
//! unary   := '-' unary | primary
//! primary := number | '(' expr ')'
//! ```

/// Why an expression failed to evaluate. Internal: callers surface
/// failures as "no result".
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EvalError {
    UnexpectedChar(char),
    UnexpectedEnd,
    TrailingInput,
    BadNumber,
}

/// Evaluate a query segment as arithmetic, if it looks like any.
///
/// Returns `None` for pure unsigned-integer input (those are codes, not
/// sums), for anything that fails to parse, and for non-finite results.
/// Finite results are stringified with integer values kept whole.
pub fn try_math(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = evaluate(trimmed).ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(format_number(value))
}

pub(crate) fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(EvalError::TrailingInput);
    }
    Ok(value)
}

fn format_number(value: f64) -> String {
    // f64 Display already prints shortest round-trip form; 3.0 -> "3".
    format!("{}", value)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' => i += 1,
            b'+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            b'%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            b'^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b'0'..=b'9' | b'.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                let text = &input[start..i];
                let value: f64 = text.parse().map_err(|_| EvalError::BadNumber)?;
                tokens.push(Token::Number(value));
            }
            _ => return Err(EvalError::UnexpectedChar(input[i..].chars().next().unwrap_or('?'))),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.power()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.power()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value /= self.power()?;
                }
                Token::Percent => {
                    self.pos += 1;
                    value %= self.power()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.unary()?;
        if self.peek() == Some(Token::Caret) {
            self.pos += 1;
            // Right-associative: 2^3^2 is 2^(3^2).
            let exponent = self.power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        if self.peek() == Some(Token::Minus) {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(EvalError::TrailingInput),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(_) => Err(EvalError::TrailingInput),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}
