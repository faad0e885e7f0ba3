//! Recursive-descent evaluator for `+ - * /`, unary minus, and parentheses.

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Unexpected character at byte offset.
    #[error("unexpected '{0}' at {1}")]
    Unexpected(char, usize),
    /// Input ended early.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Parentheses or unary signs nested past the limit.
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Maximum nesting of parentheses and unary minus.
pub const MAX_DEPTH: usize = 64;

/// Evaluates an arithmetic expression.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let mut parser = Parser {
        chars: input.char_indices().collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    match parser.peek() {
        Some((offset, c)) => Err(EvalError::Unexpected(c, offset)),
        None => Ok(value),
    }
}

/// Whether `input` is worth handing to [`evaluate`]: it contains a digit and an operator.
pub fn looks_like_expression(input: &str) -> bool {
    let mut has_digit = false;
    let mut has_operator = false;
    for c in input.chars() {
        match c {
            '0'..='9' => has_digit = true,
            '+' | '-' | '*' | '/' | '(' | ')' => has_operator = true,
            '.' | ' ' | '\t' => {}
            _ => return false,
        }
    }
    has_digit && has_operator
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if matches!(self.peek(), Some((_, c)) if c == expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                let divisor = self.factor()?;
                if divisor == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value /= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let value = self.unary();
        self.depth -= 1;
        value
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        if self.eat('-') {
            return Ok(-self.factor()?);
        }
        if self.eat('(') {
            let value = self.expr()?;
            if !self.eat(')') {
                return match self.peek() {
                    Some((offset, c)) => Err(EvalError::Unexpected(c, offset)),
                    None => Err(EvalError::UnexpectedEnd),
                };
            }
            return Ok(value);
        }
        self.number()
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        self.skip_ws();
        let start = self.pos;
        while matches!(self.peek(), Some((_, c)) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if start == self.pos {
            return match self.peek() {
                Some((offset, c)) => Err(EvalError::Unexpected(c, offset)),
                None => Err(EvalError::UnexpectedEnd),
            };
        }

        let literal: String = self.chars[start..self.pos].iter().map(|(_, c)| c).collect();
        literal
            .parse()
            .map_err(|_| EvalError::Unexpected('.', self.chars[start].0))
    }
}
