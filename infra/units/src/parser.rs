//! Unit expression parser.
//!
//! ```text
//! expr   := term (('*' | '/' | 'per' | <juxtaposition>) term)*
//! term   := ('-' | '+') term | power
//! power  := atom (('^' | '**') exponent)?
//! atom   := number | name | '(' expr ')'
//! ```
//!
//! Exponents must be integers. Names are handed to a resolver which turns them into
//! quantities, so the same parser serves both unit expressions and definitions.
//! Parentheses and unary signs nest at most [`MAX_DEPTH`] levels deep.

use crate::error::UnitError;
use crate::quantity::Quantity;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Mul,
    Div,
    Pow,
    Plus,
    Minus,
    Open,
    Close,
}

impl Token {
    fn starts_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Name(_) | Self::Open)
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, UnitError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(&c) = chars.get(pos) {
        match c {
            c if c.is_whitespace() => pos += 1,
            '*' if chars.get(pos + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                pos += 2;
            }
            '*' | '·' => {
                tokens.push(Token::Mul);
                pos += 1;
            }
            '/' => {
                tokens.push(Token::Div);
                pos += 1;
            }
            '^' => {
                tokens.push(Token::Pow);
                pos += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            '(' => {
                tokens.push(Token::Open);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                pos += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let end = scan_number(&chars, pos);
                let literal: String = chars[pos..end].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| UnitError::syntax(format!("invalid number '{literal}'")))?;
                tokens.push(Token::Number(value));
                pos = end;
            }
            c if is_name_start(c) => {
                let end = chars[pos..]
                    .iter()
                    .position(|&c| !is_name_char(c))
                    .map_or(chars.len(), |offset| pos + offset);
                let name: String = chars[pos..end].iter().collect();
                tokens.push(if name == "per" { Token::Div } else { Token::Name(name) });
                pos = end;
            }
            other => {
                return Err(UnitError::syntax(format!("unexpected character '{other}' at position {pos}")));
            }
        }
    }

    Ok(tokens)
}

/// End index of the number literal starting at `start` (`12`, `1.5`, `.5`, `2e-3`).
fn scan_number(chars: &[char], start: usize) -> usize {
    let digits_from = |mut pos: usize| {
        while chars.get(pos).is_some_and(char::is_ascii_digit) {
            pos += 1;
        }
        pos
    };

    let mut pos = digits_from(start);
    if chars.get(pos) == Some(&'.') {
        pos = digits_from(pos + 1);
    }

    // An `e` only belongs to the number when digits follow; `2eV` is two and an electron volt.
    if matches!(chars.get(pos), Some('e' | 'E')) {
        let mut exp = pos + 1;
        if matches!(chars.get(exp), Some('+' | '-')) {
            exp += 1;
        }
        if chars.get(exp).is_some_and(char::is_ascii_digit) {
            pos = digits_from(exp);
        }
    }
    pos
}

pub(crate) fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '°'
}

pub(crate) fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric()
}

/// Deepest nesting of parentheses and unary signs an expression may use.
pub(crate) const MAX_DEPTH: usize = 64;

struct Parser<'a, R> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    resolve: &'a mut R,
}

/// Evaluates `input`, calling `resolve` for every name it contains.
///
/// # Errors
/// [`UnitError::Syntax`] for malformed input; resolver errors are passed through.
pub(crate) fn evaluate<R>(input: &str, resolve: &mut R) -> Result<Quantity, UnitError>
where
    R: FnMut(&str) -> Result<Quantity, UnitError>,
{
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(UnitError::syntax("empty expression"));
    }

    let mut parser = Parser { tokens, pos: 0, depth: 0, resolve };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(Token::Close) => Err(UnitError::syntax("unbalanced parentheses")),
        Some(token) => Err(UnitError::syntax(format!("unexpected {}", describe(token)))),
    }
}

impl<R> Parser<'_, R>
where
    R: FnMut(&str) -> Result<Quantity, UnitError>,
{
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, UnitError>) -> Result<T, UnitError> {
        if self.depth >= MAX_DEPTH {
            return Err(UnitError::syntax(format!("expression nests deeper than {MAX_DEPTH} levels")));
        }
        self.depth += 1;
        let out = parse(self);
        self.depth -= 1;
        out
    }

    fn expr(&mut self) -> Result<Quantity, UnitError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Mul) => {
                    self.pos += 1;
                    value = value.checked_mul(&self.term()?)?;
                }
                Some(Token::Div) => {
                    self.pos += 1;
                    value = value.checked_div(&self.term()?)?;
                }
                Some(token) if token.starts_operand() => value = value.checked_mul(&self.term()?)?,
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<Quantity, UnitError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-1.0 * self.nested(Self::term)?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::term)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Quantity, UnitError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Pow) {
            self.pos += 1;
            let exponent = self.exponent()?;
            return base.powi(exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Quantity, UnitError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Quantity::dimensionless(value)),
            Some(Token::Name(name)) => (self.resolve)(&name),
            Some(Token::Open) => {
                let inner = self.nested(Self::expr)?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(UnitError::syntax("unbalanced parentheses")),
                }
            }
            Some(token) => Err(UnitError::syntax(format!("unexpected {}", describe(&token)))),
            None => Err(UnitError::syntax("unexpected end of expression")),
        }
    }

    fn exponent(&mut self) -> Result<i32, UnitError> {
        let (negative, parenthesized) = match self.peek() {
            Some(Token::Open) => {
                self.pos += 1;
                (self.eat_sign(), true)
            }
            _ => (self.eat_sign(), false),
        };

        let Some(Token::Number(value)) = self.next() else {
            return Err(UnitError::syntax("exponent must be an integer"));
        };
        if parenthesized && self.next() != Some(Token::Close) {
            return Err(UnitError::syntax("unbalanced parentheses"));
        }
        if value.fract() != 0.0 || value.abs() > f64::from(i32::MAX) {
            return Err(UnitError::syntax(format!("exponent must be an integer, got {value}")));
        }

        #[allow(clippy::cast_possible_truncation)]
        let exponent = value as i32;
        Ok(if negative { -exponent } else { exponent })
    }

    fn eat_sign(&mut self) -> bool {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                true
            }
            Some(Token::Plus) => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(value) => format!("number {value}"),
        Token::Name(name) => format!("name '{name}'"),
        Token::Mul => "'*'".to_owned(),
        Token::Div => "'/'".to_owned(),
        Token::Pow => "'**'".to_owned(),
        Token::Plus => "'+'".to_owned(),
        Token::Minus => "'-'".to_owned(),
        Token::Open => "'('".to_owned(),
        Token::Close => "')'".to_owned(),
    }
}
