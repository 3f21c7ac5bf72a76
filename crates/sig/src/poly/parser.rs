//! Recursive-descent parser for polynomial expressions.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('+' | '-') unary | power
//! power  := atom (('**' | '^') unary)?
//! atom   := number | identifier | '(' expr ')'
//! ```
//!
//! Identifiers name indeterminates. `I` is the imaginary unit unless it is
//! itself declared as an indeterminate. Exponents must be constant
//! non-negative integers and divisors non-zero constants.

use num_complex::Complex64;

use super::Polynomial;
use crate::error::{SigError, SigResult};

/// Parse `expression` into a polynomial over `indeterminates`.
///
/// # Errors
///
/// Returns [`SigError::Parse`] with the byte offset of the first problem.
pub fn parse(expression: &str, indeterminates: &[String]) -> SigResult<Polynomial> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        expression,
        tokens,
        pos: 0,
        indeterminates,
    };
    let p = parser.expr()?;
    match parser.peek() {
        (Token::End, _) => Ok(p),
        (token, offset) => Err(parser.error(offset, format!("unexpected {}", token.describe()))),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    End,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {}", v),
            Token::Ident(name) => format!("identifier `{}`", name),
            Token::Plus => "`+`".into(),
            Token::Minus => "`-`".into(),
            Token::Star => "`*`".into(),
            Token::Slash => "`/`".into(),
            Token::Caret => "power operator".into(),
            Token::LParen => "`(`".into(),
            Token::RParen => "`)`".into(),
            Token::End => "end of expression".into(),
        }
    }
}

fn tokenize(expression: &str) -> SigResult<Vec<(Token, usize)>> {
    let bytes = expression.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        let token = match b {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Token::Caret
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, i);
                let text = &expression[start..i];
                let value = text.parse::<f64>().map_err(|_| SigError::Parse {
                    expression: expression.to_string(),
                    offset: start,
                    message: format!("invalid number `{}`", text),
                })?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((Token::Ident(expression[start..i].to_string()), start));
                continue;
            }
            _ => {
                let ch = expression[start..].chars().next().unwrap_or('?');
                return Err(SigError::Parse {
                    expression: expression.to_string(),
                    offset: start,
                    message: format!("unexpected character `{}`", ch),
                });
            }
        };
        i += 1;
        tokens.push((token, start));
    }

    tokens.push((Token::End, expression.len()));
    Ok(tokens)
}

/// End offset of the number literal starting at `i`.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}

struct Parser<'a> {
    expression: &'a str,
    tokens: Vec<(Token, usize)>,
    pos: usize,
    indeterminates: &'a [String],
}

impl Parser<'_> {
    fn peek(&self) -> (Token, usize) {
        self.tokens
            .get(self.pos)
            .cloned()
            .unwrap_or((Token::End, self.expression.len()))
    }

    fn bump(&mut self) -> (Token, usize) {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, offset: usize, message: String) -> SigError {
        SigError::Parse {
            expression: self.expression.to_string(),
            offset,
            message,
        }
    }

    fn nvars(&self) -> usize {
        self.indeterminates.len()
    }

    fn expr(&mut self) -> SigResult<Polynomial> {
        let mut acc = self.term()?;
        loop {
            match self.peek().0 {
                Token::Plus => {
                    self.bump();
                    acc = &acc + &self.term()?;
                }
                Token::Minus => {
                    self.bump();
                    acc = &acc - &self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> SigResult<Polynomial> {
        let mut acc = self.unary()?;
        loop {
            match self.peek().0 {
                Token::Star => {
                    let (_, offset) = self.bump();
                    let rhs = self.unary()?;
                    acc = acc
                        .checked_mul(&rhs)
                        .ok_or_else(|| self.error(offset, "exponent too large".into()))?;
                }
                Token::Slash => {
                    let (_, offset) = self.bump();
                    let divisor = self.unary()?;
                    match divisor.as_constant() {
                        Some(c) if c != Complex64::new(0.0, 0.0) => acc = acc.scale(c.inv()),
                        Some(_) => return Err(self.error(offset, "division by zero".into())),
                        None => {
                            return Err(self.error(
                                offset,
                                "division by a non-constant polynomial".into(),
                            ))
                        }
                    }
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> SigResult<Polynomial> {
        match self.peek().0 {
            Token::Plus => {
                self.bump();
                self.unary()
            }
            Token::Minus => {
                self.bump();
                Ok(-&self.unary()?)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> SigResult<Polynomial> {
        let base = self.atom()?;
        if self.peek().0 != Token::Caret {
            return Ok(base);
        }
        let (_, offset) = self.bump();
        let exponent = self.unary()?;
        let exp = exponent
            .as_constant()
            .filter(|c| c.im == 0.0 && c.re >= 0.0 && c.re.fract() == 0.0)
            .filter(|c| c.re <= f64::from(u32::MAX))
            .ok_or_else(|| {
                self.error(offset, "exponent must be a non-negative integer constant".into())
            })?;
        base
            .checked_pow(exp.re as u32)
            .ok_or_else(|| self.error(offset, "exponent too large".into()))
    }

    fn atom(&mut self) -> SigResult<Polynomial> {
        let nvars = self.nvars();
        match self.bump() {
            (Token::Number(v), _) => Ok(Polynomial::constant(nvars, Complex64::new(v, 0.0))),
            (Token::Ident(name), offset) => {
                match self.indeterminates.iter().position(|n| *n == name) {
                    Some(j) => Polynomial::variable(nvars, j),
                    None if name == "I" => {
                        Ok(Polynomial::constant(nvars, Complex64::new(0.0, 1.0)))
                    }
                    None => Err(self.error(offset, format!("unknown indeterminate `{}`", name))),
                }
            }
            (Token::LParen, offset) => {
                let inner = self.expr()?;
                match self.bump() {
                    (Token::RParen, _) => Ok(inner),
                    _ => Err(self.error(offset, "unbalanced `(`".into())),
                }
            }
            (token, offset) => Err(self.error(offset, format!("unexpected {}", token.describe()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn terms(p: &Polynomial) -> Vec<(Vec<u32>, Complex64)> {
        p.terms().map(|(m, c)| (m.to_vec(), c)).collect()
    }

    #[test]
    fn test_constants() {
        let v = names(&["x"]);
        assert!(parse("0", &v).unwrap().is_zero());
        assert_eq!(parse("3", &v).unwrap().as_constant(), Some(c(3.0, 0.0)));
        assert_eq!(parse("1/2", &v).unwrap().as_constant(), Some(c(0.5, 0.0)));
        assert_eq!(parse("2.5e1", &v).unwrap().as_constant(), Some(c(25.0, 0.0)));
        assert_eq!(parse("-I", &v).unwrap().as_constant(), Some(c(0.0, -1.0)));
    }

    #[test]
    fn test_precedence() {
        let v = names(&["x"]);
        // 1 + 2*x^2 (not (1+2x)^2, not 1 + (2x)^2)
        let p = parse("1 + 2*x^2", &v).unwrap();
        assert_eq!(terms(&p), vec![(vec![0], c(1.0, 0.0)), (vec![2], c(2.0, 0.0))]);

        // -x**2 is -(x**2)
        let p = parse("-x**2", &v).unwrap();
        assert_eq!(terms(&p), vec![(vec![2], c(-1.0, 0.0))]);
    }

    #[test]
    fn test_power_is_right_associative() {
        let v = names(&["x"]);
        let p = parse("x^2^3", &v).unwrap();
        assert_eq!(terms(&p), vec![(vec![8], c(1.0, 0.0))]);
    }

    #[test]
    fn test_multivariate_product() {
        let v = names(&["x", "y"]);
        let p = parse("(x - y)*(x + y)", &v).unwrap();
        assert_eq!(
            terms(&p),
            vec![(vec![0, 2], c(-1.0, 0.0)), (vec![2, 0], c(1.0, 0.0))]
        );
    }

    #[test]
    fn test_imaginary_coefficients() {
        let v = names(&["z"]);
        let p = parse("I*z - I*z**2/2", &v).unwrap();
        assert_eq!(
            terms(&p),
            vec![(vec![1], c(0.0, 1.0)), (vec![2], c(0.0, -0.5))]
        );
    }

    #[test]
    fn test_declared_i_is_an_indeterminate() {
        let v = names(&["I"]);
        let p = parse("I", &v).unwrap();
        assert_eq!(terms(&p), vec![(vec![1], c(1.0, 0.0))]);
    }

    #[test]
    fn test_power_operator_spellings() {
        let v = names(&["x"]);
        assert_eq!(parse("x^3", &v).unwrap(), parse("x**3", &v).unwrap());
        match parse("^x", &v) {
            Err(SigError::Parse { message, .. }) => {
                assert_eq!(message, "unexpected power operator")
            }
            other => panic!("`^x` should fail to parse, got {:?}", other),
        }
    }

    #[test]
    fn test_errors() {
        let v = names(&["x"]);
        let cases = [
            ("y + 1", 0),
            ("x +", 3),
            ("(x + 1", 0),
            ("x / x", 2),
            ("x / 0", 2),
            ("x ^ x", 2),
            ("x ^ -1", 2),
            ("x ^ 0.5", 2),
            ("x $ 1", 2),
            ("x 1", 2),
            ("(x^65536)^65536", 9),
            ("x^4294967295 * x", 13),
        ];
        for (expr, expected) in cases {
            match parse(expr, &v) {
                Err(SigError::Parse { offset, .. }) => {
                    assert_eq!(offset, expected, "wrong offset for `{}`", expr)
                }
                other => panic!("`{}` should fail to parse, got {:?}", expr, other),
            }
        }
    }
}
