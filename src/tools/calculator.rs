//! Keypad-style calculator
//!
//! Operations chain left to right exactly as they would when pressed on a
//! four-function keypad: `2 + 3 * 4` is `(2 + 3) * 4 = 20`. There is no
//! operator precedence.

use super::ToolInput;
use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Sub),
            '*' | '×' | 'x' => Some(Self::Mul),
            '/' | '÷' => Some(Self::Div),
            _ => None,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(Op),
}

fn tokenize(expr: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let expecting_operand = !matches!(tokens.last(), Some(Token::Number(_)));
        let signed = expecting_operand
            && matches!(c, '-' | '−')
            && chars
                .get(i + 1)
                .is_some_and(|next| next.is_ascii_digit() || *next == '.');

        if c.is_ascii_digit() || c == '.' || signed {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i]
                .iter()
                .map(|&ch| if ch == '−' { '-' } else { ch })
                .collect();
            let value: f64 = literal
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid number: {}", literal))?;
            tokens.push(Token::Number(value));
            continue;
        }

        match Op::from_char(c) {
            Some(op) if !expecting_operand => tokens.push(Token::Op(op)),
            Some(_) => bail!("Operator '{}' is missing a left operand", c),
            None => bail!("Unexpected character '{}'", c),
        }
        i += 1;
    }

    Ok(tokens)
}

/// Evaluate a chained expression
pub fn calculate(expr: &str) -> Result<f64> {
    let tokens = tokenize(expr)?;
    let mut iter = tokens.into_iter();

    let mut acc = match iter.next() {
        None => return Ok(0.0),
        Some(Token::Number(n)) => n,
        Some(Token::Op(_)) => bail!("Expression must start with a number"),
    };

    while let Some(token) = iter.next() {
        let Token::Op(op) = token else {
            bail!("Expected an operator");
        };
        match iter.next() {
            Some(Token::Number(rhs)) => acc = op.apply(acc, rhs),
            _ => bail!("Expression ends with an operator"),
        }
    }

    Ok(acc)
}

/// Render a number the way a calculator display shows it
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn evaluate(input: &ToolInput) -> Result<String> {
    calculate(&input.text).map(format_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_to_right() {
        assert_eq!(calculate("2 + 3 * 4").unwrap(), 20.0);
        assert_eq!(calculate("10 / 4").unwrap(), 2.5);
        assert_eq!(calculate("7 − 2 × 3").unwrap(), 15.0);
    }

    #[test]
    fn test_negative_operands() {
        assert_eq!(calculate("-3 + 5").unwrap(), 2.0);
        assert_eq!(calculate("4 * -2").unwrap(), -8.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(evaluate(&ToolInput::new("  ")).unwrap(), "0");
    }

    #[test]
    fn test_errors() {
        assert!(calculate("2 +").is_err());
        assert!(calculate("* 2").is_err());
        assert!(calculate("2 ^ 3").is_err());
        assert!(calculate("1.2.3").is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 0.0), "Infinity");
        assert_eq!(evaluate(&ToolInput::new("1 / 0")).unwrap(), "Infinity");
    }
}
