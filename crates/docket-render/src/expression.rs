//! # Expression Engine
//!
//! Evaluates four-operator arithmetic with parentheses using the
//! shunting-yard algorithm. [`evaluate`] never fails: every malformed
//! input produces `0` and a log line.

use thiserror::Error;

/// Why an expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// A character outside digits, `.`, `+ - * /` and parentheses.
    #[error("Illegal character '{0}' in expression")]
    IllegalCharacter(char),

    #[error("Mismatched parentheses")]
    MismatchedParentheses,

    /// An operator without two operands, or operands left over.
    #[error("Malformed expression")]
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
    Open,
    Close,
}

fn precedence(op: char) -> u8 {
    match op {
        '*' | '/' => 2,
        _ => 1,
    }
}

/// Splits into number, operator and parenthesis tokens. A `.` that does
/// not follow digits is dropped.
fn tokenize(expr: &str) -> Vec<Token> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let text: String = chars[start..i].iter().collect();
            // "12." parses as 12
            let value = text.trim_end_matches('.').parse::<f64>().unwrap_or(0.0);
            tokens.push(Token::Number(value));
            continue;
        }
        match c {
            '+' | '-' | '*' | '/' => tokens.push(Token::Op(c)),
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            _ => {}
        }
        i += 1;
    }
    tokens
}

fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ExpressionError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Open => stack.push(token),
            Token::Close => loop {
                match stack.pop() {
                    Some(Token::Open) => break,
                    Some(t) => output.push(t),
                    None => return Err(ExpressionError::MismatchedParentheses),
                }
            },
            Token::Op(op) => {
                // all operators are left associative
                while let Some(&Token::Op(top)) = stack.last() {
                    if precedence(top) < precedence(op) {
                        break;
                    }
                    output.push(Token::Op(top));
                    stack.pop();
                }
                stack.push(token);
            }
        }
    }

    while let Some(token) = stack.pop() {
        if matches!(token, Token::Open | Token::Close) {
            return Err(ExpressionError::MismatchedParentheses);
        }
        output.push(token);
    }
    Ok(output)
}

fn eval_postfix(postfix: &[Token]) -> Result<f64, ExpressionError> {
    let mut stack: Vec<f64> = Vec::new();
    for token in postfix {
        match *token {
            Token::Number(n) => stack.push(n),
            Token::Op(op) => {
                let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                    return Err(ExpressionError::Malformed);
                };
                let value = match op {
                    '+' => a + b,
                    '-' => a - b,
                    '*' => a * b,
                    _ => {
                        if b == 0.0 {
                            // division by zero zeroes the whole expression
                            return Ok(0.0);
                        }
                        a / b
                    }
                };
                stack.push(value);
            }
            Token::Open | Token::Close => return Err(ExpressionError::MismatchedParentheses),
        }
    }
    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Ok(0.0),
    }
}

/// Evaluates `expr`, reporting why it failed.
///
/// Whitespace is ignored. An empty expression is `0`.
pub fn try_evaluate(expr: &str) -> Result<f64, ExpressionError> {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(0.0);
    }
    if let Some(c) = compact
        .chars()
        .find(|c| !(c.is_ascii_digit() || "+-*/().".contains(*c)))
    {
        return Err(ExpressionError::IllegalCharacter(c));
    }
    let postfix = to_postfix(&tokenize(&compact))?;
    let value = eval_postfix(&postfix)?;
    Ok(if value.is_nan() { 0.0 } else { value })
}

/// Evaluates `expr`, yielding `0` for anything that cannot be computed.
///
/// ```
/// use docket_render::evaluate;
///
/// assert_eq!(evaluate("2+3*4"), 14.0);
/// assert_eq!(evaluate("(2+3)*4"), 20.0);
/// assert_eq!(evaluate("5/0"), 0.0);
/// ```
pub fn evaluate(expr: &str) -> f64 {
    match try_evaluate(expr) {
        Ok(value) => value,
        Err(ExpressionError::IllegalCharacter(c)) => {
            tracing::warn!("Expression contains illegal character '{}': {}", c, expr);
            0.0
        }
        Err(e) => {
            tracing::error!("Expression evaluation failed for '{}': {}", expr, e);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(evaluate("2+3*4"), 14.0);
        assert_eq!(evaluate("(2+3)*4"), 20.0);
        assert_eq!(evaluate("10-4-3"), 3.0);
        assert_eq!(evaluate("8/4/2"), 1.0);
        assert_eq!(evaluate(" 1.5 * 2 "), 3.0);
        assert_eq!(evaluate("((7))"), 7.0);
    }

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        assert_eq!(evaluate(""), 0.0);
        assert_eq!(evaluate("   "), 0.0);
        assert_eq!(evaluate("1+"), 0.0);
        assert_eq!(evaluate("5/0"), 0.0);
        assert_eq!(evaluate("1+5/0"), 0.0);
        assert_eq!(evaluate("2*x"), 0.0);
        assert_eq!(evaluate("(1+2"), 0.0);
        assert_eq!(evaluate("1+2)"), 0.0);
    }

    #[test]
    fn test_errors_are_reported() {
        assert_eq!(try_evaluate("2a"), Err(ExpressionError::IllegalCharacter('a')));
        assert_eq!(try_evaluate("(1"), Err(ExpressionError::MismatchedParentheses));
        assert_eq!(try_evaluate("*"), Err(ExpressionError::Malformed));
        // leftover operands are not an error
        assert_eq!(try_evaluate("(1)(2)"), Ok(0.0));
        // whitespace is removed before tokenizing
        assert_eq!(try_evaluate("1 2"), Ok(12.0));
    }

    #[test]
    fn test_unary_minus_is_unsupported() {
        assert_eq!(try_evaluate("-3"), Err(ExpressionError::Malformed));
        assert_eq!(evaluate("0-3"), -3.0);
    }
}
