//! Arithmetic calculator tool
//!
//! The expression is parsed and evaluated by a small recursive-descent
//! parser over a fixed grammar; agent input is never executed as code.
//!
//! Grammar:
//!   expression := term (('+' | '-') term)*
//!   term       := factor (('*' | '/' | '%') factor)*
//!   factor     := '-' factor | primary
//!   primary    := number | '(' expression ')'

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Evaluate an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, String> {
    let mut parser = Parser::new(expression);
    let value = parser.expression()?;

    parser.skip_whitespace();
    if let Some(c) = parser.peek() {
        return Err(format!("unexpected character '{}'", c as char));
    }

    if !value.is_finite() {
        return Err("expression did not evaluate to a finite number".to_string());
    }

    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        loop {
            if self.eat(b'+') {
                value += self.term()?;
            } else if self.eat(b'-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        loop {
            if self.eat(b'*') {
                value *= self.factor()?;
            } else if self.eat(b'/') {
                value /= self.factor()?;
            } else if self.eat(b'%') {
                value %= self.factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn factor(&mut self) -> Result<f64, String> {
        if self.eat(b'-') {
            return Ok(-self.factor()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, String> {
        if self.eat(b'(') {
            let value = self.expression()?;
            if !self.eat(b')') {
                return Err("missing closing parenthesis".to_string());
            }
            return Ok(value);
        }

        self.skip_whitespace();
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == b'.')
        {
            self.bump();
        }

        if start == self.pos {
            return match self.peek() {
                Some(c) => Err(format!("unexpected character '{}'", c as char)),
                None => Err("unexpected end of expression".to_string()),
            };
        }

        let literal = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| "invalid number".to_string())?;
        literal
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{literal}'"))
    }
}

/// Perform mathematical calculations on behalf of the agent.
#[derive(Default)]
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform mathematical calculations. Supports +, -, *, /, % and parentheses."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The mathematical expression to evaluate, e.g. (2 + 3) * 4"
                }
            },
            "required": ["expression"],
        })
    }

    async fn execute(&self, args: Value) -> Value {
        let Some(expression) = args.get("expression").and_then(Value::as_str) else {
            return json!({ "success": false, "error": "missing required argument: expression" });
        };

        match evaluate(expression) {
            Ok(result) => json!({ "success": true, "result": result }),
            Err(reason) => json!({
                "success": false,
                "error": format!("Invalid mathematical expression: {reason}"),
            }),
        }
    }
}
