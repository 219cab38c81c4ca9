use crate::utils::error::{CalcError, Result, OPERATOR_MISSING};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest operand string the keypad accepts.
pub const MAX_OPERAND_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | 'X' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Parses an operator typed as text. An empty string means no operator was chosen.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CalcError::validation(OPERATOR_MISSING));
        }
        let mut chars = text.chars();
        match (chars.next().and_then(Self::from_symbol), chars.next()) {
            (Some(op), None) => Ok(op),
            _ => Err(CalcError::validation(format!(
                "Unsupported operator '{}'",
                text
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which operand slot keypad input targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    EnteringFirst,
    EnteringSecond,
    ResultShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Clear,
}

impl Key {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '.' => Some(Self::DecimalPoint),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            other => Operator::from_symbol(other).map(Self::Operator),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub first_operand: String,
    pub second_operand: String,
    pub operator: Option<Operator>,
    pub step: Step,
    pub pending_decimal_point: bool,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }
}

/// Snapshot of the operands sent to the remote evaluator. Empty operands are sent as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub first_operand: String,
    pub second_operand: String,
    pub operator: Operator,
}

impl EvaluationRequest {
    pub fn new(first_operand: &str, second_operand: &str, operator: Operator) -> Self {
        fn or_zero(operand: &str) -> String {
            if operand.is_empty() {
                "0".to_string()
            } else {
                operand.to_string()
            }
        }

        Self {
            first_operand: or_zero(first_operand),
            second_operand: or_zero(second_operand),
            operator,
        }
    }

    /// Builds a request from raw text, rejecting a missing operator before any remote call.
    pub fn parse(first_operand: &str, operator: &str, second_operand: &str) -> Result<Self> {
        let operator = Operator::parse(operator)?;
        Ok(Self::new(first_operand.trim(), second_operand.trim(), operator))
    }

    /// The literal expression as it appears in the prompt, e.g. `3+4`.
    pub fn expression(&self) -> String {
        format!(
            "{}{}{}",
            self.first_operand, self.operator, self.second_operand
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    Success(String),
    DomainError(String),
    TransportError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_char() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
        assert_eq!(Key::from_char('.'), Some(Key::DecimalPoint));
        assert_eq!(Key::from_char('x'), Some(Key::Operator(Operator::Multiply)));
        assert_eq!(Key::from_char('='), Some(Key::Equals));
        assert_eq!(Key::from_char('C'), Some(Key::Clear));
        assert_eq!(Key::from_char('%'), None);
        assert_eq!(Key::from_char(','), None);
    }

    #[test]
    fn test_request_fills_empty_operands_with_zero() {
        let request = EvaluationRequest::new("5", "", Operator::Add);
        assert_eq!(request.expression(), "5+0");

        let request = EvaluationRequest::new("", "", Operator::Divide);
        assert_eq!(request.expression(), "0/0");
    }

    #[test]
    fn test_parse_without_operator_is_rejected() {
        let err = EvaluationRequest::parse("3", "", "4").unwrap_err();
        assert!(matches!(err, CalcError::ValidationError { ref message } if message == OPERATOR_MISSING));

        assert!(EvaluationRequest::parse("3", "%", "4").is_err());
        assert_eq!(
            EvaluationRequest::parse("3", "*", "4").unwrap().expression(),
            "3*4"
        );
    }

    #[test]
    fn test_state_reset() {
        let mut state = CalculatorState {
            first_operand: "12".to_string(),
            second_operand: "3".to_string(),
            operator: Some(Operator::Subtract),
            step: Step::EnteringSecond,
            pending_decimal_point: true,
        };
        assert!(!state.is_reset());
        state.reset();
        assert!(state.is_reset());
        assert_eq!(state.step, Step::EnteringFirst);
    }
}
