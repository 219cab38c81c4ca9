//! Keypad input state machine.
//!
//! Transitions are pure: they take the current [`CalculatorState`] by value
//! and return the next state together with the effects the session has to
//! perform (update the display, open a dialog, play the key cue, or call the
//! remote evaluator).

use crate::domain::model::{
    CalculatorState, EvaluationRequest, EvaluationResult, Key, Operator, Step, MAX_OPERAND_LEN,
};
use crate::utils::error::{CalcError, DIGIT_LIMIT_EXCEEDED};

pub const DOMAIN_ERROR_TITLE: &str = "Operation not valid!";
pub const TRANSPORT_ERROR_TITLE: &str = "Error!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Display(String),
    Dialog { title: String, message: String },
    PlayKeySound,
    Evaluate(EvaluationRequest),
}

impl Effect {
    pub fn dialog(title: &str, message: &str) -> Self {
        Self::Dialog {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn from_error(error: &CalcError) -> Self {
        Self::dialog(error.dialog_title(), &error.user_friendly_message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: CalculatorState,
    pub effects: Vec<Effect>,
}

pub fn transition(mut state: CalculatorState, key: Key) -> Transition {
    let mut effects = Vec::new();

    match key {
        Key::Digit(digit) => press_input(&mut state, Some(digit), &mut effects),
        Key::DecimalPoint => press_input(&mut state, None, &mut effects),
        Key::Operator(operator) => press_operator(&mut state, operator),
        Key::Equals => press_equals(&mut state, &mut effects),
        Key::Clear => clear(&mut state, &mut effects),
    }

    Transition { state, effects }
}

/// Every evaluation outcome ends in a full reset.
pub fn finish_evaluation(result: EvaluationResult) -> Transition {
    let state = CalculatorState::new();
    let effects = match result {
        EvaluationResult::Success(value) => vec![Effect::Display(value)],
        EvaluationResult::DomainError(message) => vec![
            Effect::Display("0".to_string()),
            Effect::dialog(DOMAIN_ERROR_TITLE, &message),
        ],
        EvaluationResult::TransportError(message) => vec![
            Effect::Display("0".to_string()),
            Effect::dialog(TRANSPORT_ERROR_TITLE, &message),
        ],
    };

    Transition { state, effects }
}

fn clear(state: &mut CalculatorState, effects: &mut Vec<Effect>) {
    state.reset();
    effects.push(Effect::Display("0".to_string()));
}

// ResultShown is not a readable step: reading there resets everything and
// yields the (now empty) first operand. Kept for compatibility with the
// keypad's historical behaviour, though it looks accidental.
fn read_current_value(state: &mut CalculatorState, effects: &mut Vec<Effect>) -> String {
    match state.step {
        Step::EnteringFirst => state.first_operand.clone(),
        Step::EnteringSecond => state.second_operand.clone(),
        Step::ResultShown => {
            tracing::debug!("Keypad read while a result is shown, resetting");
            clear(state, effects);
            state.first_operand.clone()
        }
    }
}

fn write_current_value(state: &mut CalculatorState, value: String, effects: &mut Vec<Effect>) {
    effects.push(Effect::Display(value.clone()));
    if state.step == Step::EnteringSecond {
        state.second_operand = value;
    } else {
        state.first_operand = value;
    }
}

/// `digit == None` is the decimal point key.
fn press_input(state: &mut CalculatorState, digit: Option<u8>, effects: &mut Vec<Effect>) {
    let current = read_current_value(state, effects);
    if current.len() >= MAX_OPERAND_LEN {
        effects.push(Effect::from_error(&CalcError::validation(
            DIGIT_LIMIT_EXCEEDED,
        )));
        return;
    }

    let Some(digit) = digit else {
        effects.push(Effect::PlayKeySound);
        if !current.contains('.') {
            state.pending_decimal_point = true;
        }
        return;
    };

    let next = match (state.pending_decimal_point, current.is_empty()) {
        (true, true) => format!("0.{}", digit),
        (true, false) => format!("{}.{}", current, digit),
        (false, _) => format!("{}{}", current, digit),
    };
    // A pending point can push a nine character operand past the cap.
    // The point is dropped with the digit; the operand itself is unchanged.
    if next.len() > MAX_OPERAND_LEN {
        state.pending_decimal_point = false;
        effects.push(Effect::from_error(&CalcError::validation(
            DIGIT_LIMIT_EXCEEDED,
        )));
        return;
    }

    effects.push(Effect::PlayKeySound);
    state.pending_decimal_point = false;
    write_current_value(state, next, effects);
}

fn press_operator(state: &mut CalculatorState, operator: Operator) {
    state.operator = Some(operator);
    state.step = Step::EnteringSecond;
    state.pending_decimal_point = false;
}

fn press_equals(state: &mut CalculatorState, effects: &mut Vec<Effect>) {
    state.pending_decimal_point = false;

    let Some(operator) = state.operator else {
        state.step = Step::ResultShown;
        let shown = if !state.second_operand.is_empty() {
            "0".to_string()
        } else if !state.first_operand.is_empty() {
            state.first_operand.clone()
        } else {
            "0".to_string()
        };
        effects.push(Effect::Display(shown));
        return;
    };

    effects.push(Effect::Evaluate(EvaluationRequest::new(
        &state.first_operand,
        &state.second_operand,
        operator,
    )));
}
