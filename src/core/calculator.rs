use crate::core::keypad::{self, Effect, Transition};
use crate::domain::model::{CalculatorState, EvaluationRequest, EvaluationResult, Key};
use crate::domain::ports::{Evaluator, FrontEnd};

/// Owns the keypad state and drives the front end and the evaluator.
///
/// Keys are processed one at a time; an evaluation is awaited before the
/// next key is looked at, so a slow remote call freezes the keypad.
pub struct Calculator<E: Evaluator, F: FrontEnd> {
    state: CalculatorState,
    evaluator: E,
    front_end: F,
}

impl<E: Evaluator, F: FrontEnd> Calculator<E, F> {
    pub fn new(evaluator: E, front_end: F) -> Self {
        Self {
            state: CalculatorState::new(),
            evaluator,
            front_end,
        }
    }

    /// Shows the initial `0`.
    pub fn start(&mut self) {
        tracing::info!("Calculator ready");
        self.front_end.show_value("0");
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    pub fn into_front_end(self) -> F {
        self.front_end
    }

    pub async fn press(&mut self, key: Key) {
        tracing::debug!("Key pressed: {:?}", key);
        let state = std::mem::take(&mut self.state);
        let Transition { state, effects } = keypad::transition(state, key);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::Evaluate(request) => {
                    tracing::info!("Evaluating {} remotely", request.expression());
                    let result = self.evaluator.evaluate(&request).await;
                    self.finish(result);
                }
                other => self.perform(other),
            }
        }
    }

    /// Feeds every recognised character of `text` as a key and returns how many were used.
    pub async fn type_keys(&mut self, text: &str) -> usize {
        let mut used = 0;
        for c in text.chars() {
            match Key::from_char(c) {
                Some(key) => {
                    self.press(key).await;
                    used += 1;
                }
                None if c.is_whitespace() => {}
                None => tracing::debug!("Ignoring unknown key '{}'", c),
            }
        }
        used
    }

    /// Evaluates an operation typed as three pieces of text, bypassing the keypad.
    ///
    /// The text goes through the same request builder as the keypad, so a
    /// missing operator shows a dialog and no request is sent.
    pub async fn evaluate_text(&mut self, first: &str, operator: &str, second: &str) {
        match EvaluationRequest::parse(first, operator, second) {
            Ok(request) => {
                tracing::info!("Evaluating {} remotely", request.expression());
                let result = self.evaluator.evaluate(&request).await;
                self.finish(result);
            }
            Err(e) => {
                tracing::info!("Rejected operation: {}", e);
                self.state.reset();
                self.front_end.show_value("0");
                self.front_end
                    .show_dialog(e.dialog_title(), &e.user_friendly_message());
            }
        }
    }

    fn finish(&mut self, result: EvaluationResult) {
        match &result {
            EvaluationResult::Success(value) => tracing::info!("Result: {}", value),
            EvaluationResult::DomainError(message) => {
                tracing::info!("Remote service rejected the operation: {}", message)
            }
            EvaluationResult::TransportError(message) => {
                tracing::warn!("Evaluation failed: {}", message)
            }
        }

        let Transition { state, effects } = keypad::finish_evaluation(result);
        self.state = state;
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Display(value) => self.front_end.show_value(&value),
            Effect::Dialog { title, message } => self.front_end.show_dialog(&title, &message),
            Effect::PlayKeySound => self.front_end.play_key_sound(),
            // finish_evaluation never asks for another evaluation
            Effect::Evaluate(request) => {
                tracing::warn!("Dropping nested evaluation of {}", request.expression())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Operator, Step};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingFrontEnd {
        values: Vec<String>,
        dialogs: Vec<(String, String)>,
        sounds: usize,
    }

    impl FrontEnd for RecordingFrontEnd {
        fn show_value(&mut self, value: &str) {
            self.values.push(value.to_string());
        }

        fn show_dialog(&mut self, title: &str, message: &str) {
            self.dialogs.push((title.to_string(), message.to_string()));
        }

        fn play_key_sound(&mut self) {
            self.sounds += 1;
        }
    }

    struct FixedEvaluator {
        result: EvaluationResult,
        requests: Arc<Mutex<Vec<EvaluationRequest>>>,
    }

    impl FixedEvaluator {
        fn new(result: EvaluationResult) -> Self {
            Self {
                result,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Evaluator for FixedEvaluator {
        async fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
            self.requests.lock().unwrap().push(request.clone());
            self.result.clone()
        }
    }

    #[test]
    fn test_success_displays_value_and_resets() {
        let evaluator = FixedEvaluator::new(EvaluationResult::Success("7".to_string()));
        let requests = evaluator.requests.clone();
        let mut calculator = Calculator::new(evaluator, RecordingFrontEnd::default());

        tokio_test::block_on(calculator.type_keys("3+4="));

        assert_eq!(
            *requests.lock().unwrap(),
            vec![EvaluationRequest::new("3", "4", Operator::Add)]
        );
        assert!(calculator.state().is_reset());
        assert_eq!(calculator.front_end().values.last().unwrap(), "7");
        assert_eq!(calculator.front_end().sounds, 2);
    }

    #[test]
    fn test_no_operator_never_calls_evaluator() {
        let evaluator = FixedEvaluator::new(EvaluationResult::Success("x".to_string()));
        let requests = evaluator.requests.clone();
        let mut calculator = Calculator::new(evaluator, RecordingFrontEnd::default());

        tokio_test::block_on(calculator.type_keys("7="));

        assert!(requests.lock().unwrap().is_empty());
        assert_eq!(calculator.state().step, Step::ResultShown);
        assert_eq!(calculator.front_end().values.last().unwrap(), "7");
    }

    #[test]
    fn test_transport_error_shows_dialog_and_resets() {
        let evaluator = FixedEvaluator::new(EvaluationResult::TransportError(
            "The remote service is unavailable".to_string(),
        ));
        let mut calculator = Calculator::new(evaluator, RecordingFrontEnd::default());

        tokio_test::block_on(calculator.type_keys("9/3="));

        assert!(calculator.state().is_reset());
        let front_end = calculator.into_front_end();
        assert_eq!(
            front_end.dialogs,
            vec![(
                "Error!".to_string(),
                "The remote service is unavailable".to_string()
            )]
        );
        assert_eq!(front_end.values.last().unwrap(), "0");
    }

    #[test]
    fn test_text_operation_uses_request_builder() {
        let evaluator = FixedEvaluator::new(EvaluationResult::Success("12".to_string()));
        let requests = evaluator.requests.clone();
        let mut calculator = Calculator::new(evaluator, RecordingFrontEnd::default());

        tokio_test::block_on(calculator.evaluate_text(" 3 ", "x", ""));

        assert_eq!(
            *requests.lock().unwrap(),
            vec![EvaluationRequest::new("3", "0", Operator::Multiply)]
        );
        assert_eq!(calculator.front_end().values.last().unwrap(), "12");
    }

    #[test]
    fn test_text_operation_without_operator_is_rejected_locally() {
        let evaluator = FixedEvaluator::new(EvaluationResult::Success("7".to_string()));
        let requests = evaluator.requests.clone();
        let mut calculator = Calculator::new(evaluator, RecordingFrontEnd::default());

        tokio_test::block_on(calculator.evaluate_text("3", "", "4"));

        assert!(requests.lock().unwrap().is_empty());
        assert!(calculator.state().is_reset());
        assert_eq!(
            calculator.front_end().dialogs,
            vec![(
                "Operation not valid!".to_string(),
                "You must insert an operator to continue".to_string()
            )]
        );
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let evaluator = FixedEvaluator::new(EvaluationResult::Success("0".to_string()));
        let mut calculator = Calculator::new(evaluator, RecordingFrontEnd::default());

        let used = tokio_test::block_on(calculator.type_keys("1 2?3"));

        assert_eq!(used, 3);
        assert_eq!(calculator.state().first_operand, "123");
    }
}
