use crate::domain::model::{EvaluationRequest, EvaluationResult};
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn token_env(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;

    /// A token handed over directly; when present `token_env` is not read.
    fn api_token(&self) -> Option<&str> {
        None
    }
}

/// Resolves an arithmetic request somewhere other than locally.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResult;
}

/// Where the calculator shows its output.
pub trait FrontEnd {
    fn show_value(&mut self, value: &str);
    /// Blocks until the person at the keypad has seen the message.
    fn show_dialog(&mut self, title: &str, message: &str);
    /// Stops any cue still playing and replays it from the start.
    fn play_key_sound(&mut self);
}
