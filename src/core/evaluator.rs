//! Prompt construction and reply classification shared by remote evaluators.

use crate::core::formatter::format_response;
use crate::domain::model::{EvaluationRequest, EvaluationResult};
use crate::utils::error::{Result, TRANSPORT_UNAVAILABLE};

/// Marker the model is told to put in front of any error it reports.
pub const ERROR_MARKER: &str = "[ERROR] - ";

pub fn build_prompt(request: &EvaluationRequest) -> String {
    format!(
        "Do not explain it. In case of error, just say '{}' and a very short reason. Solve this:{}",
        ERROR_MARKER,
        request.expression()
    )
}

/// Sorts a reply the model produced into a display value or a domain error.
pub fn classify_reply(reply: &str) -> EvaluationResult {
    if reply.contains(ERROR_MARKER) {
        return EvaluationResult::DomainError(reply.to_string());
    }
    EvaluationResult::Success(format_response(reply))
}

/// Collapses the outcome of a remote call into the closed three-way result.
pub fn to_evaluation_result(outcome: Result<String>) -> EvaluationResult {
    match outcome {
        Ok(reply) => classify_reply(&reply),
        Err(e) => {
            tracing::warn!(
                "Remote evaluation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            EvaluationResult::TransportError(TRANSPORT_UNAVAILABLE.to_string())
        }
    }
}
