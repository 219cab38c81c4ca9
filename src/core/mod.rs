pub mod calculator;
pub mod evaluator;
pub mod formatter;
pub mod keypad;

pub use crate::domain::model::{
    CalculatorState, EvaluationRequest, EvaluationResult, Key, Operator, Step,
};
pub use crate::domain::ports::{ConfigProvider, Evaluator, FrontEnd};
pub use crate::utils::error::Result;
