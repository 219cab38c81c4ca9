// Adapters layer: concrete implementations for external systems (completion API, terminal).

pub mod openai;
pub mod terminal;

pub use openai::OpenAiEvaluator;
pub use terminal::TerminalFrontEnd;
