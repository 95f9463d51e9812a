mod failure_message;
mod prompt_composer;
mod request_orchestrator;
mod validation;

pub use failure_message::failure_message;
pub use prompt_composer::{
    CompositionSettings, DEFAULT_PDF_MAX_CHARS, PDF_CONTEXT_MARKER, PromptComposer,
    RECOMMENDED_CHAT_RULES, RECOMMENDED_STUDY_PLAN_RULES,
};
pub use request_orchestrator::{
    DEFAULT_PDF_PREVIEW_CHARS, DisplayStream, OrchestratorError, OrchestratorSettings,
    RequestOrchestrator, clear_form,
};
pub use validation::{ValidationError, validate_form};
