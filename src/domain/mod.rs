mod composed_request;
mod conversation;
mod form_fields;
mod form_state;
mod message_role;
mod mode;
mod pdf_context;
mod style;
mod uploaded_file;

pub use composed_request::{ComposedRequest, SamplingParams};
pub use conversation::{ChatMessage, ConversationTurn};
pub use form_fields::{ChatFields, CurrentLevel, LearningMethod, StudyPlanFields};
pub use form_state::{FormReset, FormState};
pub use message_role::MessageRole;
pub use mode::{FieldId, Mode, fields_relevant_for};
pub use pdf_context::PdfContext;
pub use style::{Language, StylePreferences, Tone};
pub use uploaded_file::UploadedFile;
