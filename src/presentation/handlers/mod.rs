mod clear;
mod fields;
mod form;
mod health;
mod pdf_preview;
mod submit;

pub use clear::clear_handler;
pub use fields::fields_handler;
pub use form::{FormError, Submission, read_submission};
pub use health::health_handler;
pub use pdf_preview::pdf_preview_handler;
pub use submit::{submit_handler, submit_stream_handler};
