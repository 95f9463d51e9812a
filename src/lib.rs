//! Educational assistant service.
//!
//! Turns chat questions and study-plan parameters into a system + user
//! prompt pair, optionally enriched with text from an uploaded PDF, and
//! forwards it to a hosted chat-completions model.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
