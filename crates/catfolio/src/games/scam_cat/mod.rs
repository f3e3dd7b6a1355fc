//! Scam Cat: a timed quiz where each message must be judged scam or safe
//! before the countdown runs out, with a limited number of attempts.

pub mod catalog;
mod controller;
pub mod domain;
pub mod router;
mod rules;
pub mod service;
mod session;

#[cfg(test)]
mod tests;

pub use catalog::{MessagePrompt, PromptCatalog};
pub use controller::ScamCatController;
pub use domain::{Feedback, QuizPhase, Tick, Ticket, Verdict};
pub use router::scam_cat_router;
pub use rules::ScamCatRules;
pub use service::{AnswerReceipt, ScamCatService, ScamCatServiceError};
pub use session::{FeedbackView, PromptCard, ScamCatError, ScamCatSession, ScamCatView};
