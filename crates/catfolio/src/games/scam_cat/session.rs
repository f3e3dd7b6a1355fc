use super::catalog::{MessagePrompt, PromptCatalog};
use super::domain::{Feedback, QuizPhase, Tick, Ticket, Verdict};
use super::rules::ScamCatRules;
use crate::games::RulesError;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Action rejected by the quiz state machine. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScamCatError {
    #[error("cannot {action} while the quiz is in {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error("ticket {presented} is stale (current step is {current})")]
    StaleTicket { presented: Ticket, current: Ticket },
}

/// One play-through of Scam Cat, spanning up to `lives` rounds.
///
/// The session is a pure state machine: time only moves when the owner calls
/// [`tick`](Self::tick) and the `complete_*` methods with the current ticket.
#[derive(Debug, Clone)]
pub struct ScamCatSession {
    catalog: Arc<PromptCatalog>,
    rules: ScamCatRules,
    phase: QuizPhase,
    hand: Vec<MessagePrompt>,
    cursor: usize,
    time_left: u32,
    attempts: u32,
    current_attempt: u32,
    feedback: Option<Feedback>,
    ticket: Ticket,
}

impl ScamCatSession {
    pub fn new(catalog: Arc<PromptCatalog>, rules: ScamCatRules) -> Result<Self, RulesError> {
        rules.validate(catalog.len())?;
        Ok(Self {
            time_left: rules.seconds_per_prompt,
            attempts: rules.lives,
            catalog,
            rules,
            phase: QuizPhase::Instructions,
            hand: Vec::new(),
            cursor: 0,
            current_attempt: 1,
            feedback: None,
            ticket: Ticket::default(),
        })
    }

    /// Deals a fresh hand and starts the countdown on its first prompt.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Ticket, ScamCatError> {
        self.expect_phase("start a round", QuizPhase::Instructions)?;

        self.hand = self.catalog.deal(self.rules.hand_size, rng);
        self.cursor = 0;
        self.time_left = self.rules.seconds_per_prompt;
        self.feedback = None;
        self.phase = QuizPhase::Playing;
        self.ticket = self.ticket.next();

        debug!(
            attempt = self.current_attempt,
            hand = ?self.hand.iter().map(|prompt| prompt.id).collect::<Vec<_>>(),
            "scam cat round started"
        );
        Ok(self.ticket)
    }

    /// Locks in an answer for the current prompt. `None` is a timeout.
    pub fn submit(&mut self, answer: Option<Verdict>) -> Result<Feedback, ScamCatError> {
        self.expect_phase("answer", QuizPhase::Playing)?;
        let Some(prompt) = self.hand.get(self.cursor).copied() else {
            return Err(ScamCatError::InvalidPhase {
                action: "answer",
                phase: self.phase,
            });
        };

        let expected = Verdict::from_is_scam(prompt.is_scam);
        let is_correct = answer == Some(expected);
        if !is_correct {
            self.attempts = self.attempts.saturating_sub(1);
        }

        let feedback = Feedback {
            prompt_id: prompt.id,
            answer,
            expected,
            is_correct,
            explanation: prompt.explanation,
        };
        self.feedback = Some(feedback.clone());
        self.phase = QuizPhase::Feedback;
        self.ticket = self.ticket.next();

        debug!(
            prompt = prompt.id,
            answer = answer.map(Verdict::label).unwrap_or("timeout"),
            is_correct,
            attempts = self.attempts,
            "scam cat answer locked in"
        );
        Ok(feedback)
    }

    /// One second of countdown. Hitting zero submits a timeout.
    pub fn tick(&mut self, ticket: Ticket) -> Result<Tick, ScamCatError> {
        self.expect_ticket(ticket)?;
        self.expect_phase("tick", QuizPhase::Playing)?;

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return Ok(Tick::Counting {
                time_left: self.time_left,
            });
        }
        self.submit(None).map(Tick::Expired)
    }

    /// Ends the feedback display for the answer issued under `ticket`.
    pub fn complete_feedback(&mut self, ticket: Ticket) -> Result<QuizPhase, ScamCatError> {
        self.expect_ticket(ticket)?;
        self.expect_phase("complete feedback", QuizPhase::Feedback)?;

        let is_correct = self
            .feedback
            .as_ref()
            .map(|feedback| feedback.is_correct)
            .unwrap_or(false);
        self.ticket = self.ticket.next();

        if is_correct {
            self.phase = QuizPhase::Transitioning;
        } else if self.attempts == 0 {
            self.phase = QuizPhase::Failed;
            info!(
                rounds = self.current_attempt,
                "scam cat session failed: out of attempts"
            );
        } else {
            self.current_attempt += 1;
            self.hand.clear();
            self.cursor = 0;
            self.time_left = self.rules.seconds_per_prompt;
            self.phase = QuizPhase::Instructions;
            debug!(
                attempt = self.current_attempt,
                attempts = self.attempts,
                "scam cat round lost"
            );
        }
        Ok(self.phase)
    }

    /// Ends the card exit and moves to the next prompt, or wins the round.
    pub fn complete_transition(&mut self, ticket: Ticket) -> Result<QuizPhase, ScamCatError> {
        self.expect_ticket(ticket)?;
        self.expect_phase("advance", QuizPhase::Transitioning)?;

        self.ticket = self.ticket.next();
        self.cursor += 1;
        self.feedback = None;

        if self.cursor >= self.hand.len() {
            self.phase = QuizPhase::Success;
            info!(
                attempt = self.current_attempt,
                attempts_left = self.attempts,
                "scam cat round cleared"
            );
        } else {
            self.time_left = self.rules.seconds_per_prompt;
            self.phase = QuizPhase::Playing;
        }
        Ok(self.phase)
    }

    /// Back to the instructions screen with full attempts. Valid from any phase.
    pub fn reset_session(&mut self) {
        self.attempts = self.rules.lives;
        self.current_attempt = 1;
        self.hand.clear();
        self.cursor = 0;
        self.time_left = self.rules.seconds_per_prompt;
        self.feedback = None;
        self.phase = QuizPhase::Instructions;
        self.ticket = self.ticket.next();
        debug!("scam cat session reset");
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn current_attempt(&self) -> u32 {
        self.current_attempt
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn hand(&self) -> &[MessagePrompt] {
        &self.hand
    }

    pub fn current_prompt(&self) -> Option<&MessagePrompt> {
        match self.phase {
            QuizPhase::Playing | QuizPhase::Feedback | QuizPhase::Transitioning => {
                self.hand.get(self.cursor)
            }
            _ => None,
        }
    }

    /// The most recent answer, while it is still being shown.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn rules(&self) -> &ScamCatRules {
        &self.rules
    }

    pub fn start_label(&self) -> String {
        if self.current_attempt <= 1 {
            "Start Game".to_string()
        } else {
            format!("Attempt {} of {}", self.current_attempt, self.rules.lives)
        }
    }

    pub fn progress_percent(&self) -> u32 {
        let total = if self.hand.is_empty() {
            self.rules.hand_size
        } else {
            self.hand.len()
        };
        if total == 0 {
            return 0;
        }
        (self.cursor as f64 * 100.0 / total as f64).round() as u32
    }

    pub fn view(&self) -> ScamCatView {
        ScamCatView {
            phase: self.phase,
            phase_label: self.phase.label(),
            attempts: self.attempts,
            lives: self.rules.lives,
            current_attempt: self.current_attempt,
            start_label: self.start_label(),
            hand_size: self.rules.hand_size,
            cursor: self.cursor,
            progress_percent: self.progress_percent(),
            time_left: self.time_left,
            prompt: self.current_prompt().map(|prompt| PromptCard {
                id: prompt.id,
                number: self.cursor + 1,
                text: prompt.text,
            }),
            feedback: self.feedback.as_ref().map(FeedbackView::from),
            accepting_answers: self.phase == QuizPhase::Playing,
        }
    }

    fn expect_phase(&self, action: &'static str, phase: QuizPhase) -> Result<(), ScamCatError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(ScamCatError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn expect_ticket(&self, presented: Ticket) -> Result<(), ScamCatError> {
        if presented == self.ticket {
            Ok(())
        } else {
            Err(ScamCatError::StaleTicket {
                presented,
                current: self.ticket,
            })
        }
    }
}

/// Prompt as the player sees it; the answer stays server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptCard {
    pub id: u32,
    /// 1-based position in the hand.
    pub number: usize,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub prompt_id: u32,
    pub headline: &'static str,
    pub answer: Option<Verdict>,
    pub expected: Verdict,
    pub is_correct: bool,
    pub explanation: &'static str,
}

impl From<&Feedback> for FeedbackView {
    fn from(feedback: &Feedback) -> Self {
        Self {
            prompt_id: feedback.prompt_id,
            headline: feedback.headline(),
            answer: feedback.answer,
            expected: feedback.expected,
            is_correct: feedback.is_correct,
            explanation: feedback.explanation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScamCatView {
    pub phase: QuizPhase,
    pub phase_label: &'static str,
    pub attempts: u32,
    pub lives: u32,
    pub current_attempt: u32,
    pub start_label: String,
    pub hand_size: usize,
    pub cursor: usize,
    pub progress_percent: u32,
    pub time_left: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackView>,
    pub accepting_answers: bool,
}
