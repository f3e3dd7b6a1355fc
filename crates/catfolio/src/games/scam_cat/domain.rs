use serde::{Deserialize, Serialize};
use std::fmt;

/// The player's call on a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Scam,
    Safe,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Scam => "Scam",
            Verdict::Safe => "Safe",
        }
    }

    pub const fn from_is_scam(is_scam: bool) -> Self {
        if is_scam {
            Verdict::Scam
        } else {
            Verdict::Safe
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Instructions,
    Playing,
    /// Answer locked in; the explanation is on screen.
    Feedback,
    /// Card exit animation after a correct answer.
    Transitioning,
    Success,
    Failed,
}

impl QuizPhase {
    pub const fn label(self) -> &'static str {
        match self {
            QuizPhase::Instructions => "Instructions",
            QuizPhase::Playing => "Playing",
            QuizPhase::Feedback => "Feedback",
            QuizPhase::Transitioning => "Transitioning",
            QuizPhase::Success => "Success",
            QuizPhase::Failed => "Failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, QuizPhase::Success | QuizPhase::Failed)
    }
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one submission, captured when the answer was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub prompt_id: u32,
    /// `None` when the countdown ran out.
    pub answer: Option<Verdict>,
    pub expected: Verdict,
    pub is_correct: bool,
    pub explanation: &'static str,
}

impl Feedback {
    pub fn timed_out(&self) -> bool {
        self.answer.is_none()
    }

    pub fn headline(&self) -> &'static str {
        if self.is_correct {
            "Correct!"
        } else if self.timed_out() {
            "Time's Up!"
        } else {
            "Wrong!"
        }
    }
}

/// Sequence number of the timed step a session is currently in.
///
/// Every transition bumps it; timer callbacks carry the ticket they were
/// issued with and are refused once it no longer matches.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ticket(pub u64);

impl Ticket {
    pub(crate) fn next(self) -> Self {
        Ticket(self.0 + 1)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What one second of countdown did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Counting { time_left: u32 },
    Expired(Feedback),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_distinguishes_timeouts_from_wrong_answers() {
        let mut feedback = Feedback {
            prompt_id: 3,
            answer: None,
            expected: Verdict::Scam,
            is_correct: false,
            explanation: "SCAM!",
        };
        assert_eq!(feedback.headline(), "Time's Up!");

        feedback.answer = Some(Verdict::Safe);
        assert_eq!(feedback.headline(), "Wrong!");

        feedback.answer = Some(Verdict::Scam);
        feedback.is_correct = true;
        assert_eq!(feedback.headline(), "Correct!");
    }
}
