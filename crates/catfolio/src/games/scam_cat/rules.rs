use crate::games::RulesError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for Scam Cat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamCatRules {
    /// Wrong answers allowed across the whole session.
    pub lives: u32,
    pub hand_size: usize,
    pub seconds_per_prompt: u32,
    pub correct_feedback_ms: u64,
    pub incorrect_feedback_ms: u64,
    pub card_exit_ms: u64,
}

impl Default for ScamCatRules {
    fn default() -> Self {
        Self {
            lives: 3,
            hand_size: 5,
            seconds_per_prompt: 15,
            correct_feedback_ms: 2500,
            incorrect_feedback_ms: 3000,
            card_exit_ms: 500,
        }
    }
}

impl ScamCatRules {
    pub fn validate(&self, catalog_len: usize) -> Result<(), RulesError> {
        if self.lives == 0 {
            return Err(RulesError::Zero { field: "lives" });
        }
        if self.hand_size == 0 {
            return Err(RulesError::Zero { field: "hand_size" });
        }
        if self.seconds_per_prompt == 0 {
            return Err(RulesError::Zero {
                field: "seconds_per_prompt",
            });
        }
        if self.hand_size > catalog_len {
            return Err(RulesError::HandTooLarge {
                hand: self.hand_size,
                catalog: catalog_len,
            });
        }
        Ok(())
    }

    pub fn feedback_delay(&self, is_correct: bool) -> Duration {
        if is_correct {
            Duration::from_millis(self.correct_feedback_ms)
        } else {
            Duration::from_millis(self.incorrect_feedback_ms)
        }
    }

    pub fn card_exit_delay(&self) -> Duration {
        Duration::from_millis(self.card_exit_ms)
    }
}
