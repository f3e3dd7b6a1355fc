use crate::games::CatalogError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// A message the player must judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessagePrompt {
    pub id: u32,
    pub text: &'static str,
    pub is_scam: bool,
    pub explanation: &'static str,
}

impl MessagePrompt {
    pub const fn scam(id: u32, text: &'static str, explanation: &'static str) -> Self {
        Self {
            id,
            text,
            is_scam: true,
            explanation,
        }
    }

    pub const fn safe(id: u32, text: &'static str, explanation: &'static str) -> Self {
        Self {
            id,
            text,
            is_scam: false,
            explanation,
        }
    }
}

const STANDARD_PROMPTS: [MessagePrompt; 15] = [
    MessagePrompt::scam(
        1,
        "URGENT: Your account will be suspended in 24 hours! Click here immediately to verify your identity.",
        "SCAM! Red flags: Creates false urgency, threatens account suspension, and demands immediate action. Legitimate companies don't operate this way.",
    ),
    MessagePrompt::safe(
        2,
        "Hi! Your package delivery is scheduled for tomorrow between 2-4 PM. Track it here: [tracking link]",
        "SAFE! This is a normal delivery notification with expected information and no pressure tactics.",
    ),
    MessagePrompt::scam(
        3,
        "You've WON $5,000! Claim your prize now by providing your bank details!",
        "SCAM! You can't win something you didn't enter. Requests for bank details are a massive red flag.",
    ),
    MessagePrompt::safe(
        4,
        "Your subscription renewal is coming up next week. No action needed - we'll charge your card on file.",
        "SAFE! Transparent notification about an upcoming charge with no urgent demands or suspicious links.",
    ),
    MessagePrompt::scam(
        5,
        "FINAL WARNING! IRS has filed a lawsuit against you. Call this number NOW to avoid arrest!",
        "SCAM! The IRS never threatens arrest via text/email. This uses fear tactics and fake authority.",
    ),
    MessagePrompt::scam(
        6,
        "Hey, it's mom. My phone broke. This is my new number. Can you send me $200 for groceries?",
        "SCAM! Classic impersonation scam. Always verify identity through a known channel before sending money.",
    ),
    MessagePrompt::safe(
        7,
        "Your order #12345 has shipped. Estimated delivery: Friday. Reply STOP to unsubscribe.",
        "SAFE! Clear order reference, realistic delivery info, and includes opt-out option.",
    ),
    MessagePrompt::scam(
        8,
        "Security Alert: We detected suspicious activity. Reset your password here: [suspicious-link].com",
        "SCAM! Fake security alerts with suspicious links are common phishing tactics. Always go directly to the official website.",
    ),
    MessagePrompt::scam(
        9,
        "You're pre-approved for a $50,000 loan! No credit check required! Apply now!",
        "SCAM! 'No credit check' and 'pre-approved' for huge amounts are classic loan scam tactics.",
    ),
    MessagePrompt::safe(
        10,
        "Your appointment with Dr. Smith is confirmed for Tuesday at 3 PM. Location: 123 Main St.",
        "SAFE! Specific details about a scheduled appointment with clear information.",
    ),
    MessagePrompt::scam(
        11,
        "Netflix: Your payment method was declined. Update it within 48 hours to avoid service interruption.",
        "SCAM! Even if you have Netflix, scammers send these hoping to catch someone. Always check your account directly, not through links.",
    ),
    MessagePrompt::safe(
        12,
        "Hi! Your prescription is ready for pickup at Pharmacy on 5th Ave. Bring your ID.",
        "SAFE! Routine pickup notification with reasonable requirements.",
    ),
    MessagePrompt::scam(
        13,
        "FREE IPHONE 15! You've been selected as our lucky winner! Just pay $9.95 shipping!",
        "SCAM! Nothing is free. The 'shipping fee' scam is designed to steal credit card information.",
    ),
    MessagePrompt::safe(
        14,
        "Your credit score has changed. Log in to your account to see the update.",
        "SAFE! Standard notification directing you to log in yourself rather than providing a suspicious link.",
    ),
    MessagePrompt::scam(
        15,
        "BREAKING: Your social security number was used in Texas! Federal Agent John will call you. DO NOT IGNORE!",
        "SCAM! Social Security Administration doesn't contact people this way. Scare tactics and fake officials are red flags.",
    ),
];

/// Fixed deck of messages a round is dealt from.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    prompts: Vec<MessagePrompt>,
}

impl PromptCatalog {
    pub fn standard() -> Self {
        Self {
            prompts: STANDARD_PROMPTS.to_vec(),
        }
    }

    pub fn new(prompts: Vec<MessagePrompt>) -> Result<Self, CatalogError> {
        if prompts.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for prompt in &prompts {
            if !seen.insert(prompt.id) {
                return Err(CatalogError::Duplicate(prompt.id.to_string()));
            }
        }

        Ok(Self { prompts })
    }

    pub fn prompts(&self) -> &[MessagePrompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Shuffles a copy of the deck and keeps the first `hand_size` cards.
    pub fn deal<R: Rng + ?Sized>(&self, hand_size: usize, rng: &mut R) -> Vec<MessagePrompt> {
        let mut deck = self.prompts.clone();
        deck.shuffle(rng);
        deck.truncate(hand_size);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::game_rng;

    #[test]
    fn standard_deck_has_nine_scams_and_six_safe_messages() {
        let catalog = PromptCatalog::standard();
        assert_eq!(catalog.len(), 15);
        let scams = catalog
            .prompts()
            .iter()
            .filter(|prompt| prompt.is_scam)
            .count();
        assert_eq!(scams, 9);
        assert!(catalog
            .prompts()
            .iter()
            .all(|prompt| prompt.explanation.starts_with(if prompt.is_scam {
                "SCAM!"
            } else {
                "SAFE!"
            })));
    }

    #[test]
    fn deals_distinct_prompts() {
        let catalog = PromptCatalog::standard();
        let mut rng = game_rng(Some(9));
        for _ in 0..50 {
            let hand = catalog.deal(5, &mut rng);
            let ids: HashSet<u32> = hand.iter().map(|prompt| prompt.id).collect();
            assert_eq!(hand.len(), 5);
            assert_eq!(ids.len(), 5);
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let prompt = MessagePrompt::safe(1, "hello", "SAFE! hi");
        assert_eq!(
            PromptCatalog::new(vec![prompt, prompt]).unwrap_err(),
            CatalogError::Duplicate("1".to_string())
        );
    }
}
