use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::games::game_rng;
use crate::games::scam_cat::catalog::{MessagePrompt, PromptCatalog};
use crate::games::scam_cat::domain::{QuizPhase, Verdict};
use crate::games::scam_cat::{ScamCatController, ScamCatRules, ScamCatService, ScamCatSession};
use crate::games::GameRng;

pub(super) const SEED: u64 = 20_240_612;

pub(super) fn rng() -> GameRng {
    game_rng(Some(SEED))
}

/// Five messages that are all scams, so the right call is always known.
pub(super) fn all_scams() -> Arc<PromptCatalog> {
    let prompts = (1..=5)
        .map(|id| MessagePrompt::scam(id, "You WON! Send your bank details.", "SCAM! Prize bait."))
        .collect();
    Arc::new(PromptCatalog::new(prompts).expect("valid catalog"))
}

pub(super) fn standard_catalog() -> Arc<PromptCatalog> {
    Arc::new(PromptCatalog::standard())
}

pub(super) fn fresh_session(catalog: Arc<PromptCatalog>) -> ScamCatSession {
    ScamCatSession::new(catalog, ScamCatRules::default()).expect("default rules are valid")
}

pub(super) fn playing_session(catalog: Arc<PromptCatalog>) -> (ScamCatSession, GameRng) {
    let mut rng = rng();
    let mut session = fresh_session(catalog);
    session.start_round(&mut rng).expect("round starts");
    (session, rng)
}

pub(super) fn right_answer(session: &ScamCatSession) -> Verdict {
    let prompt = session.current_prompt().expect("prompt on screen");
    Verdict::from_is_scam(prompt.is_scam)
}

pub(super) fn wrong_answer(session: &ScamCatSession) -> Verdict {
    match right_answer(session) {
        Verdict::Scam => Verdict::Safe,
        Verdict::Safe => Verdict::Scam,
    }
}

/// Runs the feedback and card-exit steps the controller would time.
pub(super) fn settle(session: &mut ScamCatSession) -> QuizPhase {
    let ticket = session.ticket();
    let phase = session
        .complete_feedback(ticket)
        .expect("feedback completes");
    if phase != QuizPhase::Transitioning {
        return phase;
    }
    let ticket = session.ticket();
    session
        .complete_transition(ticket)
        .expect("transition completes")
}

pub(super) fn controller(catalog: Arc<PromptCatalog>) -> ScamCatController {
    ScamCatController::new(fresh_session(catalog), rng())
}

pub(super) fn service() -> Arc<ScamCatService> {
    Arc::new(
        ScamCatService::new(standard_catalog(), ScamCatRules::default(), rng())
            .expect("service builds"),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}
