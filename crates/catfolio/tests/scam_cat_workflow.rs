//! End-to-end Scam Cat play through the service facade, on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use catfolio::games::game_rng;
use catfolio::games::scam_cat::{
    MessagePrompt, PromptCatalog, QuizPhase, ScamCatRules, ScamCatService, Verdict,
};

fn service(rules: ScamCatRules) -> ScamCatService {
    let prompts = (1..=6)
        .map(|id| {
            MessagePrompt::scam(
                id,
                "FINAL WARNING! Pay the fee now!",
                "SCAM! Urgency and fees are red flags.",
            )
        })
        .collect();
    let catalog = PromptCatalog::new(prompts).expect("valid catalog");
    ScamCatService::new(Arc::new(catalog), rules, game_rng(Some(3))).expect("service builds")
}

async fn wait_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn spotting_every_scam_wins_the_round() {
    let service = service(ScamCatRules::default());
    let session = service.create().expect("session created");
    let id = session.session_id.clone();
    assert_eq!(session.view.start_label, "Start Game");

    service.start_round(&id).expect("round starts");
    for answered in 1..=5 {
        let receipt = service.answer(&id, Verdict::Scam).expect("answer accepted");
        assert_eq!(receipt.feedback.headline, "Correct!");
        wait_ms(3_100).await;
        let view = service.view(&id).expect("session exists").view;
        assert_eq!(view.cursor, answered);
    }

    let view = service.view(&id).expect("session exists").view;
    assert_eq!(view.phase, QuizPhase::Success);
    assert_eq!(view.progress_percent, 100);
    assert_eq!(view.attempts, 3);
}

#[tokio::test(start_paused = true)]
async fn three_lost_rounds_fail_and_reset_recovers() {
    let service = service(ScamCatRules::default());
    let id = service.create().expect("session created").session_id;

    // First round: wrong answer. Second: timeout. Third: wrong again.
    service.start_round(&id).expect("round one");
    service.answer(&id, Verdict::Safe).expect("answer accepted");
    wait_ms(3_100).await;
    let view = service.view(&id).expect("session exists").view;
    assert_eq!(view.phase, QuizPhase::Instructions);
    assert_eq!(view.start_label, "Attempt 2 of 3");

    service.start_round(&id).expect("round two");
    wait_ms(15_100).await;
    let view = service.view(&id).expect("session exists").view;
    assert_eq!(view.phase, QuizPhase::Feedback);
    assert_eq!(
        view.feedback.as_ref().map(|feedback| feedback.headline),
        Some("Time's Up!")
    );
    wait_ms(3_000).await;

    service.start_round(&id).expect("round three");
    service.answer(&id, Verdict::Safe).expect("answer accepted");
    wait_ms(3_100).await;

    let view = service.view(&id).expect("session exists").view;
    assert_eq!(view.phase, QuizPhase::Failed);
    assert_eq!(view.attempts, 0);
    assert!(service.start_round(&id).is_err());

    let view = service.reset(&id).expect("reset").view;
    assert_eq!(view.phase, QuizPhase::Instructions);
    assert_eq!(view.attempts, 3);
    assert_eq!(view.start_label, "Start Game");
}

#[tokio::test(start_paused = true)]
async fn shorter_timers_come_from_the_rules() {
    let service = service(ScamCatRules {
        seconds_per_prompt: 3,
        lives: 1,
        ..ScamCatRules::default()
    });
    let id = service.create().expect("session created").session_id;

    service.start_round(&id).expect("round starts");
    wait_ms(3_100).await;
    assert_eq!(
        service.view(&id).expect("session exists").view.phase,
        QuizPhase::Feedback
    );

    wait_ms(3_000).await;
    assert_eq!(
        service.view(&id).expect("session exists").view.phase,
        QuizPhase::Failed
    );

    service.remove(&id).expect("session removed");
    assert_eq!(service.active_sessions(), 0);
}
