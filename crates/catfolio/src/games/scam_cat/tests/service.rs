use chrono::{Duration, Utc};

use super::common::*;
use crate::games::scam_cat::{QuizPhase, ScamCatRules, ScamCatService, ScamCatServiceError};
use crate::games::{SessionId, SessionPolicy};

fn capped_service(max_sessions: usize) -> ScamCatService {
    ScamCatService::new(standard_catalog(), ScamCatRules::default(), rng())
        .expect("service builds")
        .with_policy(SessionPolicy {
            idle_ttl: Duration::minutes(30),
            max_sessions,
        })
        .expect("policy is valid")
}

fn open(service: &ScamCatService) -> SessionId {
    service.create().expect("session opens").session_id
}

#[tokio::test(start_paused = true)]
async fn opening_past_the_cap_drops_the_oldest_sessions() {
    let service = capped_service(2);
    let first = open(&service);
    service.start_round(&first).expect("round starts");
    let second = open(&service);
    let third = open(&service);

    assert_eq!(service.active_sessions(), 2);
    assert!(matches!(
        service.view(&first),
        Err(ScamCatServiceError::NotFound(_))
    ));
    assert!(service.view(&second).is_ok());
    assert!(service.view(&third).is_ok());
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_with_running_timers_expire() {
    let service = capped_service(8);
    let id = open(&service);
    let view = service.start_round(&id).expect("round starts");
    assert_eq!(view.view.phase, QuizPhase::Playing);

    assert_eq!(service.evict_idle(Utc::now() + Duration::minutes(29)), 0);
    assert_eq!(service.evict_idle(Utc::now() + Duration::minutes(31)), 1);

    assert_eq!(service.active_sessions(), 0);
    assert!(matches!(
        service.reset(&id),
        Err(ScamCatServiceError::NotFound(_))
    ));
}

#[test]
fn abandoned_sessions_do_not_pile_up() {
    let service = capped_service(64);

    for _ in 0..500 {
        open(&service);
    }

    assert_eq!(service.active_sessions(), 64);
}
