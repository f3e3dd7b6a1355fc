use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tracing::debug;

use super::domain::{Feedback, QuizPhase, Tick, Ticket, Verdict};
use super::session::{ScamCatError, ScamCatSession, ScamCatView};
use crate::games::{lock, GameRng, ScheduledTask};

/// Drives a [`ScamCatSession`] in real time on the tokio runtime.
///
/// Owns the single timer slot of the session: the one-second countdown while
/// a prompt is on screen, then the feedback and card-exit delays. Every
/// scheduled task holds only a weak reference, so dropping the last
/// controller handle tears the session down with its timers.
#[derive(Clone)]
pub struct ScamCatController {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<ControllerState>,
}

struct ControllerState {
    session: ScamCatSession,
    rng: GameRng,
    timer: ScheduledTask,
}

const TICK: Duration = Duration::from_secs(1);

impl ScamCatController {
    pub fn new(session: ScamCatSession, rng: GameRng) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ControllerState {
                    session,
                    rng,
                    timer: ScheduledTask::new(),
                }),
            }),
        }
    }

    pub fn start_round(&self) -> Result<ScamCatView, ScamCatError> {
        let mut guard = lock(&self.inner.state);
        let state = &mut *guard;
        let ticket = state.session.start_round(&mut state.rng)?;
        arm_countdown(&self.inner, state, ticket);
        Ok(state.session.view())
    }

    /// Answers the prompt on screen and stops its countdown.
    pub fn answer(&self, verdict: Verdict) -> Result<Feedback, ScamCatError> {
        let mut state = lock(&self.inner.state);
        let feedback = state.session.submit(Some(verdict))?;
        schedule_feedback(&self.inner, &mut state, feedback.is_correct);
        Ok(feedback)
    }

    pub fn reset_session(&self) -> ScamCatView {
        let mut state = lock(&self.inner.state);
        state.timer.cancel();
        state.session.reset_session();
        state.session.view()
    }

    pub fn view(&self) -> ScamCatView {
        lock(&self.inner.state).session.view()
    }

    /// Cancels whatever timer is pending. The session itself stays as is.
    pub fn shutdown(&self) {
        if lock(&self.inner.state).timer.cancel() {
            debug!("scam cat timer cancelled on shutdown");
        }
    }
}

fn arm_countdown(inner: &Arc<Inner>, state: &mut ControllerState, ticket: Ticket) {
    let weak = Arc::downgrade(inner);
    state.timer.spawn(async move {
        loop {
            tokio::time::sleep(TICK).await;
            if !on_tick(&weak, ticket) {
                break;
            }
        }
    });
}

fn schedule_feedback(inner: &Arc<Inner>, state: &mut ControllerState, is_correct: bool) {
    let ticket = state.session.ticket();
    let delay = state.session.rules().feedback_delay(is_correct);
    let weak = Arc::downgrade(inner);
    state
        .timer
        .schedule(delay, move || on_feedback_done(&weak, ticket));
}

fn schedule_transition(inner: &Arc<Inner>, state: &mut ControllerState) {
    let ticket = state.session.ticket();
    let delay = state.session.rules().card_exit_delay();
    let weak = Arc::downgrade(inner);
    state
        .timer
        .schedule(delay, move || on_transition_done(&weak, ticket));
}

/// Returns whether the countdown should keep running.
fn on_tick(weak: &Weak<Inner>, ticket: Ticket) -> bool {
    let Some(inner) = weak.upgrade() else {
        return false;
    };
    let mut state = lock(&inner.state);

    match state.session.tick(ticket) {
        Ok(Tick::Counting { .. }) => true,
        Ok(Tick::Expired(feedback)) => {
            state.timer.release();
            schedule_feedback(&inner, &mut state, feedback.is_correct);
            false
        }
        Err(err) => {
            debug!(%err, "countdown tick ignored");
            false
        }
    }
}

fn on_feedback_done(weak: &Weak<Inner>, ticket: Ticket) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut state = lock(&inner.state);

    match state.session.complete_feedback(ticket) {
        Ok(QuizPhase::Transitioning) => {
            state.timer.release();
            schedule_transition(&inner, &mut state);
        }
        Ok(_) => state.timer.release(),
        Err(err) => debug!(%err, "feedback completion ignored"),
    }
}

fn on_transition_done(weak: &Weak<Inner>, ticket: Ticket) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut guard = lock(&inner.state);
    let state = &mut *guard;

    match state.session.complete_transition(ticket) {
        Ok(QuizPhase::Playing) => {
            state.timer.release();
            let ticket = state.session.ticket();
            arm_countdown(&inner, state, ticket);
        }
        Ok(_) => state.timer.release(),
        Err(err) => debug!(%err, "card transition ignored"),
    }
}
