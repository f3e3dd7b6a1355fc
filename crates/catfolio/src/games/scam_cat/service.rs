use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::catalog::PromptCatalog;
use super::controller::ScamCatController;
use super::domain::Verdict;
use super::rules::ScamCatRules;
use super::session::{FeedbackView, ScamCatError, ScamCatSession, ScamCatView};
use crate::games::{
    fork_rng, lock, prune_sessions, GameRng, RulesError, SessionId, SessionPolicy, SessionSnapshot,
};

/// Live Scam Cat sessions, each with its own running timer. Idle sessions are
/// shut down and dropped when new ones are opened.
pub struct ScamCatService {
    catalog: Arc<PromptCatalog>,
    rules: ScamCatRules,
    policy: SessionPolicy,
    rng: Mutex<GameRng>,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

#[derive(Clone)]
struct SessionEntry {
    controller: ScamCatController,
    opened_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

/// Feedback for the submitted answer together with the updated session.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReceipt {
    pub feedback: FeedbackView,
    pub session: SessionSnapshot<ScamCatView>,
}

impl ScamCatService {
    pub fn new(
        catalog: Arc<PromptCatalog>,
        rules: ScamCatRules,
        rng: GameRng,
    ) -> Result<Self, RulesError> {
        rules.validate(catalog.len())?;
        Ok(Self {
            catalog,
            rules,
            policy: SessionPolicy::default(),
            rng: Mutex::new(rng),
            sessions: Mutex::new(HashMap::new()),
        })
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Result<Self, RulesError> {
        policy.validate()?;
        self.policy = policy;
        Ok(self)
    }

    pub fn create(&self) -> Result<SessionSnapshot<ScamCatView>, ScamCatServiceError> {
        let session = ScamCatSession::new(self.catalog.clone(), self.rules.clone())?;
        let rng = fork_rng(&mut *lock(&self.rng));
        let controller = ScamCatController::new(session, rng);
        let session_id = SessionId::next("scam-cat");
        let view = controller.view();
        let opened_at = Utc::now();

        let evicted = {
            let mut sessions = lock(&self.sessions);
            let evicted =
                prune_sessions(&mut *sessions, &self.policy, opened_at, |entry| entry.last_active);
            sessions.insert(
                session_id.clone(),
                SessionEntry {
                    controller,
                    opened_at,
                    last_active: opened_at,
                },
            );
            evicted
        };
        shut_down(evicted);
        debug!(%session_id, "scam cat session opened");

        Ok(SessionSnapshot {
            session_id,
            opened_at,
            last_active: opened_at,
            view,
        })
    }

    pub fn view(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot<ScamCatView>, ScamCatServiceError> {
        let entry = self.entry(session_id)?;
        Ok(entry.snapshot(session_id, entry.controller.view()))
    }

    pub fn start_round(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot<ScamCatView>, ScamCatServiceError> {
        let entry = self.entry(session_id)?;
        let view = entry.controller.start_round()?;
        Ok(entry.snapshot(session_id, view))
    }

    pub fn answer(
        &self,
        session_id: &SessionId,
        verdict: Verdict,
    ) -> Result<AnswerReceipt, ScamCatServiceError> {
        let entry = self.entry(session_id)?;
        let feedback = entry.controller.answer(verdict)?;
        Ok(AnswerReceipt {
            feedback: FeedbackView::from(&feedback),
            session: entry.snapshot(session_id, entry.controller.view()),
        })
    }

    pub fn reset(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot<ScamCatView>, ScamCatServiceError> {
        let entry = self.entry(session_id)?;
        let view = entry.controller.reset_session();
        Ok(entry.snapshot(session_id, view))
    }

    /// Drops a session and cancels its pending timer.
    pub fn remove(&self, session_id: &SessionId) -> Result<(), ScamCatServiceError> {
        let entry = lock(&self.sessions)
            .remove(session_id)
            .ok_or_else(|| ScamCatServiceError::NotFound(session_id.clone()))?;
        entry.controller.shutdown();
        debug!(%session_id, "scam cat session closed");
        Ok(())
    }

    pub fn active_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Shuts down every session untouched since `now - idle_ttl`; returns how
    /// many went.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let policy = SessionPolicy {
            max_sessions: usize::MAX,
            ..self.policy
        };
        let evicted = {
            let mut sessions = lock(&self.sessions);
            prune_sessions(&mut *sessions, &policy, now, |entry| entry.last_active)
        };
        shut_down(evicted)
    }

    /// Looks up a session and marks it active.
    fn entry(&self, session_id: &SessionId) -> Result<SessionEntry, ScamCatServiceError> {
        let mut sessions = lock(&self.sessions);
        let entry = sessions
            .get_mut(session_id)
            .ok_or_else(|| ScamCatServiceError::NotFound(session_id.clone()))?;
        entry.last_active = Utc::now();
        Ok(entry.clone())
    }
}

fn shut_down(evicted: Vec<(SessionId, SessionEntry)>) -> usize {
    for (session_id, entry) in &evicted {
        entry.controller.shutdown();
        debug!(%session_id, "idle scam cat session expired");
    }
    evicted.len()
}

impl SessionEntry {
    fn snapshot(&self, session_id: &SessionId, view: ScamCatView) -> SessionSnapshot<ScamCatView> {
        SessionSnapshot {
            session_id: session_id.clone(),
            opened_at: self.opened_at,
            last_active: self.last_active,
            view,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScamCatServiceError {
    #[error("scam cat session {0} not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Game(#[from] ScamCatError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}
