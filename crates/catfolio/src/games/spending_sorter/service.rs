use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::catalog::ItemCatalog;
use super::domain::{Bucket, Classification, ItemId};
use super::rules::SpendingSorterRules;
use super::session::{SpendingSorterError, SpendingSorterSession, SpendingSorterView};
use crate::games::{
    fork_rng, lock, prune_sessions, GameRng, RulesError, SessionId, SessionPolicy, SessionSnapshot,
};

/// Live Spending Sorter sessions, one per player screen. Sessions left idle
/// past the [`SessionPolicy`] are dropped when new ones are opened.
pub struct SpendingSorterService {
    catalog: Arc<ItemCatalog>,
    rules: SpendingSorterRules,
    policy: SessionPolicy,
    rng: Mutex<GameRng>,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

struct SessionEntry {
    session: SpendingSorterSession,
    rng: GameRng,
    opened_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

/// Classification result together with the updated session.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReceipt {
    pub classification: Classification,
    pub session: SessionSnapshot<SpendingSorterView>,
}

impl SpendingSorterService {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        rules: SpendingSorterRules,
        rng: GameRng,
    ) -> Result<Self, RulesError> {
        rules.validate()?;
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

    /// Opens a session on the instructions screen.
    pub fn create(&self) -> Result<SessionSnapshot<SpendingSorterView>, SpendingSorterServiceError> {
        let mut rng = fork_rng(&mut *lock(&self.rng));
        let session =
            SpendingSorterSession::new(self.catalog.clone(), self.rules.clone(), &mut rng)?;
        let session_id = SessionId::next("sorter");
        let view = session.view();
        let opened_at = Utc::now();

        {
            let mut sessions = lock(&self.sessions);
            self.prune(&mut sessions, opened_at);
            sessions.insert(
                session_id.clone(),
                SessionEntry {
                    session,
                    rng,
                    opened_at,
                    last_active: opened_at,
                },
            );
        }
        debug!(%session_id, budget = view.starting_budget, "spending sorter session opened");

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
    ) -> Result<SessionSnapshot<SpendingSorterView>, SpendingSorterServiceError> {
        self.with_session(session_id, |_| Ok(()))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn start(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot<SpendingSorterView>, SpendingSorterServiceError> {
        self.with_session(session_id, |entry| entry.session.start(&mut entry.rng))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn classify(
        &self,
        session_id: &SessionId,
        item_id: ItemId,
        bucket: Bucket,
    ) -> Result<ClassificationReceipt, SpendingSorterServiceError> {
        let (classification, session) =
            self.with_session(session_id, |entry| entry.session.classify(item_id, bucket))?;
        Ok(ClassificationReceipt {
            classification,
            session,
        })
    }

    pub fn finish(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot<SpendingSorterView>, SpendingSorterServiceError> {
        self.with_session(session_id, |entry| entry.session.finish().map(|_| ()))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn reset(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionSnapshot<SpendingSorterView>, SpendingSorterServiceError> {
        self.with_session(session_id, |entry| {
            entry.session.reset(&mut entry.rng);
            Ok(())
        })
        .map(|(_, snapshot)| snapshot)
    }

    /// Drops a session when the player leaves for the menu.
    pub fn remove(&self, session_id: &SessionId) -> Result<(), SpendingSorterServiceError> {
        lock(&self.sessions)
            .remove(session_id)
            .map(|_| ())
            .ok_or_else(|| SpendingSorterServiceError::NotFound(session_id.clone()))
    }

    pub fn active_sessions(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Drops every session untouched since `now - idle_ttl`; returns how many went.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = lock(&self.sessions);
        let policy = SessionPolicy {
            max_sessions: usize::MAX,
            ..self.policy
        };
        let evicted = prune_sessions(&mut *sessions, &policy, now, |entry| entry.last_active);
        evicted.len()
    }

    fn prune(&self, sessions: &mut HashMap<SessionId, SessionEntry>, now: DateTime<Utc>) {
        let evicted = prune_sessions(sessions, &self.policy, now, |entry| entry.last_active);
        if !evicted.is_empty() {
            debug!(
                evicted = evicted.len(),
                remaining = sessions.len(),
                "spending sorter sessions expired"
            );
        }
    }

    fn with_session<T>(
        &self,
        session_id: &SessionId,
        action: impl FnOnce(&mut SessionEntry) -> Result<T, SpendingSorterError>,
    ) -> Result<(T, SessionSnapshot<SpendingSorterView>), SpendingSorterServiceError> {
        let mut sessions = lock(&self.sessions);
        let entry = sessions
            .get_mut(session_id)
            .ok_or_else(|| SpendingSorterServiceError::NotFound(session_id.clone()))?;

        entry.last_active = Utc::now();
        let value = action(entry)?;
        let snapshot = SessionSnapshot {
            session_id: session_id.clone(),
            opened_at: entry.opened_at,
            last_active: entry.last_active,
            view: entry.session.view(),
        };
        Ok((value, snapshot))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpendingSorterServiceError {
    #[error("spending sorter session {0} not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Game(#[from] SpendingSorterError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}
