//! Minigame engines and the plumbing shared between them.

pub mod rng;
pub mod roster;
pub mod scam_cat;
pub mod schedule;
pub mod spending_sorter;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub use rng::{fork_rng, game_rng, GameRng};
pub use schedule::ScheduledTask;

/// Identifier handed to the view layer for a live session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl SessionId {
    pub fn next(prefix: &str) -> Self {
        let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{prefix}-{id:06}"))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session view tagged with the session it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<V> {
    pub session_id: SessionId,
    pub opened_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    #[serde(flatten)]
    pub view: V,
}

/// How long an untouched session survives, and how many may be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::minutes(30),
            max_sessions: 1024,
        }
    }
}

impl SessionPolicy {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.idle_ttl <= Duration::zero() {
            return Err(RulesError::Zero { field: "idle_ttl" });
        }
        if self.max_sessions == 0 {
            return Err(RulesError::Zero {
                field: "max_sessions",
            });
        }
        Ok(())
    }
}

/// Removes sessions idle past the policy's TTL, then the least recently
/// active ones until there is room for one more. Returns what was removed.
pub(crate) fn prune_sessions<E>(
    sessions: &mut HashMap<SessionId, E>,
    policy: &SessionPolicy,
    now: DateTime<Utc>,
    last_active: impl Fn(&E) -> DateTime<Utc>,
) -> Vec<(SessionId, E)> {
    let mut evicted = Vec::new();

    if let Some(cutoff) = now.checked_sub_signed(policy.idle_ttl) {
        let idle: Vec<SessionId> = sessions
            .iter()
            .filter(|(_, entry)| last_active(entry) < cutoff)
            .map(|(id, _)| id.clone())
            .collect();
        evicted.extend(idle.iter().filter_map(|id| sessions.remove_entry(id)));
    }

    while sessions.len() >= policy.max_sessions {
        let Some(oldest) = sessions
            .iter()
            .min_by(|a, b| (last_active(a.1), a.0).cmp(&(last_active(b.1), b.0)))
            .map(|(id, _)| id.clone())
        else {
            break;
        };
        evicted.extend(sessions.remove_entry(&oldest));
    }

    evicted
}

/// Rejected rule configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RulesError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("allocation targets must add up to 100 percent (got {0})")]
    TargetsSum(u32),
    #[error("budget range {min}..={max} must be ordered and divisible by step {step}")]
    BudgetRange { min: u32, max: u32, step: u32 },
    #[error("tolerance must be a finite, non-negative number of percentage points")]
    Tolerance,
    #[error("hand size {hand} exceeds the {catalog} prompts in the catalog")]
    HandTooLarge { hand: usize, catalog: usize },
}

/// Rejected catalog contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one entry")]
    Empty,
    #[error("catalog entry '{0}' appears more than once")]
    Duplicate(String),
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
