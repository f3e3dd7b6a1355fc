use super::catalog::ItemCatalog;
use super::domain::{
    Bucket, BucketLedger, Category, CategoryAmounts, Classification, ItemId, SorterPhase,
    SpawnedItem,
};
use super::outcome::{budget_targets, judge_allocation, percent_of, AllocationReport};
use super::rules::SpendingSorterRules;
use crate::games::RulesError;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Action rejected because the session is not in a state that allows it.
/// Tallies are untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpendingSorterError {
    #[error("item {0} is not waiting to be sorted")]
    ItemNotPending(ItemId),
    #[error("{pending} item(s) still need sorting before finishing")]
    NotReady { pending: usize },
    #[error("cannot {action} while the session is in {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: SorterPhase,
    },
}

/// One play-through of the Spending Sorter.
#[derive(Debug, Clone)]
pub struct SpendingSorterSession {
    catalog: Arc<ItemCatalog>,
    rules: SpendingSorterRules,
    phase: SorterPhase,
    starting_budget: u32,
    pending: Vec<SpawnedItem>,
    ledger: BucketLedger,
    ignored: Vec<SpawnedItem>,
    score: u32,
    drawn: usize,
    next_item_id: u64,
    report: Option<AllocationReport>,
}

impl SpendingSorterSession {
    /// Opens a session on the instructions screen with a freshly drawn budget.
    pub fn new<R: Rng + ?Sized>(
        catalog: Arc<ItemCatalog>,
        rules: SpendingSorterRules,
        rng: &mut R,
    ) -> Result<Self, RulesError> {
        rules.validate()?;
        let starting_budget = rules.draw_budget(rng);

        Ok(Self {
            catalog,
            rules,
            phase: SorterPhase::Instructions,
            starting_budget,
            pending: Vec::new(),
            ledger: BucketLedger::default(),
            ignored: Vec::new(),
            score: 0,
            drawn: 0,
            next_item_id: 1,
            report: None,
        })
    }

    /// Leaves the instructions screen, playing against the budget already drawn.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SpendingSorterError> {
        if self.phase != SorterPhase::Instructions {
            return Err(SpendingSorterError::InvalidPhase {
                action: "start",
                phase: self.phase,
            });
        }
        self.start_session(self.starting_budget, rng);
        Ok(())
    }

    /// Clears every tally, records `budget`, and deals a new batch of items.
    pub fn start_session<R: Rng + ?Sized>(&mut self, budget: u32, rng: &mut R) {
        self.starting_budget = budget;
        self.ledger = BucketLedger::default();
        self.ignored.clear();
        self.score = 0;
        self.report = None;

        let mut pending = Vec::with_capacity(self.rules.batch_size);
        for _ in 0..self.rules.batch_size {
            let template = self.catalog.draw(rng);
            pending.push(SpawnedItem {
                id: ItemId(self.next_item_id),
                template,
            });
            self.next_item_id += 1;
        }
        self.drawn = pending.len();
        self.pending = pending;
        self.phase = SorterPhase::Playing;

        debug!(
            budget,
            items = self.drawn,
            "spending sorter session started"
        );
    }

    /// Drops a pending item into `bucket`.
    pub fn classify(
        &mut self,
        item_id: ItemId,
        bucket: Bucket,
    ) -> Result<Classification, SpendingSorterError> {
        if self.phase != SorterPhase::Playing {
            return Err(SpendingSorterError::InvalidPhase {
                action: "classify",
                phase: self.phase,
            });
        }

        let position = self
            .pending
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(SpendingSorterError::ItemNotPending(item_id))?;
        let item = self.pending.remove(position);

        let Some(chosen) = bucket.category() else {
            debug!(item = %item.id, name = item.template.name, "item ignored");
            self.ignored.push(item);
            return Ok(Classification::Ignored);
        };

        let true_category = item.template.category;
        let points = item.template.points;
        let tally = self.ledger.get_mut(chosen);
        tally.money = tally.money.saturating_add(item.template.cost);

        let classification = if true_category == chosen {
            tally.total_points = tally.total_points.saturating_add(points);
            self.score = self.score.saturating_add(points);
            Classification::Correct { points }
        } else {
            let penalty = self.rules.misplacement_penalty.min(self.score);
            self.score -= penalty;
            Classification::Misplaced {
                expected: true_category.bucket(),
                penalty,
            }
        };
        tally.items.push(item);

        debug!(
            item = %item_id,
            bucket = bucket.label(),
            score = self.score,
            ?classification,
            "item classified"
        );
        Ok(classification)
    }

    /// Judges the allocation once every item has been placed.
    pub fn finish(&mut self) -> Result<&AllocationReport, SpendingSorterError> {
        if self.phase != SorterPhase::Playing {
            return Err(SpendingSorterError::InvalidPhase {
                action: "finish",
                phase: self.phase,
            });
        }
        if !self.pending.is_empty() {
            return Err(SpendingSorterError::NotReady {
                pending: self.pending.len(),
            });
        }

        let report = judge_allocation(self.starting_budget, self.ledger.money(), &self.rules);
        self.phase = if report.is_success() {
            SorterPhase::Success
        } else {
            SorterPhase::Failed
        };
        info!(
            budget = self.starting_budget,
            allocated = report.total_allocated,
            score = self.score,
            verdict = ?report.verdict,
            "spending sorter finished"
        );

        let report = self.report.insert(report);
        Ok(&*report)
    }

    /// Starts over with a new budget and a new batch. Valid from any phase.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let budget = self.rules.draw_budget(rng);
        self.start_session(budget, rng);
    }

    pub fn phase(&self) -> SorterPhase {
        self.phase
    }

    pub fn starting_budget(&self) -> u32 {
        self.starting_budget
    }

    pub fn pending(&self) -> &[SpawnedItem] {
        &self.pending
    }

    pub fn ledger(&self) -> &BucketLedger {
        &self.ledger
    }

    pub fn ignored(&self) -> &[SpawnedItem] {
        &self.ignored
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Items dealt into the current session.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn report(&self) -> Option<&AllocationReport> {
        self.report.as_ref()
    }

    pub fn rules(&self) -> &SpendingSorterRules {
        &self.rules
    }

    pub fn targets(&self) -> CategoryAmounts {
        budget_targets(self.starting_budget, &self.rules.targets)
    }

    pub fn view(&self) -> SpendingSorterView {
        let buckets = Category::ordered()
            .into_iter()
            .map(|category| {
                let tally = self.ledger.get(category);
                BucketView {
                    bucket: category.bucket(),
                    label: category.label(),
                    item_count: tally.items.len(),
                    total_points: tally.total_points,
                    money: tally.money,
                    share_percent: percent_of(tally.money, self.starting_budget).round() as u32,
                    target_percent: self.rules.targets.get(category),
                }
            })
            .collect();

        SpendingSorterView {
            phase: self.phase,
            phase_label: self.phase.label(),
            starting_budget: self.starting_budget,
            targets: self.targets(),
            allocated: self.ledger.total_money(),
            unallocated: self
                .starting_budget
                .saturating_sub(self.ledger.total_money()),
            score: self.score,
            pending: self.pending.clone(),
            buckets,
            ignored_count: self.ignored.len(),
            can_finish: self.phase == SorterPhase::Playing && self.pending.is_empty(),
            report: self.report.clone(),
        }
    }
}

/// Tally for one scoring bucket as the view layer renders it.
#[derive(Debug, Clone, Serialize)]
pub struct BucketView {
    pub bucket: Bucket,
    pub label: &'static str,
    pub item_count: usize,
    pub total_points: u32,
    pub money: u32,
    /// Rounded percent of the starting budget.
    pub share_percent: u32,
    pub target_percent: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingSorterView {
    pub phase: SorterPhase,
    pub phase_label: &'static str,
    pub starting_budget: u32,
    pub targets: CategoryAmounts,
    pub allocated: u32,
    pub unallocated: u32,
    pub score: u32,
    pub pending: Vec<SpawnedItem>,
    pub buckets: Vec<BucketView>,
    pub ignored_count: usize,
    pub can_finish: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AllocationReport>,
}
