//! Spending Sorter: sort a randomized pile of purchases into needs, wants, and
//! savings, then judge the split against the 50/30/20 plan.

pub mod catalog;
pub mod domain;
pub mod outcome;
pub mod router;
mod rules;
pub mod service;
mod session;

#[cfg(test)]
mod tests;

pub use catalog::{ItemCatalog, ItemTemplate};
pub use domain::{
    Bucket, BucketLedger, BucketTally, Category, CategoryAmounts, Classification, ItemId,
    SorterPhase, SpawnedItem,
};
pub use outcome::{budget_targets, judge_allocation, AllocationReport, AllocationVerdict, CategoryShare};
pub use router::spending_sorter_router;
pub use rules::{AllocationTargets, SpendingSorterRules};
pub use service::{ClassificationReceipt, SpendingSorterService, SpendingSorterServiceError};
pub use session::{BucketView, SpendingSorterError, SpendingSorterSession, SpendingSorterView};
