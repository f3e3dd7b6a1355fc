use super::catalog::ItemTemplate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Budget category an item truly belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Needs,
    Wants,
    Savings,
}

impl Category {
    pub const fn ordered() -> [Self; 3] {
        [Self::Needs, Self::Wants, Self::Savings]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
        }
    }

    /// The bucket a correctly sorted item of this category lands in.
    pub const fn bucket(self) -> Bucket {
        match self {
            Self::Needs => Bucket::Needs,
            Self::Wants => Bucket::Wants,
            Self::Savings => Bucket::Savings,
        }
    }
}

/// Slot the player drops an item into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Needs,
    Wants,
    Savings,
    Ignore,
}

impl Bucket {
    pub const fn ordered() -> [Self; 4] {
        [Self::Needs, Self::Wants, Self::Savings, Self::Ignore]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
            Self::Ignore => "Ignore",
        }
    }

    /// Scoring category tracked by this bucket; `None` for the discard slot.
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Needs => Some(Category::Needs),
            Self::Wants => Some(Category::Wants),
            Self::Savings => Some(Category::Savings),
            Self::Ignore => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Catalog template drawn into a session with its own identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnedItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub template: ItemTemplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SorterPhase {
    Instructions,
    Playing,
    Success,
    Failed,
}

impl SorterPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instructions => "Instructions",
            Self::Playing => "Playing",
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

impl fmt::Display for SorterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of dropping one item into a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    Ignored,
    Correct { points: u32 },
    /// `penalty` is what was actually taken off; the score never drops below zero.
    Misplaced { expected: Bucket, penalty: u32 },
}

/// Running totals for one scoring bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketTally {
    pub items: Vec<SpawnedItem>,
    pub total_points: u32,
    pub money: u32,
}

/// Per-category amounts, used for allocated money and budget targets alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmounts {
    pub needs: u32,
    pub wants: u32,
    pub savings: u32,
}

impl CategoryAmounts {
    pub const fn get(&self, category: Category) -> u32 {
        match category {
            Category::Needs => self.needs,
            Category::Wants => self.wants,
            Category::Savings => self.savings,
        }
    }

    pub fn total(&self) -> u32 {
        self.needs
            .saturating_add(self.wants)
            .saturating_add(self.savings)
    }
}

/// The three scoring buckets of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BucketLedger {
    pub needs: BucketTally,
    pub wants: BucketTally,
    pub savings: BucketTally,
}

impl BucketLedger {
    pub fn get(&self, category: Category) -> &BucketTally {
        match category {
            Category::Needs => &self.needs,
            Category::Wants => &self.wants,
            Category::Savings => &self.savings,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut BucketTally {
        match category {
            Category::Needs => &mut self.needs,
            Category::Wants => &mut self.wants,
            Category::Savings => &mut self.savings,
        }
    }

    pub fn money(&self) -> CategoryAmounts {
        CategoryAmounts {
            needs: self.needs.money,
            wants: self.wants.money,
            savings: self.savings.money,
        }
    }

    pub fn total_money(&self) -> u32 {
        self.money().total()
    }

    pub fn item_count(&self) -> usize {
        self.needs.items.len() + self.wants.items.len() + self.savings.items.len()
    }
}
