use super::domain::{Category, CategoryAmounts};
use super::rules::{AllocationTargets, SpendingSorterRules};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationVerdict {
    Success,
    Failed,
}

impl AllocationVerdict {
    pub const fn label(self) -> &'static str {
        match self {
            AllocationVerdict::Success => "Success",
            AllocationVerdict::Failed => "Failed",
        }
    }
}

/// How one category's money compares to its target share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub money: u32,
    /// Percent of the starting budget.
    pub share: f64,
    pub target: u32,
    /// Absolute distance from the target, in percentage points.
    pub deviation: f64,
    pub within_tolerance: bool,
}

/// Judgment of a finished allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    pub starting_budget: u32,
    pub total_allocated: u32,
    pub tolerance: f64,
    pub shares: Vec<CategoryShare>,
    pub overspent: bool,
    pub verdict: AllocationVerdict,
}

impl AllocationReport {
    pub fn is_success(&self) -> bool {
        self.verdict == AllocationVerdict::Success
    }

    pub fn share(&self, category: Category) -> Option<&CategoryShare> {
        self.shares.iter().find(|share| share.category == category)
    }

    pub fn summary(&self) -> String {
        if self.total_allocated == 0 {
            return "nothing was allocated".to_string();
        }
        if self.overspent {
            return format!(
                "allocated {} against a budget of {}",
                self.total_allocated, self.starting_budget
            );
        }

        let misses: Vec<String> = self
            .shares
            .iter()
            .filter(|share| !share.within_tolerance)
            .map(|share| {
                format!(
                    "{} at {:.0}% (target {}%)",
                    share.category.label().to_lowercase(),
                    share.share,
                    share.target
                )
            })
            .collect();

        if misses.is_empty() {
            "allocation is within the budget plan".to_string()
        } else {
            format!("off plan: {}", misses.join(", "))
        }
    }
}

/// Judges allocated money against the starting budget.
///
/// Shares are taken of the starting budget, not of the money allocated, and
/// any overspend fails outright.
pub fn judge_allocation(
    starting_budget: u32,
    money: CategoryAmounts,
    rules: &SpendingSorterRules,
) -> AllocationReport {
    let total_allocated = money.total();
    let overspent = total_allocated > starting_budget;

    let shares: Vec<CategoryShare> = Category::ordered()
        .into_iter()
        .map(|category| {
            let amount = money.get(category);
            let share = percent_of(amount, starting_budget);
            let target = rules.targets.get(category);
            let deviation = (share - f64::from(target)).abs();
            CategoryShare {
                category,
                money: amount,
                share,
                target,
                deviation,
                within_tolerance: deviation <= rules.tolerance,
            }
        })
        .collect();

    let on_plan = shares.iter().all(|share| share.within_tolerance);
    let verdict = if total_allocated > 0 && !overspent && on_plan {
        AllocationVerdict::Success
    } else {
        AllocationVerdict::Failed
    };

    AllocationReport {
        starting_budget,
        total_allocated,
        tolerance: rules.tolerance,
        shares,
        overspent,
        verdict,
    }
}

/// Money the player should aim for in each category, rounding half up.
/// Savings takes the remainder so the three targets add up to the budget.
pub fn budget_targets(starting_budget: u32, targets: &AllocationTargets) -> CategoryAmounts {
    let needs = rounded_portion(starting_budget, targets.needs);
    let wants = rounded_portion(starting_budget, targets.wants);
    let savings = starting_budget.saturating_sub(needs + wants);
    CategoryAmounts {
        needs,
        wants,
        savings,
    }
}

pub(crate) fn percent_of(amount: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(amount) * 100.0 / f64::from(whole)
    }
}

fn rounded_portion(amount: u32, percent: u32) -> u32 {
    let scaled = u64::from(amount) * u64::from(percent);
    ((scaled + 50) / 100) as u32
}
