use super::domain::Category;
use crate::games::RulesError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Target share of the starting budget for each category, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTargets {
    pub needs: u32,
    pub wants: u32,
    pub savings: u32,
}

impl AllocationTargets {
    pub const fn get(&self, category: Category) -> u32 {
        match category {
            Category::Needs => self.needs,
            Category::Wants => self.wants,
            Category::Savings => self.savings,
        }
    }
}

impl Default for AllocationTargets {
    fn default() -> Self {
        Self {
            needs: 50,
            wants: 30,
            savings: 20,
        }
    }
}

/// Tunables for the Spending Sorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSorterRules {
    pub batch_size: usize,
    pub min_budget: u32,
    pub max_budget: u32,
    pub budget_step: u32,
    pub targets: AllocationTargets,
    /// Allowed distance from each target, in percentage points.
    pub tolerance: f64,
    pub misplacement_penalty: u32,
}

impl Default for SpendingSorterRules {
    fn default() -> Self {
        Self {
            batch_size: 10,
            min_budget: 100,
            max_budget: 1000,
            budget_step: 10,
            targets: AllocationTargets::default(),
            tolerance: 15.0,
            misplacement_penalty: 5,
        }
    }
}

impl SpendingSorterRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.batch_size == 0 {
            return Err(RulesError::Zero {
                field: "batch_size",
            });
        }
        if self.budget_step == 0 {
            return Err(RulesError::Zero {
                field: "budget_step",
            });
        }
        if self.min_budget == 0 {
            return Err(RulesError::Zero {
                field: "min_budget",
            });
        }
        if self.min_budget > self.max_budget
            || self.min_budget % self.budget_step != 0
            || (self.max_budget - self.min_budget) % self.budget_step != 0
        {
            return Err(RulesError::BudgetRange {
                min: self.min_budget,
                max: self.max_budget,
                step: self.budget_step,
            });
        }

        let sum = self
            .targets
            .needs
            .checked_add(self.targets.wants)
            .and_then(|sum| sum.checked_add(self.targets.savings))
            .unwrap_or(u32::MAX);
        if sum != 100 {
            return Err(RulesError::TargetsSum(sum));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(RulesError::Tolerance);
        }

        Ok(())
    }

    /// Uniform draw over every step of the budget range, bounds included.
    /// Rules that never passed [`validate`](Self::validate) collapse to
    /// `min_budget` rather than panicking.
    pub fn draw_budget<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let step = self.budget_step.max(1);
        let steps = self.max_budget.saturating_sub(self.min_budget) / step;
        self.min_budget + rng.gen_range(0..=steps) * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::game_rng;

    #[test]
    fn default_rules_are_valid() {
        assert_eq!(SpendingSorterRules::default().validate(), Ok(()));
    }

    #[test]
    fn budgets_are_multiples_of_ten_within_range() {
        let rules = SpendingSorterRules::default();
        let mut rng = game_rng(Some(5));
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..5_000 {
            let budget = rules.draw_budget(&mut rng);
            assert!((100..=1000).contains(&budget));
            assert_eq!(budget % 10, 0);
            saw_min |= budget == 100;
            saw_max |= budget == 1000;
        }
        assert!(saw_min && saw_max, "both range bounds should be reachable");
    }

    #[test]
    fn rejects_targets_that_do_not_sum_to_one_hundred() {
        let rules = SpendingSorterRules {
            targets: AllocationTargets {
                needs: 50,
                wants: 30,
                savings: 30,
            },
            ..SpendingSorterRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::TargetsSum(110)));
    }

    #[test]
    fn overflowing_targets_are_rejected() {
        let rules = SpendingSorterRules {
            targets: AllocationTargets {
                needs: u32::MAX,
                wants: 1,
                savings: 0,
            },
            ..SpendingSorterRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::TargetsSum(u32::MAX)));
    }

    #[test]
    fn unvalidated_budget_range_draws_the_minimum() {
        let rules = SpendingSorterRules {
            min_budget: 500,
            max_budget: 100,
            budget_step: 0,
            ..SpendingSorterRules::default()
        };
        let mut rng = game_rng(Some(9));
        for _ in 0..10 {
            assert_eq!(rules.draw_budget(&mut rng), 500);
        }
    }

    #[test]
    fn rejects_misaligned_budget_range() {
        let rules = SpendingSorterRules {
            min_budget: 105,
            ..SpendingSorterRules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(RulesError::BudgetRange { min: 105, .. })
        ));

        let rules = SpendingSorterRules {
            batch_size: 0,
            ..SpendingSorterRules::default()
        };
        assert_eq!(
            rules.validate(),
            Err(RulesError::Zero {
                field: "batch_size"
            })
        );
    }
}
