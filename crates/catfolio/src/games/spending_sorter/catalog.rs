use super::domain::Category;
use crate::games::CatalogError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// Immutable purchase template. Price tiers of the same thing are separate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: Category,
    pub points: u32,
    pub cost: u32,
}

impl ItemTemplate {
    pub const fn new(
        key: &'static str,
        name: &'static str,
        icon: &'static str,
        category: Category,
        points: u32,
        cost: u32,
    ) -> Self {
        Self {
            key,
            name,
            icon,
            category,
            points,
            cost,
        }
    }
}

const STANDARD_ITEMS: [ItemTemplate; 28] = [
    ItemTemplate::new("food_low", "food", "🐟", Category::Needs, 10, 30),
    ItemTemplate::new("food_med", "food", "🐟", Category::Needs, 10, 50),
    ItemTemplate::new("food_high", "food", "🐟", Category::Needs, 10, 70),
    ItemTemplate::new("rent_low", "rent", "🏠", Category::Needs, 15, 300),
    ItemTemplate::new("rent_med", "rent", "🏠", Category::Needs, 15, 500),
    ItemTemplate::new("rent_high", "rent", "🏠", Category::Needs, 15, 700),
    ItemTemplate::new("medicine_low", "medicine", "💊", Category::Needs, 12, 40),
    ItemTemplate::new("medicine_high", "medicine", "💊", Category::Needs, 12, 80),
    ItemTemplate::new("utilities", "utilities", "💡", Category::Needs, 12, 60),
    ItemTemplate::new("transport", "transport", "🚗", Category::Needs, 10, 100),
    ItemTemplate::new("insurance", "insurance", "🛡️", Category::Needs, 13, 90),
    ItemTemplate::new("games_low", "games", "🎮", Category::Wants, 8, 30),
    ItemTemplate::new("games_high", "games", "🎮", Category::Wants, 8, 60),
    ItemTemplate::new("toys_low", "toys", "🧸", Category::Wants, 6, 20),
    ItemTemplate::new("toys_high", "toys", "🧸", Category::Wants, 6, 40),
    ItemTemplate::new("treats_low", "treats", "🍪", Category::Wants, 5, 10),
    ItemTemplate::new("treats_high", "treats", "🍪", Category::Wants, 5, 25),
    ItemTemplate::new("movies", "movies", "🎬", Category::Wants, 6, 35),
    ItemTemplate::new("dining", "dining", "🍕", Category::Wants, 7, 45),
    ItemTemplate::new("clothes_low", "clothes", "👕", Category::Wants, 7, 50),
    ItemTemplate::new("clothes_high", "clothes", "👕", Category::Wants, 7, 100),
    ItemTemplate::new("vacation", "vacation", "✈️", Category::Wants, 9, 150),
    ItemTemplate::new("savings_low", "savings", "🏛️", Category::Savings, 20, 50),
    ItemTemplate::new("savings_med", "savings", "🏛️", Category::Savings, 20, 100),
    ItemTemplate::new("savings_high", "savings", "🏛️", Category::Savings, 20, 150),
    ItemTemplate::new("emergency_low", "emergency", "🆘", Category::Savings, 25, 100),
    ItemTemplate::new("emergency_high", "emergency", "🆘", Category::Savings, 25, 200),
    ItemTemplate::new("investment", "investment", "📈", Category::Savings, 22, 120),
];

/// Read-only pool the sorter draws from.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<ItemTemplate>,
}

impl ItemCatalog {
    pub fn standard() -> Self {
        Self {
            items: STANDARD_ITEMS.to_vec(),
        }
    }

    pub fn new(items: Vec<ItemTemplate>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.key) {
                return Err(CatalogError::Duplicate(item.key.to_string()));
            }
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[ItemTemplate] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ItemTemplate> + '_ {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Uniform draw with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ItemTemplate {
        // Construction guarantees at least one entry.
        *self
            .items
            .choose(rng)
            .unwrap_or(&self.items[0])
    }
}
