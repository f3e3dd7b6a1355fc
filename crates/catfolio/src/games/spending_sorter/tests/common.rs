use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::games::game_rng;
use crate::games::spending_sorter::catalog::{ItemCatalog, ItemTemplate};
use crate::games::spending_sorter::domain::{Bucket, Category, ItemId};
use crate::games::spending_sorter::{
    SpendingSorterRules, SpendingSorterService, SpendingSorterSession,
};
use crate::games::GameRng;

pub(super) const SEED: u64 = 20_240_611;

pub(super) fn rng() -> GameRng {
    game_rng(Some(SEED))
}

/// One item per category with distinct costs so tallies are easy to read.
pub(super) fn tiny_catalog() -> Arc<ItemCatalog> {
    Arc::new(
        ItemCatalog::new(vec![
            ItemTemplate::new("rent", "rent", "🏠", Category::Needs, 15, 50),
            ItemTemplate::new("toys", "toys", "🧸", Category::Wants, 6, 30),
            ItemTemplate::new("piggy", "savings", "🏛️", Category::Savings, 20, 20),
        ])
        .expect("valid catalog"),
    )
}

pub(super) fn standard_catalog() -> Arc<ItemCatalog> {
    Arc::new(ItemCatalog::standard())
}

pub(super) fn playing_session(catalog: Arc<ItemCatalog>) -> (SpendingSorterSession, GameRng) {
    let mut rng = rng();
    let mut session = SpendingSorterSession::new(catalog, SpendingSorterRules::default(), &mut rng)
        .expect("default rules are valid");
    session.start(&mut rng).expect("session starts");
    (session, rng)
}

/// Pending items paired with the bucket their category maps to.
pub(super) fn correct_moves(session: &SpendingSorterSession) -> Vec<(ItemId, Bucket)> {
    session
        .pending()
        .iter()
        .map(|item| (item.id, item.template.category.bucket()))
        .collect()
}

pub(super) fn wrong_bucket(category: Category) -> Bucket {
    match category {
        Category::Needs => Bucket::Wants,
        Category::Wants => Bucket::Savings,
        Category::Savings => Bucket::Needs,
    }
}

pub(super) fn service() -> Arc<SpendingSorterService> {
    Arc::new(
        SpendingSorterService::new(standard_catalog(), SpendingSorterRules::default(), rng())
            .expect("service builds"),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}
