use catfolio::config::GameConfig;
use catfolio::games::scam_cat::{PromptCatalog, ScamCatService};
use catfolio::games::spending_sorter::{ItemCatalog, SpendingSorterService};
use catfolio::games::{fork_rng, game_rng};
use catfolio::settings::SettingsStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engines and stores the routes are built on.
#[derive(Clone)]
pub(crate) struct GameServices {
    pub(crate) spending_sorter: Arc<SpendingSorterService>,
    pub(crate) scam_cat: Arc<ScamCatService>,
    pub(crate) settings: Arc<dyn SettingsStore>,
}

impl GameServices {
    /// Builds both engines from one root generator so a configured seed
    /// reproduces every session.
    pub(crate) fn new(
        config: &GameConfig,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self, catfolio::games::RulesError> {
        let mut root = game_rng(config.seed);

        let spending_sorter = SpendingSorterService::new(
            Arc::new(ItemCatalog::standard()),
            config.spending_sorter.clone(),
            fork_rng(&mut root),
        )?
        .with_policy(config.sessions)?;
        let scam_cat = ScamCatService::new(
            Arc::new(PromptCatalog::standard()),
            config.scam_cat.clone(),
            fork_rng(&mut root),
        )?
        .with_policy(config.sessions)?;

        Ok(Self {
            spending_sorter: Arc::new(spending_sorter),
            scam_cat: Arc::new(scam_cat),
            settings,
        })
    }
}
