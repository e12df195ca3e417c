use std::sync::Arc;

use configs::PopulateConfig;
use sea_orm::DatabaseConnection;
use service::stats::{SeaOrmStatsQuery, StatsQuery, StatsService};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub stats: StatsService,
    pub populate: PopulateConfig,
}

impl AppState {
    /// Production wiring: stats read through the same pool.
    pub fn new(db: DatabaseConnection, populate: PopulateConfig) -> Self {
        let query: Arc<dyn StatsQuery> = Arc::new(SeaOrmStatsQuery { db: db.clone() });
        Self { db, stats: StatsService::new(query), populate }
    }

    /// Swap the stats executor, e.g. for a canned one in tests.
    pub fn with_stats_query(mut self, query: Arc<dyn StatsQuery>) -> Self {
        self.stats = StatsService::new(query);
        self
    }
}
