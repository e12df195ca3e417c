use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::errors::ServiceError;
use super::query::StatsQuery;
use super::reshape::{reshape, Reshaped};
use super::types::StatsResponse;

/// Application service for `GET /products/by-category`.
///
/// The query executor is injected so handlers and tests share one code path.
#[derive(Clone)]
pub struct StatsService {
    query: Arc<dyn StatsQuery>,
}

impl StatsService {
    pub fn new(query: Arc<dyn StatsQuery>) -> Self { Self { query } }

    /// Run the aggregation once and bucket its rows.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::stats::{GroupedRow, StatsService, query::mock::MockStatsQuery};
    /// let query = Arc::new(MockStatsQuery::with_rows(vec![
    ///     GroupedRow::only_a("A1", 2, Some(300.0)),
    ///     GroupedRow::grand_total(2, Some(300.0)),
    /// ]));
    /// let svc = StatsService::new(query);
    /// let stats = tokio_test::block_on(svc.by_category()).unwrap();
    /// assert_eq!(stats.by_category_a.len(), 1);
    /// assert_eq!(stats.total.count, 2);
    /// ```
    #[instrument(skip(self))]
    pub async fn by_category(&self) -> Result<StatsResponse, ServiceError> {
        let rows = self.query.grouped_rows().await?;
        let row_count = rows.len();
        let Reshaped { response, discarded } = reshape(rows);
        if discarded > 0 {
            warn!(discarded, row_count, "dropped rows with unexpected grouping pattern");
        }
        debug!(
            row_count,
            a = response.by_category_a.len(),
            b = response.by_category_b.len(),
            c = response.by_category_c.len(),
            total_count = response.total.count,
            "category stats reshaped"
        );
        Ok(response)
    }
}
