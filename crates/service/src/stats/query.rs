use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use tracing::debug;

use crate::errors::ServiceError;
use super::grouping::GroupingSet;
use super::types::GroupedRow;

/// Per-category counts and price sums plus the grand total, in one pass.
///
/// `GROUPING(...)` is aliased `grouping_id`; see [`GroupingSet`] for the bit
/// layout. The `ORDER BY` makes list order deterministic: sets in id order,
/// labels ascending with the null group last.
pub const GROUPING_SETS_SQL: &str = r#"
SELECT
    category_a,
    category_b,
    category_c,
    COUNT(*) AS count,
    CAST(SUM(price_cents) AS DOUBLE PRECISION) AS value,
    GROUPING(category_a, category_b, category_c) AS grouping_id
FROM products
GROUP BY GROUPING SETS (
    (category_a),
    (category_b),
    (category_c),
    ()
)
ORDER BY grouping_id, category_a, category_b, category_c
"#;

/// Executes the aggregation query.
#[async_trait]
pub trait StatsQuery: Send + Sync {
    async fn grouped_rows(&self) -> Result<Vec<GroupedRow>, ServiceError>;
}

/// Row shape returned by [`GROUPING_SETS_SQL`] before decoding.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct GroupingSetRecord {
    pub category_a: Option<String>,
    pub category_b: Option<String>,
    pub category_c: Option<String>,
    pub count: i64,
    pub value: Option<f64>,
    pub grouping_id: i32,
}

impl From<GroupingSetRecord> for GroupedRow {
    fn from(r: GroupingSetRecord) -> Self {
        Self {
            category_a: r.category_a,
            category_b: r.category_b,
            category_c: r.category_c,
            count: r.count,
            value: r.value,
            grouping: GroupingSet::from_grouping_id(r.grouping_id),
        }
    }
}

/// SeaORM-backed query executor.
pub struct SeaOrmStatsQuery {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StatsQuery for SeaOrmStatsQuery {
    async fn grouped_rows(&self) -> Result<Vec<GroupedRow>, ServiceError> {
        let stmt = Statement::from_string(DatabaseBackend::Postgres, GROUPING_SETS_SQL);
        let records = GroupingSetRecord::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        debug!(rows = records.len(), "grouping sets query returned");
        Ok(records.into_iter().map(GroupedRow::from).collect())
    }
}

/// Canned executor for tests and examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct MockStatsQuery {
        rows: Vec<GroupedRow>,
        failure: Option<String>,
        calls: AtomicUsize,
    }

    impl MockStatsQuery {
        pub fn with_rows(rows: Vec<GroupedRow>) -> Self {
            Self { rows, ..Self::default() }
        }

        /// Every call fails with `ServiceError::Db(message)`.
        pub fn failing(message: impl Into<String>) -> Self {
            Self { failure: Some(message.into()), ..Self::default() }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatsQuery for MockStatsQuery {
        async fn grouped_rows(&self) -> Result<Vec<GroupedRow>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(self.rows.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, Value};
    use std::collections::BTreeMap;

    fn record(a: Option<&str>, b: Option<&str>, c: Option<&str>, count: i64, value: Option<f64>, grouping_id: i32) -> BTreeMap<&'static str, Value> {
        let columns: [(&'static str, Value); 6] = [
            ("category_a", a.map(str::to_owned).into()),
            ("category_b", b.map(str::to_owned).into()),
            ("category_c", c.map(str::to_owned).into()),
            ("count", count.into()),
            ("value", value.into()),
            ("grouping_id", grouping_id.into()),
        ];
        BTreeMap::from(columns)
    }

    #[tokio::test]
    async fn decodes_records_from_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                record(Some("A1"), None, None, 2, Some(300.0), 3),
                record(None, Some("B1"), None, 2, Some(300.0), 5),
                record(None, None, Some("C1"), 2, Some(300.0), 6),
                record(None, None, None, 2, Some(300.0), 7),
            ]])
            .into_connection();
        let query = SeaOrmStatsQuery { db };

        let rows = query.grouped_rows().await.unwrap();
        let sets: Vec<_> = rows.iter().map(|r| r.grouping).collect();
        assert_eq!(sets, [GroupingSet::OnlyA, GroupingSet::OnlyB, GroupingSet::OnlyC, GroupingSet::GrandTotal]);
        assert_eq!(rows[0].category_a.as_deref(), Some("A1"));
        assert_eq!(rows[3].count, 2);
        assert_eq!(rows[3].value, Some(300.0));
    }

    #[tokio::test]
    async fn empty_table_total_has_null_sum() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![record(None, None, None, 0, None, 7)]])
            .into_connection();
        let rows = SeaOrmStatsQuery { db }.grouped_rows().await.unwrap();
        assert_eq!(rows, vec![GroupedRow::grand_total(0, None)]);
    }

    #[tokio::test]
    async fn query_errors_surface_as_db_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("relation \"products\" does not exist".into())])
            .into_connection();
        let err = SeaOrmStatsQuery { db }.grouped_rows().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(msg) if msg.contains("products")));
    }

    #[test]
    fn sql_uses_the_four_grouping_sets() {
        let sql = GROUPING_SETS_SQL.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(sql.contains("GROUPING SETS ( (category_a), (category_b), (category_c), () )"));
        assert!(sql.contains("GROUPING(category_a, category_b, category_c) AS grouping_id"));
    }

    #[tokio::test]
    async fn mock_counts_calls() {
        let q = mock::MockStatsQuery::with_rows(vec![GroupedRow::grand_total(1, Some(1.0))]);
        assert_eq!(q.grouped_rows().await.unwrap().len(), 1);
        assert_eq!(q.grouped_rows().await.unwrap().len(), 1);
        assert_eq!(q.calls(), 2);
    }
}
