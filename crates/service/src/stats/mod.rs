//! Category statistics built from one GROUPING SETS query.
//!
//! The query yields rows for `(category_a)`, `(category_b)`, `(category_c)` and
//! the empty set `()`. [`query`] runs it and decodes each row's grouping id into
//! a [`GroupingSet`]; [`reshape`] buckets the rows into a [`StatsResponse`];
//! [`service::StatsService`] ties the two together per request.

pub mod grouping;
pub mod query;
pub mod reshape;
pub mod service;
pub mod types;

pub use grouping::GroupingSet;
pub use query::{SeaOrmStatsQuery, StatsQuery};
pub use reshape::{reshape, Reshaped};
pub use service::StatsService;
pub use types::{CategoryAStat, CategoryBStat, CategoryCStat, GroupedRow, StatsResponse, TotalStat};
