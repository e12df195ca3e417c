use serde::{Deserialize, Serialize};

use super::grouping::GroupingSet;

/// One decoded row of the GROUPING SETS query.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedRow {
    pub category_a: Option<String>,
    pub category_b: Option<String>,
    pub category_c: Option<String>,
    pub count: i64,
    /// `SUM(price_cents)`; absent when no product matched.
    pub value: Option<f64>,
    pub grouping: GroupingSet,
}

impl GroupedRow {
    pub fn only_a(label: impl Into<String>, count: i64, value: Option<f64>) -> Self {
        Self { category_a: Some(label.into()), category_b: None, category_c: None, count, value, grouping: GroupingSet::OnlyA }
    }

    pub fn only_b(label: impl Into<String>, count: i64, value: Option<f64>) -> Self {
        Self { category_a: None, category_b: Some(label.into()), category_c: None, count, value, grouping: GroupingSet::OnlyB }
    }

    pub fn only_c(label: impl Into<String>, count: i64, value: Option<f64>) -> Self {
        Self { category_a: None, category_b: None, category_c: Some(label.into()), count, value, grouping: GroupingSet::OnlyC }
    }

    pub fn grand_total(count: i64, value: Option<f64>) -> Self {
        Self { category_a: None, category_b: None, category_c: None, count, value, grouping: GroupingSet::GrandTotal }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAStat {
    pub category_a: Option<String>,
    pub count: i64,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBStat {
    pub category_b: Option<String>,
    pub count: i64,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCStat {
    pub category_c: Option<String>,
    pub count: i64,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalStat {
    pub count: i64,
    pub value: f64,
}

/// Body of `GET /products/by-category`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub by_category_a: Vec<CategoryAStat>,
    pub by_category_b: Vec<CategoryBStat>,
    pub by_category_c: Vec<CategoryCStat>,
    pub total: TotalStat,
}
