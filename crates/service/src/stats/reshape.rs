use super::grouping::GroupingSet;
use super::types::{CategoryAStat, CategoryBStat, CategoryCStat, GroupedRow, StatsResponse, TotalStat};

/// Result of [`reshape`]: the response plus how many rows matched no bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reshaped {
    pub response: StatsResponse,
    pub discarded: usize,
}

/// Distribute grouped rows into the A/B/C lists and the grand total.
///
/// Rows keep their input order within each list. A missing sum counts as
/// `0.0`. Rows whose grouping set is `Other` are dropped and counted in
/// [`Reshaped::discarded`]. With no grand-total row the total stays at zero.
pub fn reshape<I>(rows: I) -> Reshaped
where
    I: IntoIterator<Item = GroupedRow>,
{
    let mut out = Reshaped::default();
    for row in rows {
        let value = row.value.unwrap_or(0.0);
        let stats = &mut out.response;
        match row.grouping {
            GroupingSet::OnlyA => stats.by_category_a.push(CategoryAStat { category_a: row.category_a, count: row.count, value }),
            GroupingSet::OnlyB => stats.by_category_b.push(CategoryBStat { category_b: row.category_b, count: row.count, value }),
            GroupingSet::OnlyC => stats.by_category_c.push(CategoryCStat { category_c: row.category_c, count: row.count, value }),
            GroupingSet::GrandTotal => stats.total = TotalStat { count: row.count, value },
            GroupingSet::Other(_) => out.discarded += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<GroupedRow> {
        vec![
            GroupedRow::only_a("A", 10, Some(100.50)),
            GroupedRow::only_a("B", 5, Some(55.25)),
            GroupedRow::only_b("X", 20, Some(210.75)),
            GroupedRow::only_c("P", 15, Some(150.00)),
            GroupedRow::grand_total(50, Some(516.50)),
        ]
    }

    #[test]
    fn empty_input_yields_empty_lists_and_zero_total() {
        let out = reshape(Vec::new());
        assert!(out.response.by_category_a.is_empty());
        assert!(out.response.by_category_b.is_empty());
        assert!(out.response.by_category_c.is_empty());
        assert_eq!(out.response.total, TotalStat { count: 0, value: 0.0 });
        assert_eq!(out.discarded, 0);
    }

    #[test]
    fn distributes_rows_into_buckets() {
        let out = reshape(sample_rows()).response;
        assert_eq!(out.by_category_a, vec![
            CategoryAStat { category_a: Some("A".into()), count: 10, value: 100.50 },
            CategoryAStat { category_a: Some("B".into()), count: 5, value: 55.25 },
        ]);
        assert_eq!(out.by_category_b, vec![CategoryBStat { category_b: Some("X".into()), count: 20, value: 210.75 }]);
        assert_eq!(out.by_category_c, vec![CategoryCStat { category_c: Some("P".into()), count: 15, value: 150.00 }]);
        assert_eq!(out.total, TotalStat { count: 50, value: 516.50 });
    }

    #[test]
    fn one_row_per_class_gives_one_entry_per_list() {
        let rows = vec![
            GroupedRow::only_c("c", 1, Some(3.0)),
            GroupedRow::grand_total(3, Some(9.0)),
            GroupedRow::only_b("b", 1, Some(2.0)),
            GroupedRow::only_a("a", 1, Some(1.0)),
        ];
        let out = reshape(rows).response;
        assert_eq!(out.by_category_a.len(), 1);
        assert_eq!(out.by_category_b.len(), 1);
        assert_eq!(out.by_category_c.len(), 1);
        assert_eq!(out.total, TotalStat { count: 3, value: 9.0 });
    }

    #[test]
    fn same_class_rows_keep_input_order() {
        let rows = vec![
            GroupedRow::only_a("zeta", 1, Some(1.0)),
            GroupedRow::only_b("mid", 1, Some(1.0)),
            GroupedRow::only_a("alpha", 2, Some(2.0)),
            GroupedRow::only_a("mu", 3, Some(3.0)),
        ];
        let out = reshape(rows).response;
        let labels: Vec<_> = out.by_category_a.iter().map(|s| s.category_a.as_deref().unwrap()).collect();
        assert_eq!(labels, ["zeta", "alpha", "mu"]);
        assert_eq!(out.by_category_b.len(), 1);
        assert!(out.by_category_c.is_empty());
    }

    #[test]
    fn missing_sum_becomes_zero() {
        let rows = vec![
            GroupedRow::only_a("A", 0, None),
            GroupedRow::only_b("B", 0, None),
            GroupedRow::only_c("C", 0, None),
            GroupedRow::grand_total(0, None),
        ];
        let out = reshape(rows).response;
        assert_eq!(out.by_category_a[0].value, 0.0);
        assert_eq!(out.by_category_b[0].value, 0.0);
        assert_eq!(out.by_category_c[0].value, 0.0);
        assert_eq!(out.total, TotalStat { count: 0, value: 0.0 });
    }

    #[test]
    fn null_label_group_is_kept() {
        let row = GroupedRow { category_a: None, ..GroupedRow::only_a("ignored", 4, Some(8.0)) };
        let out = reshape([row]).response;
        assert_eq!(out.by_category_a, vec![CategoryAStat { category_a: None, count: 4, value: 8.0 }]);
    }

    #[test]
    fn unexpected_grouping_rows_are_dropped_and_counted() {
        let mut rows = sample_rows();
        rows.insert(1, GroupedRow {
            category_a: Some("A".into()),
            category_b: Some("X".into()),
            category_c: None,
            count: 7,
            value: Some(70.0),
            grouping: GroupingSet::Other(1),
        });
        rows.push(GroupedRow { grouping: GroupingSet::Other(0), ..GroupedRow::grand_total(99, Some(1.0)) });

        let out = reshape(rows);
        assert_eq!(out.discarded, 2);
        assert_eq!(out.response, reshape(sample_rows()).response);
    }

    #[test]
    fn grand_total_passes_through_unchanged() {
        let out = reshape([GroupedRow::grand_total(123_456, Some(98_765.43))]).response;
        assert_eq!(out.total.count, 123_456);
        assert_eq!(out.total.value, 98_765.43);
    }
}
