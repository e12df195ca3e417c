/// Bit set by `GROUPING(category_a, category_b, category_c)` when `category_a` is rolled up.
pub const ROLLED_UP_A: i32 = 0b100;
/// Bit for `category_b`.
pub const ROLLED_UP_B: i32 = 0b010;
/// Bit for `category_c`.
pub const ROLLED_UP_C: i32 = 0b001;

const ONLY_A: i32 = ROLLED_UP_B | ROLLED_UP_C;
const ONLY_B: i32 = ROLLED_UP_A | ROLLED_UP_C;
const ONLY_C: i32 = ROLLED_UP_A | ROLLED_UP_B;
const GRAND_TOTAL: i32 = ROLLED_UP_A | ROLLED_UP_B | ROLLED_UP_C;

/// The grouping set a result row came from.
///
/// Decoded once from the raw grouping id at the repository boundary; anything
/// that is not one of the four sets in the query is kept as `Other` so the
/// caller can count it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupingSet {
    /// `(category_a)`: only A held fixed.
    OnlyA,
    /// `(category_b)`
    OnlyB,
    /// `(category_c)`
    OnlyC,
    /// `()`: every column rolled up.
    GrandTotal,
    Other(i32),
}

impl GroupingSet {
    pub fn from_grouping_id(id: i32) -> Self {
        match id {
            ONLY_A => GroupingSet::OnlyA,
            ONLY_B => GroupingSet::OnlyB,
            ONLY_C => GroupingSet::OnlyC,
            GRAND_TOTAL => GroupingSet::GrandTotal,
            other => GroupingSet::Other(other),
        }
    }

    pub fn grouping_id(self) -> i32 {
        match self {
            GroupingSet::OnlyA => ONLY_A,
            GroupingSet::OnlyB => ONLY_B,
            GroupingSet::OnlyC => ONLY_C,
            GroupingSet::GrandTotal => GRAND_TOTAL,
            GroupingSet::Other(raw) => raw,
        }
    }
}

impl From<i32> for GroupingSet {
    fn from(id: i32) -> Self {
        Self::from_grouping_id(id)
    }
}
