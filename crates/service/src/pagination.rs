//! Pagination and sorting utilities for service layer
//!
//! `Pagination` normalizes page inputs, `SortSpec` parses `column[,direction]`
//! and `Page` is what a paginated listing returns.

use std::str::FromStr;

use serde::Serialize;

use crate::errors::ServiceError;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of a listing plus the totals needed to render navigation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    CategoryA,
    CategoryB,
    CategoryC,
    PriceCents,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Parsed `sort` query parameter, e.g. `price_cents,desc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl FromStr for SortSpec {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',').map(str::trim);
        let column = match parts.next().unwrap_or_default() {
            "id" => SortColumn::Id,
            "category_a" | "categoryA" => SortColumn::CategoryA,
            "category_b" | "categoryB" => SortColumn::CategoryB,
            "category_c" | "categoryC" => SortColumn::CategoryC,
            "price_cents" | "priceCents" => SortColumn::PriceCents,
            other => return Err(ServiceError::Validation(format!("unknown sort column: {other:?}"))),
        };
        let direction = match parts.next() {
            None | Some("") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(d) => return Err(ServiceError::Validation(format!("unknown sort direction: {d:?}"))),
        };
        Ok(Self { column, direction })
    }
}
