//! Service layer for products and their category statistics.
//! - `stats` turns the GROUPING SETS result into per-category buckets.
//! - `product_service` and `populate` wrap CRUD and seeding on top of `models`.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod pagination;
pub mod populate;
pub mod product_service;
pub mod stats;
#[cfg(test)]
pub mod test_support;
