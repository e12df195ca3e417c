//! Random product generation for demo and load data.

use std::ops::RangeInclusive;

use rand::{seq::SliceRandom, Rng};
use sea_orm::{ConnectionTrait, EntityTrait, IntoActiveModel, TransactionTrait};
use tracing::{info, instrument};

use models::product::{self, NewProduct};
use crate::errors::ServiceError;

pub const CATEGORY_A_LABELS: [&str; 5] = ["A1", "A2", "A3", "A4", "A5"];
pub const CATEGORY_B_LABELS: [&str; 4] = ["B1", "B2", "B3", "B4"];
pub const CATEGORY_C_LABELS: [&str; 3] = ["C1", "C2", "C3"];
pub const PRICE_CENTS_RANGE: RangeInclusive<i32> = 100..=100_000;

fn pick<R: Rng + ?Sized>(rng: &mut R, labels: &[&str]) -> Option<String> {
    labels.choose(rng).map(|s| (*s).to_string())
}

/// One product with labels drawn from the fixed pools.
pub fn random_product<R: Rng + ?Sized>(rng: &mut R) -> NewProduct {
    NewProduct {
        category_a: pick(rng, &CATEGORY_A_LABELS),
        category_b: pick(rng, &CATEGORY_B_LABELS),
        category_c: pick(rng, &CATEGORY_C_LABELS),
        price_cents: rng.gen_range(PRICE_CENTS_RANGE),
    }
}

/// Insert `count` random products in one transaction, `batch_size` rows per statement.
/// Returns the number of rows inserted. Inside an open transaction this nests as a savepoint.
#[instrument(skip(db))]
pub async fn populate_products<C>(db: &C, count: usize, batch_size: usize) -> Result<usize, ServiceError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if batch_size == 0 {
        return Err(ServiceError::Validation("batch_size must be >= 1".into()));
    }
    if count == 0 {
        return Ok(0);
    }

    let txn = db.begin().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let mut inserted = 0usize;
    while inserted < count {
        let n = batch_size.min(count - inserted);
        let batch: Vec<product::ActiveModel> = {
            let mut rng = rand::thread_rng();
            (0..n).map(|_| random_product(&mut rng).into_active_model()).collect()
        };
        product::Entity::insert_many(batch)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        inserted += n;
    }
    txn.commit().await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(inserted, "products populated");
    Ok(inserted)
}
