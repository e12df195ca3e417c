use crate::product::{self, NewProduct};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use anyhow::Result;
use uuid::Uuid;

use super::setup_test_db;

/// Create, read, update and delete a single product
#[tokio::test]
async fn test_product_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let marker = format!("crud_{}", Uuid::new_v4().simple());
    let created = product::create(&db, NewProduct {
        category_a: Some(marker.clone()),
        category_b: Some("B1".into()),
        category_c: None,
        price_cents: 1999,
    }).await?;
    assert_eq!(created.category_a.as_deref(), Some(marker.as_str()));
    assert_eq!(created.price(), 19.99);

    let found = product::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let by_marker = product::Entity::find()
        .filter(product::Column::CategoryA.eq(marker.clone()))
        .all(&db)
        .await?;
    assert_eq!(by_marker.len(), 1);

    let mut am: product::ActiveModel = created.clone().into();
    am.price_cents = Set(2500);
    am.category_c = Set(Some("C9".into()));
    let updated = am.update(&db).await?;
    assert_eq!(updated.price_cents, 2500);
    assert_eq!(updated.category_c.as_deref(), Some("C9"));

    product::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(product::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Validation runs before anything reaches the database
#[tokio::test]
async fn test_create_rejects_invalid_product() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let res = product::create(&db, NewProduct { price_cents: -1, ..NewProduct::default() }).await;
    assert!(matches!(res, Err(crate::errors::ModelError::Validation(_))));
    Ok(())
}
