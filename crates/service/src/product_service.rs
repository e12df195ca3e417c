use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ItemsAndPagesNumber, Order, PaginatorTrait, QueryOrder, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;

use models::product::{self, NewProduct};
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination, SortColumn, SortDirection, SortSpec};

/// Partial update; `None` leaves a field untouched, `Some(None)` clears a category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductChanges {
    pub category_a: Option<Option<String>>,
    pub category_b: Option<Option<String>>,
    pub category_c: Option<Option<String>>,
    pub price_cents: Option<i32>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Create a product.
#[instrument(skip(db))]
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model, ServiceError> {
    let created = product::create(db, new).await?;
    info!(id = %created.id, "product created");
    Ok(created)
}

/// Get product by id.
pub async fn get_product(db: &DatabaseConnection, id: Uuid) -> Result<Option<product::Model>, ServiceError> {
    product::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Update product fields.
#[instrument(skip(db))]
pub async fn update_product(db: &DatabaseConnection, id: Uuid, changes: ProductChanges) -> Result<product::Model, ServiceError> {
    if let Some(a) = &changes.category_a { product::validate_category("category_a", a.as_deref())?; }
    if let Some(b) = &changes.category_b { product::validate_category("category_b", b.as_deref())?; }
    if let Some(c) = &changes.category_c { product::validate_category("category_c", c.as_deref())?; }
    if let Some(p) = changes.price_cents { product::validate_price_cents(p)?; }

    let existing = product::Entity::find_by_id(id)
        .one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("product"))?;
    if changes.is_empty() {
        return Ok(existing);
    }

    let mut am: product::ActiveModel = existing.into();
    if let Some(a) = changes.category_a { am.category_a = Set(a); }
    if let Some(b) = changes.category_b { am.category_b = Set(b); }
    if let Some(c) = changes.category_c { am.category_c = Set(c); }
    if let Some(p) = changes.price_cents { am.price_cents = Set(p); }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a product; returns true if deleted.
pub async fn delete_product(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = product::Entity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// List every product.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

fn sort_column(column: SortColumn) -> product::Column {
    match column {
        SortColumn::Id => product::Column::Id,
        SortColumn::CategoryA => product::Column::CategoryA,
        SortColumn::CategoryB => product::Column::CategoryB,
        SortColumn::CategoryC => product::Column::CategoryC,
        SortColumn::PriceCents => product::Column::PriceCents,
    }
}

/// List products with pagination and an optional sort; ties break on id.
pub async fn list_products_paginated(
    db: &DatabaseConnection,
    opts: Pagination,
    sort: Option<SortSpec>,
) -> Result<Page<product::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let mut select = product::Entity::find();
    if let Some(s) = sort {
        let order = match s.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        select = select.order_by(sort_column(s.column), order);
    }
    select = select.order_by_asc(product::Column::Id);

    let paginator = select.paginate(db, per_page);
    let ItemsAndPagesNumber { number_of_items, number_of_pages } = paginator
        .num_items_and_pages()
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let items = paginator
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(Page { items, page: page_idx + 1, per_page, total_items: number_of_items, total_pages: number_of_pages })
}
