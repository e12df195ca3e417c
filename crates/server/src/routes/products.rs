use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use models::product::{self, cents_from_price, NewProduct};
use service::{
    pagination::{Page, Pagination, SortSpec},
    populate::populate_products,
    product_service::{self, ProductChanges},
    stats::StatsResponse,
};

use crate::{errors::JsonApiError, state::AppState};

/// A product as returned over HTTP; `price` is derived from `price_cents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProductView {
    pub id: Uuid,
    pub category_a: Option<String>,
    pub category_b: Option<String>,
    pub category_c: Option<String>,
    pub price_cents: i32,
    pub price: f64,
}

impl From<product::Model> for ProductView {
    fn from(m: product::Model) -> Self {
        let price = m.price();
        Self {
            id: m.id,
            category_a: m.category_a,
            category_b: m.category_b,
            category_c: m.category_c,
            price_cents: m.price_cents,
            price,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Page size, clamped to 1..=100 (default 20); `size` is accepted too
    #[serde(alias = "size")]
    pub per_page: Option<u32>,
    /// `column[,asc|desc]`
    pub sort: Option<String>,
}

/// Body of `POST /products`; give the price either in cents or in dollars.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateProductInput {
    #[serde(default)]
    pub category_a: Option<String>,
    #[serde(default)]
    pub category_b: Option<String>,
    #[serde(default)]
    pub category_c: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i32>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Body of `PUT /products/{id}`; absent fields stay as they are, `null` clears a category.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateProductInput {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category_a: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category_b: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category_c: Option<Option<String>>,
    #[serde(default)]
    pub price_cents: Option<i32>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PopulateOutput {
    pub inserted: usize,
}

// Distinguishes an explicit `null` from a missing field.
fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// `price_cents` wins when both are given.
fn resolve_price(price_cents: Option<i32>, price: Option<f64>) -> Result<Option<i32>, JsonApiError> {
    match (price_cents, price) {
        (Some(cents), _) => Ok(Some(cents)),
        (None, Some(p)) => cents_from_price(p)
            .map(Some)
            .map_err(|e| JsonApiError::bad_request(e.to_string())),
        (None, None) => Ok(None),
    }
}

impl CreateProductInput {
    pub fn into_new_product(self) -> Result<NewProduct, JsonApiError> {
        let price_cents = resolve_price(self.price_cents, self.price)?
            .ok_or_else(|| JsonApiError::bad_request("one of price_cents or price is required"))?;
        Ok(NewProduct {
            category_a: self.category_a,
            category_b: self.category_b,
            category_c: self.category_c,
            price_cents,
        })
    }
}

impl UpdateProductInput {
    pub fn into_changes(self) -> Result<ProductChanges, JsonApiError> {
        Ok(ProductChanges {
            category_a: self.category_a,
            category_b: self.category_b,
            category_c: self.category_c,
            price_cents: resolve_price(self.price_cents, self.price)?,
        })
    }
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of products", body = crate::openapi::ProductPageDoc),
        (status = 400, description = "Invalid sort"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list_paginated(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<ProductView>>, JsonApiError> {
    let sort = match q.sort.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.parse::<SortSpec>()?),
        _ => None,
    };
    let defaults = Pagination::default();
    let pagination = Pagination {
        page: q.page.unwrap_or(defaults.page),
        per_page: q.per_page.unwrap_or(defaults.per_page),
    };
    let page = product_service::list_products_paginated(&state.db, pagination, sort).await?;
    info!(page = page.page, items = page.items.len(), total = page.total_items, "list products");
    Ok(Json(page.map(ProductView::from)))
}

#[utoipa::path(
    get, path = "/products/all", tag = "products",
    responses(
        (status = 200, description = "Every product", body = [ProductView]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    let list = product_service::list_products(&state.db).await?;
    info!(count = list.len(), "list all products");
    Ok(Json(list.into_iter().map(ProductView::from).collect()))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = CreateProductInput,
    responses(
        (status = 201, description = "Created", body = ProductView),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<ProductView>), JsonApiError> {
    let new = input.into_new_product()?;
    let created = product_service::create_product(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Found", body = ProductView),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ProductView>, JsonApiError> {
    product_service::get_product(&state.db, id)
        .await?
        .map(|m| Json(m.into()))
        .ok_or_else(|| JsonApiError::not_found(format!("product {} not found", id)))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductInput,
    responses(
        (status = 200, description = "Updated", body = ProductView),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<ProductView>, JsonApiError> {
    let changes = input.into_changes()?;
    let updated = product_service::update_product(&state.db, id, changes).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    if product_service::delete_product(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found(format!("product {} not found", id)))
    }
}

#[utoipa::path(
    post, path = "/products/populate", tag = "products",
    responses(
        (status = 200, description = "Random products inserted", body = PopulateOutput),
        (status = 500, description = "Populate Failed")
    )
)]
pub async fn populate(State(state): State<AppState>) -> Result<Json<PopulateOutput>, JsonApiError> {
    let cfg = &state.populate;
    match populate_products(&state.db, cfg.count, cfg.batch_size).await {
        Ok(inserted) => Ok(Json(PopulateOutput { inserted })),
        Err(e) => {
            warn!(err = %e, count = cfg.count, "populate failed");
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get, path = "/products/by-category", tag = "stats",
    responses(
        (status = 200, description = "Per-category counts and sums plus the grand total", body = crate::openapi::StatsResponseDoc),
        (status = 500, description = "Aggregation Failed")
    )
)]
pub async fn by_category(State(state): State<AppState>) -> Result<Json<StatsResponse>, JsonApiError> {
    let stats = state.stats.by_category().await?;
    Ok(Json(stats))
}
