use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::products::{CreateProductInput, PopulateOutput, ProductView, UpdateProductInput};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductPageDoc {
    pub items: Vec<ProductView>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct CategoryAStatDoc { pub category_a: Option<String>, pub count: i64, pub value: f64 }

#[derive(ToSchema)]
pub struct CategoryBStatDoc { pub category_b: Option<String>, pub count: i64, pub value: f64 }

#[derive(ToSchema)]
pub struct CategoryCStatDoc { pub category_c: Option<String>, pub count: i64, pub value: f64 }

#[derive(ToSchema)]
pub struct TotalStatDoc { pub count: i64, pub value: f64 }

#[derive(ToSchema)]
pub struct StatsResponseDoc {
    pub by_category_a: Vec<CategoryAStatDoc>,
    pub by_category_b: Vec<CategoryBStatDoc>,
    pub by_category_c: Vec<CategoryCStatDoc>,
    pub total: TotalStatDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list_paginated,
        crate::routes::products::list_all,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::products::populate,
        crate::routes::products::by_category,
    ),
    components(
        schemas(
            HealthResponse,
            ProductView,
            ProductPageDoc,
            CreateProductInput,
            UpdateProductInput,
            PopulateOutput,
            CategoryAStatDoc,
            CategoryBStatDoc,
            CategoryCStatDoc,
            TotalStatDoc,
            StatsResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "stats")
    )
)]
pub struct ApiDoc;
