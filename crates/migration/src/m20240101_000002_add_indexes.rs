use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CATEGORY_INDEXES: [(&str, Products); 3] = [
    ("idx_products_category_a", Products::CategoryA),
    ("idx_products_category_b", Products::CategoryB),
    ("idx_products_category_c", Products::CategoryC),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One index per grouped dimension
        for (name, col) in CATEGORY_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Products::Table)
                        .col(col)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        // Price sorting on the paginated listing
        manager
            .create_index(
                Index::create()
                    .name("idx_products_price_cents")
                    .table(Products::Table)
                    .col(Products::PriceCents)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in CATEGORY_INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Products::Table).to_owned())
                .await?;
        }
        manager
            .drop_index(Index::drop().name("idx_products_price_cents").table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Products { Table, CategoryA, CategoryB, CategoryC, PriceCents }
