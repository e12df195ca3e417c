//! Create `products` table.
//!
//! The three category columns are nullable; prices are whole cents.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(uuid(Products::Id).primary_key())
                    .col(ColumnDef::new(Products::CategoryA).string_len(64).null())
                    .col(ColumnDef::new(Products::CategoryB).string_len(64).null())
                    .col(ColumnDef::new(Products::CategoryC).string_len(64).null())
                    .col(
                        integer(Products::PriceCents)
                            .not_null()
                            .check(Expr::col(Products::PriceCents).gte(0)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Products { Table, Id, CategoryA, CategoryB, CategoryC, PriceCents }
