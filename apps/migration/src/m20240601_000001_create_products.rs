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
                    .col(pk_uuid(Products::Id))
                    .col(uuid(Products::OwnerId))
                    .col(string(Products::OwnerName))
                    .col(string_null(Products::OwnerAvatar))
                    .col(string(Products::Title))
                    .col(text(Products::Description))
                    .col(double(Products::Price))
                    .col(
                        timestamp_with_time_zone(Products::StartDate)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Products::EndDate))
                    .col(string_null(Products::ProductImage))
                    // Bids, likes and comments live inside the product row
                    .col(json_binary(Products::Bids).default(Expr::cust("'[]'::jsonb")))
                    .col(json_binary(Products::Likes).default(Expr::cust("'[]'::jsonb")))
                    .col(json_binary(Products::Comments).default(Expr::cust("'[]'::jsonb")))
                    .col(big_integer(Products::Revision).default(1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_start_date")
                    .table(Products::Table)
                    .col(Products::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_owner_id")
                    .table(Products::Table)
                    .col(Products::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    OwnerId,
    OwnerName,
    OwnerAvatar,
    Title,
    Description,
    Price,
    StartDate,
    EndDate,
    ProductImage,
    Bids,
    Likes,
    Comments,
    Revision,
}
