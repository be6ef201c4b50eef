/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShareLink::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShareLink::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShareLink::Site).uuid().not_null())
                    .col(ColumnDef::new(ShareLink::Date).date())
                    .col(
                        ColumnDef::new(ShareLink::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ShareLink::Revoked).boolean().not_null())
                    .col(ColumnDef::new(ShareLink::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-share_link-site")
                            .from(ShareLink::Table, ShareLink::Site)
                            .to(Site::Table, Site::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-share_link-site-date")
                    .table(ShareLink::Table)
                    .col(ShareLink::Site)
                    .col(ShareLink::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShareLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShareLink {
    Table,
    Id,
    Site,
    Date,
    Token,
    Revoked,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Site {
    Table,
    Id,
}
