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
                    .table(Entry::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Entry::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Entry::Site).uuid().not_null())
                    .col(
                        ColumnDef::new(Entry::EntryType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Entry::Note).text().not_null())
                    .col(ColumnDef::new(Entry::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Entry::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entry-site")
                            .from(Entry::Table, Entry::Site)
                            .to(Site::Table, Site::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entry-created_by")
                            .from(Entry::Table, Entry::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-entry-site-created_at")
                    .table(Entry::Table)
                    .col(Entry::Site)
                    .col(Entry::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Entry {
    Table,
    Id,
    Site,
    EntryType,
    Note,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Site {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
