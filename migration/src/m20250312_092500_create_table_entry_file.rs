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
                    .table(EntryFile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntryFile::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EntryFile::Entry).uuid().not_null())
                    .col(
                        ColumnDef::new(EntryFile::Filename)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(EntryFile::OriginalName).string().not_null())
                    .col(ColumnDef::new(EntryFile::Mime).string().not_null())
                    .col(ColumnDef::new(EntryFile::Comment).text().not_null())
                    .col(ColumnDef::new(EntryFile::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entry_file-entry")
                            .from(EntryFile::Table, EntryFile::Entry)
                            .to(Entry::Table, Entry::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntryFile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EntryFile {
    Table,
    Id,
    Entry,
    Filename,
    OriginalName,
    Mime,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Entry {
    Table,
    Id,
}
