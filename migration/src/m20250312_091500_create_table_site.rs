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
                    .table(Site::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Site::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Site::Customer).uuid().not_null())
                    .col(ColumnDef::new(Site::Name).string().not_null())
                    .col(ColumnDef::new(Site::JobNumber).string().not_null())
                    .col(ColumnDef::new(Site::Latitude).double())
                    .col(ColumnDef::new(Site::Longitude).double())
                    .col(ColumnDef::new(Site::Address).text().not_null())
                    .col(ColumnDef::new(Site::Category).string().not_null())
                    .col(ColumnDef::new(Site::Status).string().not_null())
                    .col(ColumnDef::new(Site::Notes).text().not_null())
                    .col(ColumnDef::new(Site::Deleted).boolean().not_null())
                    .col(ColumnDef::new(Site::DeletedAt).date_time())
                    .col(ColumnDef::new(Site::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Site::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-site-customer")
                            .from(Site::Table, Site::Customer)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-site-created_by")
                            .from(Site::Table, Site::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Site::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Site {
    Table,
    Id,
    Customer,
    Name,
    JobNumber,
    Latitude,
    Longitude,
    Address,
    Category,
    Status,
    Notes,
    Deleted,
    DeletedAt,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
