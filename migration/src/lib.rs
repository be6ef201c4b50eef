/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20250312_090000_create_table_user;
mod m20250312_090500_create_table_api;
mod m20250312_091000_create_table_customer;
mod m20250312_091500_create_table_site;
mod m20250312_092000_create_table_entry;
mod m20250312_092500_create_table_entry_file;
mod m20250312_093000_create_table_share_link;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250312_090000_create_table_user::Migration),
            Box::new(m20250312_090500_create_table_api::Migration),
            Box::new(m20250312_091000_create_table_customer::Migration),
            Box::new(m20250312_091500_create_table_site::Migration),
            Box::new(m20250312_092000_create_table_entry::Migration),
            Box::new(m20250312_092500_create_table_entry_file::Migration),
            Box::new(m20250312_093000_create_table_share_link::Migration),
        ]
    }
}
