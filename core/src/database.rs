/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use migration::Migrator;
use sea_orm::{
    ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use sea_orm_migration::prelude::*;
use uuid::Uuid;

use super::consts::DATABASE_FILE_NAME;
use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file)
            .context("Failed to read database url from file")?
            .trim()
            .to_string()
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        format!("sqlite://{}/{}?mode=rwc", cli.data_dir, DATABASE_FILE_NAME)
    };

    let mut opt = ConnectOptions::new(db_url);
    opt.sqlx_logging(cli.log_level == "debug");
    opt.max_connections(5)
        .min_connections(1)
        .connect_timeout(std::time::Duration::from_secs(8))
        .acquire_timeout(std::time::Duration::from_secs(8));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    Ok(db)
}

pub async fn get_user_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<MUser>> {
    Ok(EUser::find()
        .filter(CUser::Email.eq(email.to_lowercase()))
        .one(db)
        .await
        .context("Failed to query user")?)
}

pub async fn get_customer(db: &DatabaseConnection, id: Uuid) -> Result<Option<MCustomer>> {
    Ok(ECustomer::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query customer")?)
}

pub async fn get_customer_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<MCustomer>> {
    Ok(ECustomer::find()
        .filter(CCustomer::Name.eq(name))
        .one(db)
        .await
        .context("Failed to query customer")?)
}

pub async fn get_customers(db: &DatabaseConnection) -> Result<Vec<MCustomer>> {
    Ok(ECustomer::find()
        .order_by_asc(CCustomer::Name)
        .all(db)
        .await
        .context("Failed to query customers")?)
}

/// Fetches a site regardless of lifecycle. Callers that must not see
/// soft-deleted sites use [`get_active_site`].
pub async fn get_site(db: &DatabaseConnection, id: Uuid) -> Result<Option<MSite>> {
    Ok(ESite::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query site")?)
}

pub async fn get_active_site(db: &DatabaseConnection, id: Uuid) -> Result<Option<MSite>> {
    Ok(ESite::find()
        .filter(
            Condition::all()
                .add(CSite::Id.eq(id))
                .add(CSite::Deleted.eq(false)),
        )
        .one(db)
        .await
        .context("Failed to query site")?)
}

pub async fn search_active_sites(
    db: &DatabaseConnection,
    query: Option<&str>,
) -> Result<Vec<MSite>> {
    let mut condition = Condition::all().add(CSite::Deleted.eq(false));

    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(CSite::Name.contains(q))
                .add(CSite::JobNumber.contains(q)),
        );
    }

    Ok(ESite::find()
        .filter(condition)
        .order_by_asc(CSite::Name)
        .all(db)
        .await
        .context("Failed to query sites")?)
}

pub async fn get_deleted_sites(db: &DatabaseConnection) -> Result<Vec<MSite>> {
    Ok(ESite::find()
        .filter(CSite::Deleted.eq(true))
        .order_by_asc(CSite::Name)
        .all(db)
        .await
        .context("Failed to query deleted sites")?)
}

pub async fn get_sites_for_customer(
    db: &DatabaseConnection,
    customer_id: Uuid,
) -> Result<Vec<MSite>> {
    Ok(ESite::find()
        .filter(
            Condition::all()
                .add(CSite::Customer.eq(customer_id))
                .add(CSite::Deleted.eq(false)),
        )
        .order_by_asc(CSite::Name)
        .all(db)
        .await
        .context("Failed to query customer sites")?)
}

pub async fn get_entries_for_site(db: &DatabaseConnection, site_id: Uuid) -> Result<Vec<MEntry>> {
    Ok(EEntry::find()
        .filter(CEntry::Site.eq(site_id))
        .order_by_desc(CEntry::CreatedAt)
        .all(db)
        .await
        .context("Failed to query entries")?)
}

pub async fn get_entries_for_site_on(
    db: &DatabaseConnection,
    site_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<MEntry>> {
    let start = date.and_time(NaiveTime::MIN);
    let end = start + Duration::days(1);

    Ok(EEntry::find()
        .filter(
            Condition::all()
                .add(CEntry::Site.eq(site_id))
                .add(CEntry::CreatedAt.gte(start))
                .add(CEntry::CreatedAt.lt(end)),
        )
        .order_by_desc(CEntry::CreatedAt)
        .all(db)
        .await
        .context("Failed to query entries")?)
}

pub async fn get_entry_file(db: &DatabaseConnection, id: Uuid) -> Result<Option<MEntryFile>> {
    Ok(EEntryFile::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query entry file")?)
}

pub async fn get_files_for_entry(db: &DatabaseConnection, entry_id: Uuid) -> Result<Vec<MEntryFile>> {
    Ok(EEntryFile::find()
        .filter(CEntryFile::Entry.eq(entry_id))
        .order_by_asc(CEntryFile::CreatedAt)
        .all(db)
        .await
        .context("Failed to query entry files")?)
}
