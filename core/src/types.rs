/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use super::storage::FileStore;
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "WellAtlas", display_name = "WellAtlas", bin_name = "wellatlas-server", author = "WellAtlas", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "WELLATLAS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "WELLATLAS_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "WELLATLAS_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(
        long,
        env = "WELLATLAS_SERVE_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    pub serve_url: String,
    #[arg(long, env = "WELLATLAS_DATA_DIR", default_value = ".")]
    pub data_dir: String,
    #[arg(long, env = "WELLATLAS_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "WELLATLAS_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "WELLATLAS_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "WELLATLAS_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
    #[arg(long, env = "WELLATLAS_MAX_BODY_SIZE", value_parser = greater_than_zero::<usize>, default_value = "104857600")]
    pub max_body_size: usize,
    #[arg(long, env = "WELLATLAS_BACKUP_URL")]
    pub backup_url: Option<String>,
    #[arg(long, env = "WELLATLAS_BACKUP_FOLDER")]
    pub backup_folder: Option<String>,
    #[arg(long, env = "WELLATLAS_BACKUP_SECRET_FILE")]
    pub backup_secret_file: Option<String>,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub storage: FileStore,
    pub cli: Cli,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
}

pub type ListResponse = Vec<ListItem>;

pub type EApi = api::Entity;
pub type ECustomer = customer::Entity;
pub type EEntry = entry::Entity;
pub type EEntryFile = entry_file::Entity;
pub type EShareLink = share_link::Entity;
pub type ESite = site::Entity;
pub type EUser = user::Entity;

pub type MApi = api::Model;
pub type MCustomer = customer::Model;
pub type MEntry = entry::Model;
pub type MEntryFile = entry_file::Model;
pub type MShareLink = share_link::Model;
pub type MSite = site::Model;
pub type MUser = user::Model;

pub type AApi = api::ActiveModel;
pub type ACustomer = customer::ActiveModel;
pub type AEntry = entry::ActiveModel;
pub type AEntryFile = entry_file::ActiveModel;
pub type AShareLink = share_link::ActiveModel;
pub type ASite = site::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CApi = api::Column;
pub type CCustomer = customer::Column;
pub type CEntry = entry::Column;
pub type CEntryFile = entry_file::Column;
pub type CShareLink = share_link::Column;
pub type CSite = site::Column;
pub type CUser = user::Column;
