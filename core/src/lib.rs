/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod backup;
pub mod consts;
pub mod database;
pub mod input;
pub mod share;
pub mod storage;
pub mod timeline;
pub mod types;

use anyhow::{Context, Result};
use clap::Parser;
use database::connect_db;
use std::sync::Arc;
use storage::FileStore;
use tracing_subscriber::EnvFilter;
use types::*;

pub async fn init_state() -> Result<Arc<ServerState>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting WellAtlas Server on {}:{}", cli.ip, cli.port);

    std::fs::create_dir_all(&cli.data_dir).context("Failed to create data directory")?;
    let storage = FileStore::new(&cli.data_dir).context("Failed to create upload directory")?;

    let db = connect_db(&cli).await?;

    Ok(Arc::new(ServerState { db, storage, cli }))
}
