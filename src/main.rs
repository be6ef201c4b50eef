/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::sync::Arc;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let state = wellatlas_core::init_state().await?;

    web::serve_web(Arc::clone(&state)).await?;

    Ok(())
}
