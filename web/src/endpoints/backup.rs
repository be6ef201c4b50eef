/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use core::backup::{backup_file_name, build_backup_archive, upload_backup};
use core::types::*;
use std::sync::Arc;

/// Streams a freshly built archive back to the caller. Building is
/// blocking file I/O, so it runs on the blocking pool.
pub async fn get_download(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
) -> WebResult<Response> {
    let data_dir = state.cli.data_dir.clone();

    let archive = tokio::task::spawn_blocking(move || build_backup_archive(&data_dir))
        .await
        .map_err(|e| WebError::InternalServerError(format!("Backup task failed: {}", e)))?
        .map_err(WebError::Internal)?;

    let file_name = backup_file_name();
    let disposition = format!("attachment; filename=\"{}\"", file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive,
    )
        .into_response())
}

/// Builds an archive and pushes it to the configured remote provider.
/// Independent of [`get_download`]; a remote failure never affects the
/// local archive path.
pub async fn post_remote(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<String>>> {
    let data_dir = state.cli.data_dir.clone();

    let archive = tokio::task::spawn_blocking(move || build_backup_archive(&data_dir))
        .await
        .map_err(|e| WebError::InternalServerError(format!("Backup task failed: {}", e)))?
        .map_err(WebError::Internal)?;

    let file_name = backup_file_name();

    if let Err(e) = upload_backup(&state.cli, archive, &file_name).await {
        tracing::warn!("Remote backup failed: {}", e);
        return Err(WebError::BadRequest(format!("Remote backup failed: {}", e)));
    }

    let res = BaseResponse {
        error: false,
        message: format!("Backup {} uploaded", file_name),
    };

    Ok(Json(res))
}
