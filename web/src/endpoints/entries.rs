/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{get_active_site, get_entry_file};
use core::input::allowed_upload;
use core::types::*;
use entity::entry::EntryType;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveEnum, ActiveModelTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct SaveCommentRequest {
    pub comment: String,
}

struct UploadedFile {
    original_name: String,
    mime: String,
    bytes: bytes::Bytes,
}

/// Creates an entry from a multipart form: `type` and `note` fields plus
/// any number of `files` parts. Files with disallowed extensions are
/// skipped, matching the upload form behavior.
pub async fn post_entry(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(site): Path<Uuid>,
    mut multipart: Multipart,
) -> WebResult<Json<BaseResponse<String>>> {
    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    let mut entry_type = EntryType::General;
    let mut note = String::new();
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| WebError::BadRequest(format!("Invalid type field: {}", e)))?;
                entry_type = EntryType::try_from_value(&value)
                    .map_err(|_| WebError::BadRequest("Invalid entry type".to_string()))?;
            }
            Some("note") => {
                note = field
                    .text()
                    .await
                    .map_err(|e| WebError::BadRequest(format!("Invalid note field: {}", e)))?
                    .trim()
                    .to_string();
            }
            Some("files") => {
                let original_name = field.file_name().map(str::to_string).unwrap_or_default();
                let mime = field.content_type().map(str::to_string).unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| WebError::BadRequest(format!("Invalid file upload: {}", e)))?;

                if original_name.is_empty() || !allowed_upload(&original_name) {
                    continue;
                }

                files.push(UploadedFile {
                    original_name,
                    mime,
                    bytes,
                });
            }
            _ => {}
        }
    }

    let entry = AEntry {
        id: Set(Uuid::new_v4()),
        site: Set(site.id),
        entry_type: Set(entry_type),
        note: Set(note),
        created_by: Set(user.id),
        created_at: Set(Utc::now().naive_utc()),
    };

    let entry = entry.insert(&state.db).await?;

    for file in files {
        let filename = state.storage.save(&file.original_name, &file.bytes)?;

        let entry_file = AEntryFile {
            id: Set(Uuid::new_v4()),
            entry: Set(entry.id),
            filename: Set(filename),
            original_name: Set(file.original_name),
            mime: Set(file.mime),
            comment: Set(String::new()),
            created_at: Set(Utc::now().naive_utc()),
        };

        entry_file.insert(&state.db).await?;
    }

    let res = BaseResponse {
        error: false,
        message: entry.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn patch_file_comment(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(file): Path<Uuid>,
    Json(body): Json<SaveCommentRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    let file = get_entry_file(&state.db, file)
        .await?
        .ok_or_else(|| WebError::not_found("File"))?;

    let mut afile: AEntryFile = file.into();
    afile.comment = Set(body.comment);
    let file = afile.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: file.id.to_string(),
    };

    Ok(Json(res))
}

pub(crate) fn file_response(file: &MEntryFile, bytes: Vec<u8>) -> Response {
    let mime = if file.mime.is_empty() {
        mime_guess::from_path(&file.original_name)
            .first_or_octet_stream()
            .to_string()
    } else {
        file.mime.clone()
    };

    let disposition = format!(
        "inline; filename=\"{}\"",
        file.original_name.replace('"', "")
    );

    (
        [
            (header::CONTENT_TYPE, mime),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

pub async fn get_file(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(file): Path<Uuid>,
) -> WebResult<Response> {
    let file = get_entry_file(&state.db, file)
        .await?
        .ok_or_else(|| WebError::not_found("File"))?;

    let bytes = state.storage.read(&file.filename)?;

    Ok(file_response(&file, bytes))
}
