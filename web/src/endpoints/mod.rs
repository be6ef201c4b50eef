/*
* SPDX-FileCopyrightText: 2025 WellAtlas Contributors
*
* SPDX-License-Identifier: AGPL-3.0-only
*/

pub mod auth;
pub mod backup;
pub mod customers;
pub mod entries;
pub mod shares;
pub mod sites;
pub mod user;

use crate::error::{WebError, WebResult};
use axum::extract::Json;
use core::types::BaseResponse;

pub async fn handle_404() -> WebError {
    WebError::NotFound("Not Found".to_string())
}

pub async fn get_health() -> WebResult<Json<BaseResponse<String>>> {
    let res = BaseResponse {
        error: false,
        message: "200 ALIVE".to_string(),
    };

    Ok(Json(res))
}
