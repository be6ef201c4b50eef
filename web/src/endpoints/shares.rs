/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::endpoints::sites::{EntryWithFiles, TimelineDay, attach_files, timeline_for_site};
use crate::error::{WebError, WebResult};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::{Extension, Json};
use core::database::{get_active_site, get_entries_for_site_on};
use core::input::parse_share_date;
use core::share::{ShareScope, get_or_create_share, resolve_file_access, revoke_share, verify_share};
use core::types::*;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeShareDayRequest {
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ShareLinkResponse {
    pub id: Uuid,
    pub token: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SharedTimelineResponse {
    pub site: String,
    pub timeline: Vec<TimelineDay>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SharedDayResponse {
    pub site: String,
    pub date: String,
    pub entries: Vec<EntryWithFiles>,
}

fn share_url(state: &ServerState, link: &MShareLink) -> String {
    match link.date {
        Some(date) => format!(
            "{}/share/site/{}/day/{}?token={}",
            state.cli.serve_url, link.site, date, link.token
        ),
        None => format!(
            "{}/share/site/{}?token={}",
            state.cli.serve_url, link.site, link.token
        ),
    }
}

fn token_from_query(query: &HashMap<String, String>) -> String {
    query.get("token").cloned().unwrap_or_default()
}

pub async fn post_share_site(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(site): Path<Uuid>,
) -> WebResult<Json<BaseResponse<ShareLinkResponse>>> {
    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    let link = get_or_create_share(&state.db, site.id, ShareScope::Site).await?;

    let res = BaseResponse {
        error: false,
        message: ShareLinkResponse {
            id: link.id,
            url: share_url(&state, &link),
            token: link.token,
        },
    };

    Ok(Json(res))
}

pub async fn post_share_day(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(site): Path<Uuid>,
    Json(body): Json<MakeShareDayRequest>,
) -> WebResult<Json<BaseResponse<ShareLinkResponse>>> {
    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    let date = parse_share_date(&body.date).map_err(|_| WebError::invalid_date())?;

    let link = get_or_create_share(&state.db, site.id, ShareScope::Day(date)).await?;

    let res = BaseResponse {
        error: false,
        message: ShareLinkResponse {
            id: link.id,
            url: share_url(&state, &link),
            token: link.token,
        },
    };

    Ok(Json(res))
}

pub async fn post_revoke_share(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(share): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    let link = EShareLink::find_by_id(share)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Share Link"))?;

    revoke_share(&state.db, link).await?;

    let res = BaseResponse {
        error: false,
        message: "Share Link revoked".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_public_site(
    state: State<Arc<ServerState>>,
    Path(site): Path<Uuid>,
    Query(query): Query<HashMap<String, String>>,
) -> WebResult<Json<BaseResponse<SharedTimelineResponse>>> {
    let token = token_from_query(&query);

    verify_share(&state.db, &token, site, ShareScope::Site)
        .await?
        .ok_or_else(WebError::access_denied)?;

    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(WebError::access_denied)?;

    let timeline = timeline_for_site(&state, site.id).await?;

    let res = BaseResponse {
        error: false,
        message: SharedTimelineResponse {
            site: site.name,
            timeline,
        },
    };

    Ok(Json(res))
}

pub async fn get_public_day(
    state: State<Arc<ServerState>>,
    Path((site, date)): Path<(Uuid, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> WebResult<Json<BaseResponse<SharedDayResponse>>> {
    let token = token_from_query(&query);
    let date = parse_share_date(&date).map_err(|_| WebError::invalid_date())?;

    verify_share(&state.db, &token, site, ShareScope::Day(date))
        .await?
        .ok_or_else(WebError::access_denied)?;

    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(WebError::access_denied)?;

    let entries = get_entries_for_site_on(&state.db, site.id, date).await?;

    let res = BaseResponse {
        error: false,
        message: SharedDayResponse {
            site: site.name,
            date: date.to_string(),
            entries: attach_files(&state, entries).await?,
        },
    };

    Ok(Json(res))
}

/// Anonymous file download. Authorization runs through
/// [`resolve_file_access`] on every request; a token revoked between two
/// requests stops working immediately.
pub async fn get_public_file(
    state: State<Arc<ServerState>>,
    Path(file): Path<Uuid>,
    Query(query): Query<HashMap<String, String>>,
) -> WebResult<Response> {
    let token = token_from_query(&query);

    let (file, _link) = resolve_file_access(&state.db, &token, file)
        .await?
        .ok_or_else(WebError::access_denied)?;

    let bytes = state
        .storage
        .read(&file.filename)
        .map_err(|_| WebError::access_denied())?;

    Ok(super::entries::file_response(&file, bytes))
}
