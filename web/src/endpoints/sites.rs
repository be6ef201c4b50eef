/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use core::database::{
    get_active_site, get_customer, get_deleted_sites, get_entries_for_site, get_files_for_entry,
    get_site, search_active_sites,
};
use core::input::{check_coordinates, check_name};
use core::timeline::group_entries_by_day;
use core::types::*;
use entity::site::SiteLifecycle;
use sea_orm::ActiveValue::Set;
use sea_orm::ActiveModelTrait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeSiteRequest {
    pub customer: Uuid,
    pub name: String,
    pub job_number: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchSiteRequest {
    pub name: Option<String>,
    pub job_number: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EntryWithFiles {
    pub entry: MEntry,
    pub files: Vec<MEntryFile>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub entries: Vec<EntryWithFiles>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SiteDetailResponse {
    pub site: MSite,
    pub customer: Option<MCustomer>,
    pub timeline: Vec<TimelineDay>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MapPin {
    pub id: Uuid,
    pub name: String,
    pub job_number: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub(crate) async fn attach_files(
    state: &ServerState,
    entries: Vec<MEntry>,
) -> WebResult<Vec<EntryWithFiles>> {
    let mut with_files = Vec::with_capacity(entries.len());

    for entry in entries {
        let files = get_files_for_entry(&state.db, entry.id).await?;
        with_files.push(EntryWithFiles { entry, files });
    }

    Ok(with_files)
}

pub(crate) async fn timeline_for_site(
    state: &ServerState,
    site_id: Uuid,
) -> WebResult<Vec<TimelineDay>> {
    let entries = get_entries_for_site(&state.db, site_id).await?;

    let mut timeline = Vec::new();
    for (date, entries) in group_entries_by_day(entries) {
        timeline.push(TimelineDay {
            date,
            entries: attach_files(state, entries).await?,
        });
    }

    Ok(timeline)
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Query(query): Query<HashMap<String, String>>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let sites = search_active_sites(&state.db, query.get("q").map(String::as_str)).await?;

    let sites: ListResponse = sites
        .iter()
        .map(|s| ListItem {
            id: s.id,
            name: s.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: sites,
    };

    Ok(Json(res))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Json(body): Json<MakeSiteRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if check_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Site Name"));
    }

    let customer = get_customer(&state.db, body.customer)
        .await?
        .ok_or_else(|| WebError::not_found("Customer"))?;

    if let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) {
        check_coordinates(latitude, longitude).map_err(WebError::BadRequest)?;
    }

    let site = ASite {
        id: Set(Uuid::new_v4()),
        customer: Set(customer.id),
        name: Set(body.name.trim().to_string()),
        job_number: Set(body.job_number.unwrap_or_default()),
        latitude: Set(body.latitude),
        longitude: Set(body.longitude),
        address: Set(body.address.unwrap_or_default()),
        category: Set(body.category.unwrap_or_default()),
        status: Set(body.status.unwrap_or_default()),
        notes: Set(body.notes.unwrap_or_default()),
        deleted: Set(false),
        deleted_at: Set(None),
        created_by: Set(user.id),
        created_at: Set(Utc::now().naive_utc()),
    };

    let site = site.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: site.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_site_detail(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(site): Path<Uuid>,
) -> WebResult<Json<BaseResponse<SiteDetailResponse>>> {
    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    let customer = get_customer(&state.db, site.customer).await?;
    let timeline = timeline_for_site(&state, site.id).await?;

    let res = BaseResponse {
        error: false,
        message: SiteDetailResponse {
            site,
            customer,
            timeline,
        },
    };

    Ok(Json(res))
}

pub async fn patch_site(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(site): Path<Uuid>,
    Json(body): Json<PatchSiteRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    let latitude = body.latitude.or(site.latitude);
    let longitude = body.longitude.or(site.longitude);

    if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
        check_coordinates(latitude, longitude).map_err(WebError::BadRequest)?;
    }

    let mut asite: ASite = site.into();

    if let Some(name) = body.name {
        if check_name(name.as_str()).is_err() {
            return Err(WebError::invalid_name("Site Name"));
        }

        asite.name = Set(name.trim().to_string());
    }

    if let Some(job_number) = body.job_number {
        asite.job_number = Set(job_number);
    }

    if body.latitude.is_some() {
        asite.latitude = Set(body.latitude);
    }

    if body.longitude.is_some() {
        asite.longitude = Set(body.longitude);
    }

    if let Some(address) = body.address {
        asite.address = Set(address);
    }

    if let Some(category) = body.category {
        asite.category = Set(category);
    }

    if let Some(status) = body.status {
        asite.status = Set(status);
    }

    if let Some(notes) = body.notes {
        asite.notes = Set(notes);
    }

    let site = asite.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: site.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn delete_site(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(site): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    let site = get_active_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    let mut asite: ASite = site.into();
    asite.set_lifecycle(SiteLifecycle::Deleted {
        at: Utc::now().naive_utc(),
    });
    asite.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Site moved to Deleted".to_string(),
    };

    Ok(Json(res))
}

pub async fn post_restore_site(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(site): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    let site = get_site(&state.db, site)
        .await?
        .ok_or_else(|| WebError::not_found("Site"))?;

    if !site.is_deleted() {
        return Err(WebError::BadRequest("Site is not deleted".to_string()));
    }

    let mut asite: ASite = site.into();
    asite.set_lifecycle(SiteLifecycle::Active);
    asite.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Site restored".to_string(),
    };

    Ok(Json(res))
}

pub async fn get_deleted(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let sites = get_deleted_sites(&state.db).await?;

    let sites: ListResponse = sites
        .iter()
        .map(|s| ListItem {
            id: s.id,
            name: s.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: sites,
    };

    Ok(Json(res))
}

pub async fn get_map(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MapPin>>>> {
    let sites = search_active_sites(&state.db, None).await?;

    let pins: Vec<MapPin> = sites
        .into_iter()
        .filter_map(|s| match (s.latitude, s.longitude) {
            (Some(latitude), Some(longitude)) => Some(MapPin {
                id: s.id,
                name: s.name,
                job_number: s.job_number,
                latitude,
                longitude,
            }),
            _ => None,
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: pins,
    };

    Ok(Json(res))
}
