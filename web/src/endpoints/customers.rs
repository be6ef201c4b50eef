/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{get_customer, get_customer_by_name, get_customers, get_sites_for_customer};
use core::input::check_name;
use core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::ActiveModelTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeCustomerRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CustomerDetailResponse {
    pub customer: MCustomer,
    pub sites: ListResponse,
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let customers = get_customers(&state.db).await?;

    let customers: ListResponse = customers
        .iter()
        .map(|c| ListItem {
            id: c.id,
            name: c.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: customers,
    };

    Ok(Json(res))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Json(body): Json<MakeCustomerRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if check_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Customer Name"));
    }

    if get_customer_by_name(&state.db, &body.name).await?.is_some() {
        return Err(WebError::already_exists("Customer"));
    }

    let customer = ACustomer {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.trim().to_string()),
        created_at: Set(Utc::now().naive_utc()),
    };

    let customer = customer.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: customer.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn get_customer_detail(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(customer): Path<Uuid>,
) -> WebResult<Json<BaseResponse<CustomerDetailResponse>>> {
    let customer = get_customer(&state.db, customer)
        .await?
        .ok_or_else(|| WebError::not_found("Customer"))?;

    let sites = get_sites_for_customer(&state.db, customer.id).await?;

    let sites: ListResponse = sites
        .iter()
        .map(|s| ListItem {
            id: s.id,
            name: s.name.clone(),
        })
        .collect();

    let res = BaseResponse {
        error: false,
        message: CustomerDetailResponse { customer, sites },
    };

    Ok(Json(res))
}

pub async fn get_customer_sites(
    state: State<Arc<ServerState>>,
    Extension(_user): Extension<MUser>,
    Path(customer): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MSite>>>> {
    let customer = get_customer(&state.db, customer)
        .await?
        .ok_or_else(|| WebError::not_found("Customer"))?;

    let sites = get_sites_for_customer(&state.db, customer.id).await?;

    let res = BaseResponse {
        error: false,
        message: sites,
    };

    Ok(Json(res))
}
