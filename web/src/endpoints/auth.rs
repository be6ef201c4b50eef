/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::{encode_jwt, update_last_login};
use crate::error::{WebError, WebResult};
use axum::Json;
use axum::extract::State;
use chrono::Utc;
use core::consts::*;
use core::database::get_user_by_email;
use core::input::{check_name, validate_password};
use core::types::*;
use email_address::EmailAddress;
use password_auth::{generate_hash, verify_password};
use sea_orm::ActiveValue::Set;
use sea_orm::ActiveModelTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn post_register(
    state: State<Arc<ServerState>>,
    Json(body): Json<MakeUserRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    if state.cli.disable_registration {
        return Err(WebError::registration_disabled());
    }

    if check_name(body.name.as_str()).is_err() {
        return Err(WebError::invalid_name("Name"));
    }

    if !EmailAddress::is_valid(body.email.as_str()) {
        return Err(WebError::invalid_email());
    }

    validate_password(body.password.as_str()).map_err(WebError::invalid_password)?;

    let email = body.email.to_lowercase();

    if get_user_by_email(&state.db, &email).await?.is_some() {
        return Err(WebError::already_exists("User"));
    }

    let user = AUser {
        id: Set(Uuid::new_v4()),
        name: Set(body.name.clone()),
        email: Set(email),
        password: Set(Some(generate_hash(body.password.clone()))),
        last_login_at: Set(*NULL_TIME),
        created_at: Set(Utc::now().naive_utc()),
    };

    let user = user.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: user.id.to_string(),
    };

    Ok(Json(res))
}

pub async fn post_login(
    state: State<Arc<ServerState>>,
    Json(body): Json<MakeLoginRequest>,
) -> WebResult<Json<BaseResponse<String>>> {
    let user = get_user_by_email(&state.db, &body.email)
        .await?
        .ok_or_else(WebError::invalid_credentials)?;

    let user_password = user
        .password
        .clone()
        .ok_or_else(WebError::invalid_credentials)?;

    verify_password(body.password, &user_password).map_err(|_| WebError::invalid_credentials())?;

    let token = encode_jwt(state.clone(), user.id)
        .map_err(|_| WebError::failed_to_generate_token())?;

    update_last_login(state, user).await?;

    let res = BaseResponse {
        error: false,
        message: token,
    };

    Ok(Json(res))
}

pub async fn post_logout(
    _state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<String>>> {
    let res = BaseResponse {
        error: false,
        message: "Logout Successfully".to_string(),
    };

    Ok(Json(res))
}
