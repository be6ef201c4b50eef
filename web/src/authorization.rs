/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Json, Response};
use chrono::{Duration, Utc};
use core::consts::API_KEY_PREFIX;
use core::input::load_secret;
use core::types::*;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use rand::Rng;
use rand::distr::Alphanumeric;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
}

fn deny(status: StatusCode, message: &str) -> (StatusCode, Json<BaseResponse<String>>) {
    (
        status,
        Json(BaseResponse {
            error: true,
            message: message.to_string(),
        }),
    )
}

pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, (StatusCode, Json<BaseResponse<String>>)> {
    let auth_header = req.headers_mut().get(axum::http::header::AUTHORIZATION);

    let auth_header = match auth_header {
        Some(header) => header
            .to_str()
            .map_err(|_| deny(StatusCode::FORBIDDEN, "Authorization header empty"))?,
        None => {
            return Err(deny(
                StatusCode::FORBIDDEN,
                "Authorization header not found",
            ));
        }
    };

    let mut header = auth_header.split_whitespace();

    let (bearer, token) = (header.next(), header.next());

    if bearer != Some("Bearer") || token.is_none() {
        return Err(deny(StatusCode::FORBIDDEN, "Invalid Authorization header"));
    }

    let token_str = match token {
        Some(t) => t.to_string(),
        None => {
            return Err(deny(StatusCode::FORBIDDEN, "Missing authorization token"));
        }
    };

    let token_data = match decode_jwt(state.clone(), token_str).await {
        Ok(data) => data,
        Err(_) => {
            return Err(deny(StatusCode::UNAUTHORIZED, "Unable to decode token"));
        }
    };

    let current_user = match EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await
        .map_err(|_| deny(StatusCode::INTERNAL_SERVER_ERROR, "Database error"))?
    {
        Some(user) => user,
        None => {
            return Err(deny(StatusCode::UNAUTHORIZED, "User not found"));
        }
    };

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

pub fn encode_jwt(state: State<Arc<ServerState>>, id: Uuid) -> Result<String, StatusCode> {
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(24);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;

    let claim = Claims { iat, exp, id };
    let secret = load_secret(&state.cli.jwt_secret_file);

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn decode_jwt(
    state: State<Arc<ServerState>>,
    jwt: String,
) -> Result<TokenData<Claims>, StatusCode> {
    let result = if let Some(key) = jwt.strip_prefix(API_KEY_PREFIX) {
        let api_key = EApi::find()
            .filter(CApi::Key.eq(key))
            .one(&state.db)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let api_key = match api_key {
            Some(api_key) => api_key,
            None => return Err(StatusCode::UNAUTHORIZED),
        };

        let mut aapi_key: AApi = api_key.clone().into();

        aapi_key.last_used_at = Set(Utc::now().naive_utc());
        aapi_key
            .save(&state.db)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        TokenData {
            claims: Claims {
                exp: 0,
                iat: api_key.created_at.and_utc().timestamp() as usize,
                id: api_key.owned_by,
            },
            header: Default::default(),
        }
    } else {
        let secret = load_secret(&state.cli.jwt_secret_file);

        decode(
            &jwt,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| StatusCode::UNAUTHORIZED)?
    };

    Ok(result)
}

pub async fn update_last_login(
    state: State<Arc<ServerState>>,
    user: MUser,
) -> Result<(), sea_orm::DbErr> {
    let mut auser: AUser = user.into();

    auser.last_login_at = Set(Utc::now().naive_utc());
    auser.save(&state.db).await?;

    Ok(())
}

pub fn generate_api_key() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
